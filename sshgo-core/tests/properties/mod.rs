mod codec_tests;
mod shell_block_tests;
mod store_tests;
