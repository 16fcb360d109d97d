mod launch_tests;
mod shell_file_tests;
mod store_tests;
