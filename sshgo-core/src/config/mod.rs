//! Configuration: where the store lives and the optional settings file.

mod paths;
mod settings;

pub use paths::{
    APP_DIR_NAME, SETTINGS_FILE_NAME, STORE_ENV, STORE_FILE_NAME, default_store_path,
    expand_path, home_dir, resolve_store_path, settings_path_for,
};
pub use settings::Settings;
