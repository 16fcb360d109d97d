//! Completion support: the name exporter and the generated Bash script.

mod exporter;
mod script;

pub use exporter::{export_names, format_names};
pub use script::{
    SCRIPT_FILE_MODE, SYSTEM_SCRIPT_PATH, USER_SCRIPT_NAME, remove_completion_script,
    render_completion_script, user_script_path, write_completion_script,
};
