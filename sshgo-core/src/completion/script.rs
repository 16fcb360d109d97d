//! The Bash completion function sourced from the rc files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ShellError, ShellResult};
use crate::fs_util;

/// System-wide location picked up by bash-completion automatically
pub const SYSTEM_SCRIPT_PATH: &str = "/usr/share/bash-completion/completions/sshgo";

/// File name of the per-user script under `~/.bash_completion.d`
pub const USER_SCRIPT_NAME: &str = "sshgo-completion.sh";

/// Mode of a freshly written script
pub const SCRIPT_FILE_MODE: u32 = 0o644;

/// `~/.bash_completion.d/sshgo-completion.sh`
#[must_use]
pub fn user_script_path(home: &Path) -> PathBuf {
    home.join(".bash_completion.d").join(USER_SCRIPT_NAME)
}

/// Renders the completion script. `program` is the command used to list
/// profile names, normally `sshgo`.
#[must_use]
pub fn render_completion_script(program: &str) -> String {
    format!(
        r#"# sshgo completion (generated, do not edit)

_sshgo_completion() {{
    local cur prev names
    COMPREPLY=()
    cur="${{COMP_WORDS[COMP_CWORD]}}"
    prev="${{COMP_WORDS[COMP_CWORD-1]}}"

    if [ "$COMP_CWORD" -eq 1 ]; then
        names=$({program} names 2>/dev/null)
        COMPREPLY=( $(compgen -W "$names" -- "$cur") )
        return 0
    fi

    case "$prev" in
        connect|remove|rm|edit|show)
            names=$({program} names 2>/dev/null)
            COMPREPLY=( $(compgen -W "$names" -- "$cur") )
            ;;
    esac
    return 0
}}

complete -F _sshgo_completion sshgo
"#
    )
}

/// Writes the script atomically, creating parent directories.
///
/// # Errors
///
/// [`ShellError::FileAccess`] when the directory or file cannot be written.
pub fn write_completion_script(path: &Path, program: &str) -> ShellResult<()> {
    let access = |source: io::Error| ShellError::FileAccess {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(access)?;
    }
    fs_util::write_atomic(path, &render_completion_script(program), SCRIPT_FILE_MODE)
        .map_err(access)
}

/// Deletes the script. Returns false if it was not there.
///
/// # Errors
///
/// [`ShellError::FileAccess`] for anything but a missing file.
pub fn remove_completion_script(path: &Path) -> ShellResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ShellError::FileAccess {
            path: path.to_path_buf(),
            source,
        }),
    }
}
