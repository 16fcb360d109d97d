//! Shell integration commands: the completion script and the rc file
//! blocks that source it.

use std::path::{Path, PathBuf};

use sshgo_core::completion::{
    SYSTEM_SCRIPT_PATH, remove_completion_script, write_completion_script,
};
use sshgo_core::config::home_dir;
use sshgo_core::shell::{
    BackupStatus, BlockKind, FileChange, Scope, ShellDialect, ShellTarget, block_spec,
    detect_file, install_file, select_targets, standard_targets, uninstall_file,
};

use crate::cli::ShellArgs;
use crate::error::CliError;
use crate::util::{load_settings, open_store};

/// Command the completion function runs to list names
const PROGRAM_NAME: &str = "sshgo";

/// Resolved targets of one `shell` invocation
struct Plan {
    script: PathBuf,
    targets: Vec<ShellTarget>,
    kinds: Vec<BlockKind>,
}

impl Plan {
    fn new(config_path: Option<&Path>, args: &ShellArgs) -> Result<Self, CliError> {
        let scope = if args.system {
            Scope::System
        } else {
            Scope::User
        };
        let home = home_dir()?;

        let script = if args.system {
            PathBuf::from(SYSTEM_SCRIPT_PATH)
        } else {
            let store = open_store(config_path)?;
            load_settings(&store)?.user_completion_script(&home)
        };

        let targets = if args.rc_files.is_empty() {
            select_targets(&standard_targets(&home), scope, Path::exists)
        } else {
            args.rc_files
                .iter()
                .map(|path| ShellTarget::new(path.clone(), dialect_for(path), scope))
                .collect()
        };
        tracing::debug!(
            script = %script.display(),
            targets = targets.len(),
            "resolved shell targets"
        );

        Ok(Self {
            script,
            targets,
            kinds: args.kind.kinds(),
        })
    }

    fn includes_completion(&self) -> bool {
        self.kinds.contains(&BlockKind::Completion)
    }

    fn report_no_targets(&self) {
        if self.targets.is_empty() {
            println!("No shell rc files found; nothing to do.");
        }
    }
}

/// Guesses the shell from an rc file name
fn dialect_for(path: &Path) -> ShellDialect {
    let is_zsh = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().contains("zsh"));
    if is_zsh {
        ShellDialect::Zsh
    } else {
        ShellDialect::Bash
    }
}

/// `shell install`
pub fn cmd_install(config_path: Option<&Path>, args: &ShellArgs) -> Result<(), CliError> {
    let plan = Plan::new(config_path, args)?;

    if plan.includes_completion() {
        write_completion_script(&plan.script, PROGRAM_NAME)?;
        tracing::info!(path = %plan.script.display(), "completion script written");
        println!("Wrote completion script {}", plan.script.display());
    }

    plan.report_no_targets();
    let mut changed = false;
    for target in &plan.targets {
        for &kind in &plan.kinds {
            let spec = block_spec(kind, target.dialect, &plan.script);
            let path = target.path.display();
            match install_file(&target.path, &spec)? {
                FileChange::Updated => {
                    tracing::info!(path = %path, kind = %kind, "block installed");
                    println!("{path}: added {kind} block");
                    changed = true;
                }
                FileChange::Unchanged => println!("{path}: {kind} block already present"),
                FileChange::Missing => println!("{path}: skipped, file does not exist"),
            }
        }
    }

    if changed {
        println!("Open a new shell or source the rc file to use it.");
    }
    Ok(())
}

/// `shell uninstall`
pub fn cmd_uninstall(config_path: Option<&Path>, args: &ShellArgs) -> Result<(), CliError> {
    let plan = Plan::new(config_path, args)?;

    plan.report_no_targets();
    for target in &plan.targets {
        for &kind in &plan.kinds {
            let spec = block_spec(kind, target.dialect, &plan.script);
            let outcome = uninstall_file(&target.path, &spec)?;
            let path = target.path.display();

            match outcome.backup {
                BackupStatus::Written(ref backup) => {
                    tracing::debug!(backup = %backup.display(), "rc file backed up");
                }
                BackupStatus::Failed {
                    path: ref backup,
                    ref error,
                } => {
                    tracing::warn!(backup = %backup.display(), %error, "could not back up rc file");
                }
                BackupStatus::NotNeeded => {}
            }

            match outcome.change {
                FileChange::Updated => {
                    tracing::info!(path = %path, kind = %kind, "block removed");
                    println!("{path}: removed {kind} block");
                }
                FileChange::Unchanged => println!("{path}: no {kind} block"),
                FileChange::Missing => println!("{path}: skipped, file does not exist"),
            }
        }
    }

    if plan.includes_completion() && remove_completion_script(&plan.script)? {
        tracing::info!(path = %plan.script.display(), "completion script removed");
        println!("Removed completion script {}", plan.script.display());
    }
    Ok(())
}

/// `shell status`
pub fn cmd_status(config_path: Option<&Path>, args: &ShellArgs) -> Result<(), CliError> {
    let plan = Plan::new(config_path, args)?;

    if plan.includes_completion() {
        let state = if plan.script.is_file() {
            "present"
        } else {
            "absent"
        };
        println!("completion script {}: {state}", plan.script.display());
    }

    plan.report_no_targets();
    for target in &plan.targets {
        for &kind in &plan.kinds {
            let spec = block_spec(kind, target.dialect, &plan.script);
            let state = detect_file(&target.path, &spec)?
                .map_or("missing file", |state| state.as_str());
            println!("{} {kind}: {state}", target.path.display());
        }
    }
    Ok(())
}
