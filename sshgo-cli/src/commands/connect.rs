//! Connect command - run the client for a saved connection.

use std::path::Path;
use std::process::Stdio;

use sshgo_core::config::Settings;
use sshgo_core::error::LaunchError;
use sshgo_core::models::{ConnectionRecord, Protocol};
use sshgo_core::protocol::{Invocation, build_invocation};

use crate::error::CliError;
use crate::format::port_label;
use crate::util::{find_connection, load_settings, open_store};

/// How the client is started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Replace this process (Unix) or wait for the client
    Foreground,
    /// Start the client with null stdio and return
    Detached,
    /// Print the masked command line only
    DryRun,
}

impl LaunchMode {
    /// `--dry-run` wins over `--detach`
    pub const fn from_flags(dry_run: bool, detach: bool) -> Self {
        if dry_run {
            Self::DryRun
        } else if detach {
            Self::Detached
        } else {
            Self::Foreground
        }
    }
}

/// Connect command handler
pub fn cmd_connect(config_path: Option<&Path>, name: &str, mode: LaunchMode) -> Result<(), CliError> {
    let store = open_store(config_path)?;
    let connections = store.list()?;
    let connection = find_connection(&connections, name)?;
    let settings = load_settings(&store)?;
    launch(connection, &settings, mode)
}

/// Builds the client invocation for `connection` and runs it in `mode`.
pub fn launch(
    connection: &ConnectionRecord,
    settings: &Settings,
    mode: LaunchMode,
) -> Result<(), CliError> {
    let launch_settings = settings.launch_settings();
    if matches!(connection.protocol, Protocol::Ssh)
        && !connection.secret.is_empty()
        && launch_settings.ssh.password_helper.is_none()
    {
        tracing::warn!(
            helper = %settings.sshpass_program,
            "password helper not installed; ssh will ask for the password"
        );
    }

    let invocation = build_invocation(connection, &launch_settings)?;
    let shown = invocation.display_masked(connection.secret.expose());
    tracing::debug!(connection = %connection.name, command = %shown, "built client command");

    match mode {
        LaunchMode::DryRun => {
            println!("{shown}");
            Ok(())
        }
        LaunchMode::Detached => spawn_detached(&invocation),
        LaunchMode::Foreground => {
            println!(
                "Connecting to '{}' ({} {}:{})...",
                connection.name,
                connection.protocol,
                connection.host,
                port_label(connection.port, connection.effective_port())
            );
            run_foreground(&invocation)
        }
    }
}

fn spawn_error(invocation: &Invocation, source: std::io::Error) -> CliError {
    LaunchError::ExternalProcess {
        program: invocation.program.clone(),
        source,
    }
    .into()
}

/// Replaces the current process with the client, so its exit status
/// becomes ours.
#[cfg(unix)]
fn run_foreground(invocation: &Invocation) -> Result<(), CliError> {
    use std::os::unix::process::CommandExt;

    let err = invocation.to_command().exec();
    Err(spawn_error(invocation, err))
}

#[cfg(not(unix))]
fn run_foreground(invocation: &Invocation) -> Result<(), CliError> {
    use crate::error::exit_codes;

    let status = invocation
        .to_command()
        .status()
        .map_err(|e| spawn_error(invocation, e))?;

    if status.success() {
        Ok(())
    } else {
        Err(CliError::ProcessExit {
            program: invocation.program.clone(),
            code: status.code().unwrap_or(exit_codes::GENERAL_ERROR),
        })
    }
}

/// Starts the client in its own process group with null stdio and does
/// not wait for it.
#[allow(clippy::zombie_processes)]
fn spawn_detached(invocation: &Invocation) -> Result<(), CliError> {
    let mut cmd = invocation.to_command();
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let child = cmd.spawn().map_err(|e| spawn_error(invocation, e))?;
    tracing::info!(program = %invocation.program, pid = child.id(), "client started in background");
    println!("Started {} (pid {})", invocation.program, child.id());
    Ok(())
}
