//! Command handler modules for the CLI.

mod add;
mod completions;
mod connect;
mod edit;
mod list;
mod menu;
mod names;
mod remove;
mod shell;
mod show;

use std::path::Path;

use crate::cli::{Commands, ShellAction};
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler. No command opens
/// the interactive menu.
pub fn dispatch(config_path: Option<&Path>, command: Option<Commands>) -> Result<(), CliError> {
    let Some(command) = command else {
        return menu::cmd_menu(config_path);
    };

    match command {
        Commands::List {
            format,
            sorted,
            protocol,
        } => list::cmd_list(config_path, format, sorted, protocol.as_deref()),
        Commands::Show { name } => show::cmd_show(config_path, &name),
        Commands::Connect {
            name,
            dry_run,
            detach,
        } => connect::cmd_connect(
            config_path,
            &name,
            connect::LaunchMode::from_flags(dry_run, detach),
        ),
        Commands::Add {
            name,
            host,
            protocol,
            port,
            user,
            secret,
            extra,
        } => add::cmd_add(
            config_path,
            &add::AddParams {
                name: &name,
                host: &host,
                protocol: &protocol,
                port,
                user: user.as_deref(),
                secret: &secret,
                extra: extra.as_deref(),
            },
        ),
        Commands::Edit {
            name,
            new_name,
            host,
            protocol,
            port,
            user,
            secret,
            clear_password,
            extra,
        } => edit::cmd_edit(
            config_path,
            &name,
            &edit::EditParams {
                new_name: new_name.as_deref(),
                host: host.as_deref(),
                protocol: protocol.as_deref(),
                port,
                user: user.as_deref(),
                secret: &secret,
                clear_password,
                extra: extra.as_deref(),
            },
        ),
        Commands::Remove { name, yes } => remove::cmd_remove(config_path, &name, yes),
        Commands::Names => names::cmd_names(config_path),
        Commands::Shell { action } => match action {
            ShellAction::Install(args) => shell::cmd_install(config_path, &args),
            ShellAction::Uninstall(args) => shell::cmd_uninstall(config_path, &args),
            ShellAction::Status(args) => shell::cmd_status(config_path, &args),
        },
        Commands::Completions { shell } => completions::cmd_completions(shell),
        Commands::External(args) => match args.as_slice() {
            [name] => connect::cmd_connect(config_path, name, connect::LaunchMode::Foreground),
            _ => Err(CliError::Usage(format!(
                "unexpected arguments: {}",
                args.join(" ")
            ))),
        },
    }
}
