//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use sshgo_core::shell::BlockKind;

/// `sshgo` - quick access to saved SSH and RDP connections
#[derive(Parser)]
#[command(name = "sshgo")]
#[command(author, version, about = "Personal SSH and RDP connection manager")]
#[command(propagate_version = true)]
#[command(after_help = "Run without a command to pick a connection from a numbered menu.\n\
    `sshgo <name>` is a shortcut for `sshgo connect <name>`.")]
pub struct Cli {
    /// Path to the connection store (overrides SSH_CONFIG_FILE)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List saved connections
    List {
        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: ListFormat,

        /// Sort by name instead of file order
        #[arg(short, long)]
        sorted: bool,

        /// Only show connections of this protocol (ssh, rdp)
        #[arg(short, long)]
        protocol: Option<String>,
    },

    /// Show the details of one connection
    Show {
        /// Connection name (exact, case-insensitive or unique prefix)
        name: String,
    },

    /// Open a connection
    Connect {
        /// Connection name (exact, case-insensitive or unique prefix)
        name: String,

        /// Print the command that would run, with secrets masked
        #[arg(long)]
        dry_run: bool,

        /// Start the client in the background and return immediately
        #[arg(short, long)]
        detach: bool,
    },

    /// Add a connection
    Add {
        /// Unique connection name
        name: String,

        /// Host name or IP address
        host: String,

        /// Protocol (ssh, rdp)
        #[arg(short = 'P', long, default_value = "ssh")]
        protocol: String,

        /// Port (defaults to 22 for SSH and 3389 for RDP)
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
        port: Option<u16>,

        /// User name
        #[arg(short, long)]
        user: Option<String>,

        #[command(flatten)]
        secret: SecretArgs,

        /// Extra client arguments, e.g. "-A -o ServerAliveInterval=30"
        #[arg(short, long, allow_hyphen_values = true)]
        extra: Option<String>,
    },

    /// Change fields of a connection
    Edit {
        /// Connection to change
        name: String,

        /// New name
        #[arg(long = "name", value_name = "NEW_NAME")]
        new_name: Option<String>,

        /// New host
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// New protocol (ssh, rdp)
        #[arg(short = 'P', long)]
        protocol: Option<String>,

        /// New port
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
        port: Option<u16>,

        /// New user name
        #[arg(short, long)]
        user: Option<String>,

        #[command(flatten)]
        secret: SecretArgs,

        /// Remove the stored password
        #[arg(long, conflicts_with_all = ["password", "ask_password"])]
        clear_password: bool,

        /// New extra client arguments
        #[arg(short, long, allow_hyphen_values = true)]
        extra: Option<String>,
    },

    /// Remove a connection
    #[command(visible_alias = "rm")]
    Remove {
        /// Connection to remove
        name: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Print connection names for shell completion
    Names,

    /// Manage the completion and alias blocks in shell rc files
    Shell {
        #[command(subcommand)]
        action: ShellAction,
    },

    /// Generate a completion script for this CLI
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// `sshgo <name>` connects directly
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Password options shared by `add` and `edit`
#[derive(Args, Debug)]
pub struct SecretArgs {
    /// Password (stored in plain text in the store file)
    #[arg(long, conflicts_with = "ask_password")]
    pub password: Option<String>,

    /// Prompt for the password without echo
    #[arg(long)]
    pub ask_password: bool,
}

/// Output format for `list`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Aligned columns
    #[default]
    Table,
    /// One name per line
    Names,
    /// JSON array
    Json,
    /// Comma-separated values
    Csv,
}

/// `shell` subcommands
#[derive(Subcommand)]
pub enum ShellAction {
    /// Add the blocks to every existing rc file
    Install(ShellArgs),
    /// Remove the blocks and any leftovers of older installs
    Uninstall(ShellArgs),
    /// Report the state of each block per rc file
    Status(ShellArgs),
}

/// Target selection for `shell` subcommands
#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Use the system-wide rc files and completion directory
    #[arg(long)]
    pub system: bool,

    /// Which blocks to manage
    #[arg(short, long, default_value = "all", value_enum)]
    pub kind: KindArg,

    /// Operate on these rc files instead of the standard ones
    #[arg(long = "rc", value_name = "FILE")]
    pub rc_files: Vec<PathBuf>,
}

/// Block selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Completion and aliases
    #[default]
    All,
    /// Only the completion block
    Completion,
    /// Only the aliases block
    Aliases,
}

impl KindArg {
    /// Block kinds selected by this argument
    pub fn kinds(self) -> Vec<BlockKind> {
        match self {
            Self::All => BlockKind::ALL.to_vec(),
            Self::Completion => vec![BlockKind::Completion],
            Self::Aliases => vec![BlockKind::Aliases],
        }
    }
}
