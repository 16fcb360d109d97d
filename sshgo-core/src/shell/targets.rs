//! Shell dialects, rc file locations and the blocks each one receives.

use std::fmt;
use std::path::{Path, PathBuf};

use super::block::BlockSpec;

/// Legacy banner of the completion snippet written by older installers
pub const LEGACY_COMPLETION_BANNER: &str = "# SSH Connection Manager - Auto-completion";

/// Legacy banner of the alias snippet written by older installers
pub const LEGACY_ALIAS_BANNER: &str = "# SSH Connection Manager alias";

/// Fragment of every per-user completion script path, old and new
const COMPLETION_STRAY: &str = "sshgo-completion";

/// Line that lets zsh load Bash completion functions
pub const ZSH_BASHCOMPINIT: &str = "autoload -U +X bashcompinit && bashcompinit";

/// Comment older installers wrote above [`ZSH_BASHCOMPINIT`]
pub const LEGACY_ZSH_COMMENT: &str = "# Enable bash completion compatibility for ZSH";

/// Aliases installed by the aliases block
pub const ALIASES: [(&str, &str); 3] = [
    ("sshl", "sshgo list"),
    ("sshm", "sshgo"),
    ("sshctl", "sshgo"),
];

/// Shell family of an rc file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShellDialect {
    /// GNU Bash
    Bash,
    /// Z shell, using Bash completion through `bashcompinit`
    Zsh,
}

impl fmt::Display for ShellDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bash => write!(f, "bash"),
            Self::Zsh => write!(f, "zsh"),
        }
    }
}

/// Who an rc file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Files in the user's home directory
    User,
    /// System-wide files under `/etc`
    System,
}

/// Kind of managed block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Sources the completion script
    Completion,
    /// Short aliases for common commands
    Aliases,
}

impl BlockKind {
    /// All kinds, in install order
    pub const ALL: [Self; 2] = [Self::Completion, Self::Aliases];

    /// Lowercase label used in markers
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completion => "completion",
            Self::Aliases => "aliases",
        }
    }

    /// Opening marker line
    #[must_use]
    pub fn start_marker(self) -> String {
        format!("# >>> sshgo {} >>>", self.as_str())
    }

    /// Closing marker line
    #[must_use]
    pub fn end_marker(self) -> String {
        format!("# <<< sshgo {} <<<", self.as_str())
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rc file that may receive blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTarget {
    /// Path of the rc file
    pub path: PathBuf,
    /// Shell reading it
    pub dialect: ShellDialect,
    /// User or system file
    pub scope: Scope,
}

impl ShellTarget {
    /// Creates a target
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, dialect: ShellDialect, scope: Scope) -> Self {
        Self {
            path: path.into(),
            dialect,
            scope,
        }
    }
}

/// The four rc files sshgo knows about.
#[must_use]
pub fn standard_targets(home: &Path) -> Vec<ShellTarget> {
    vec![
        ShellTarget::new(home.join(".bashrc"), ShellDialect::Bash, Scope::User),
        ShellTarget::new(home.join(".zshrc"), ShellDialect::Zsh, Scope::User),
        ShellTarget::new("/etc/bashrc", ShellDialect::Bash, Scope::System),
        ShellTarget::new("/etc/bash.bashrc", ShellDialect::Bash, Scope::System),
    ]
}

/// Keeps the candidates of `scope` whose file exists according to `exists`.
pub fn select_targets<F>(candidates: &[ShellTarget], scope: Scope, exists: F) -> Vec<ShellTarget>
where
    F: Fn(&Path) -> bool,
{
    candidates
        .iter()
        .filter(|t| t.scope == scope && exists(&t.path))
        .cloned()
        .collect()
}

/// Builds the block of `kind` for `dialect`.
///
/// `script_path` is the completion script the completion block sources.
#[must_use]
pub fn block_spec(kind: BlockKind, dialect: ShellDialect, script_path: &Path) -> BlockSpec {
    match kind {
        BlockKind::Completion => completion_block(dialect, script_path),
        BlockKind::Aliases => aliases_block(),
    }
}

fn completion_block(dialect: ShellDialect, script_path: &Path) -> BlockSpec {
    let raw_path = script_path.to_string_lossy();
    let quoted = shell_words::quote(&raw_path);

    let mut body = Vec::with_capacity(4);
    if dialect == ShellDialect::Zsh {
        body.push(ZSH_BASHCOMPINIT.to_string());
    }
    body.push(format!("if [ -f {quoted} ]; then"));
    body.push(format!("    . {quoted}"));
    body.push("fi".to_string());

    let mut stray_patterns = vec![
        COMPLETION_STRAY.to_string(),
        LEGACY_COMPLETION_BANNER.to_string(),
    ];
    if !raw_path.contains(COMPLETION_STRAY) {
        stray_patterns.push(raw_path.into_owned());
    }

    let (shared_lines, companion_lines) = match dialect {
        ShellDialect::Zsh => (
            vec![ZSH_BASHCOMPINIT.to_string()],
            vec![LEGACY_ZSH_COMMENT.to_string(), ZSH_BASHCOMPINIT.to_string()],
        ),
        ShellDialect::Bash => (Vec::new(), Vec::new()),
    };

    BlockSpec {
        start_marker: BlockKind::Completion.start_marker(),
        end_marker: BlockKind::Completion.end_marker(),
        body,
        stray_patterns,
        shared_lines,
        companion_lines,
    }
}

fn aliases_block() -> BlockSpec {
    let body = ALIASES
        .iter()
        .map(|(name, command)| format!("alias {name}='{command}'"))
        .collect();
    let mut stray_patterns: Vec<String> = ALIASES
        .iter()
        .map(|(name, _)| format!("alias {name}="))
        .collect();
    stray_patterns.push(LEGACY_ALIAS_BANNER.to_string());

    BlockSpec {
        start_marker: BlockKind::Aliases.start_marker(),
        end_marker: BlockKind::Aliases.end_marker(),
        body,
        stray_patterns,
        shared_lines: Vec::new(),
        companion_lines: Vec::new(),
    }
}
