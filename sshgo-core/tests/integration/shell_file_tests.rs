//! Shell block manager against rc files on disk

use std::fs;
use std::path::Path;

use sshgo_core::completion::{render_completion_script, user_script_path, write_completion_script};
use sshgo_core::shell::{
    BackupStatus, BlockKind, BlockState, FileChange, Scope, ShellDialect, backup_path,
    block_spec, detect_file, install_file, select_targets, standard_targets, uninstall_file,
};
use tempfile::TempDir;

const BASHRC: &str = "# ~/.bashrc\nexport EDITOR=vim\n";

#[test]
fn install_over_existing_block_is_byte_identical() {
    let home = TempDir::new().unwrap();
    let rc = home.path().join(".bashrc");
    fs::write(&rc, BASHRC).unwrap();
    let spec = block_spec(
        BlockKind::Completion,
        ShellDialect::Bash,
        &user_script_path(home.path()),
    );

    assert_eq!(install_file(&rc, &spec).unwrap(), FileChange::Updated);
    let before = fs::read(&rc).unwrap();
    assert_eq!(install_file(&rc, &spec).unwrap(), FileChange::Unchanged);
    assert_eq!(fs::read(&rc).unwrap(), before);
}

#[test]
fn full_cycle_on_user_targets() {
    let home = TempDir::new().unwrap();
    let bashrc = home.path().join(".bashrc");
    let zshrc = home.path().join(".zshrc");
    fs::write(&bashrc, BASHRC).unwrap();
    fs::write(&zshrc, "setopt autocd\n").unwrap();

    let script = user_script_path(home.path());
    write_completion_script(&script, "sshgo").unwrap();
    assert_eq!(
        fs::read_to_string(&script).unwrap(),
        render_completion_script("sshgo")
    );

    let targets = select_targets(&standard_targets(home.path()), Scope::User, Path::exists);
    assert_eq!(targets.len(), 2);

    for target in &targets {
        for kind in BlockKind::ALL {
            let spec = block_spec(kind, target.dialect, &script);
            assert_eq!(install_file(&target.path, &spec).unwrap(), FileChange::Updated);
            assert_eq!(
                detect_file(&target.path, &spec).unwrap(),
                Some(BlockState::Present)
            );
        }
    }

    let zsh = fs::read_to_string(&zshrc).unwrap();
    assert_eq!(zsh.matches("bashcompinit && bashcompinit").count(), 1);
    assert!(!fs::read_to_string(&bashrc).unwrap().contains("bashcompinit"));

    for target in &targets {
        for kind in BlockKind::ALL {
            let spec = block_spec(kind, target.dialect, &script);
            let outcome = uninstall_file(&target.path, &spec).unwrap();
            assert_eq!(outcome.change, FileChange::Updated);
            assert!(matches!(outcome.backup, BackupStatus::Written(_)));
            let again = uninstall_file(&target.path, &spec).unwrap();
            assert_eq!(again.change, FileChange::Unchanged);
        }
    }

    assert_eq!(fs::read_to_string(&bashrc).unwrap(), BASHRC);
    assert_eq!(fs::read_to_string(&zshrc).unwrap(), "setopt autocd\n");
    assert!(backup_path(&bashrc).exists());
}

#[test]
fn missing_rc_file_is_left_alone() {
    let home = TempDir::new().unwrap();
    let zshrc = home.path().join(".zshrc");
    let spec = block_spec(BlockKind::Aliases, ShellDialect::Zsh, Path::new("/x"));
    assert_eq!(install_file(&zshrc, &spec).unwrap(), FileChange::Missing);
    assert!(!zshrc.exists());
}

#[test]
fn legacy_install_is_cleaned_up() {
    let home = TempDir::new().unwrap();
    let rc = home.path().join(".zshrc");
    let script = user_script_path(home.path());
    let legacy = format!(
        "\
setopt autocd
if [ -n \"$SSH_AUTH_SOCK\" ]; then
    echo agent
fi

# SSH Connection Manager - Auto-completion
# Enable bash completion compatibility for ZSH
autoload -U +X bashcompinit && bashcompinit
if [ -f {path} ]; then
    source {path}
fi

# SSH Connection Manager alias
alias sshl='sshgo list'
alias sshm='sshgo'
alias sshctl='sshgo'
",
        path = script.display()
    );
    fs::write(&rc, &legacy).unwrap();

    let completion = block_spec(BlockKind::Completion, ShellDialect::Zsh, &script);
    let aliases = block_spec(BlockKind::Aliases, ShellDialect::Zsh, &script);
    assert_eq!(detect_file(&rc, &completion).unwrap(), Some(BlockState::Stray));
    assert_eq!(detect_file(&rc, &aliases).unwrap(), Some(BlockState::Stray));

    uninstall_file(&rc, &completion).unwrap();
    uninstall_file(&rc, &aliases).unwrap();

    let cleaned = fs::read_to_string(&rc).unwrap();
    assert!(cleaned.contains("echo agent\nfi\n"));
    assert!(!cleaned.contains("sshgo"));
    assert!(!cleaned.contains("SSH Connection Manager"));
    assert!(!cleaned.contains("bashcompinit"));
    assert!(!cleaned.contains("Enable bash completion"));
    assert_eq!(detect_file(&rc, &completion).unwrap(), Some(BlockState::Absent));
    assert_eq!(detect_file(&rc, &aliases).unwrap(), Some(BlockState::Absent));

    install_file(&rc, &completion).unwrap();
    let reinstalled = fs::read_to_string(&rc).unwrap();
    assert_eq!(reinstalled.matches("bashcompinit && bashcompinit").count(), 1);
}

#[test]
fn zshrc_with_own_bashcompinit_keeps_a_single_copy() {
    let home = TempDir::new().unwrap();
    let rc = home.path().join(".zshrc");
    let original = "autoload -U +X bashcompinit && bashcompinit\nsetopt autocd\n";
    fs::write(&rc, original).unwrap();
    let spec = block_spec(
        BlockKind::Completion,
        ShellDialect::Zsh,
        &user_script_path(home.path()),
    );

    assert_eq!(install_file(&rc, &spec).unwrap(), FileChange::Updated);
    let installed = fs::read_to_string(&rc).unwrap();
    assert_eq!(installed.matches("bashcompinit && bashcompinit").count(), 1);
    assert_eq!(install_file(&rc, &spec).unwrap(), FileChange::Unchanged);

    uninstall_file(&rc, &spec).unwrap();
    assert_eq!(fs::read_to_string(&rc).unwrap(), original);

    install_file(&rc, &spec).unwrap();
    assert_eq!(fs::read_to_string(&rc).unwrap(), installed);
}

#[test]
fn stray_state_still_installs() {
    let home = TempDir::new().unwrap();
    let rc = home.path().join(".bashrc");
    fs::write(&rc, "alias sshm='ssh -v'\n").unwrap();
    let spec = block_spec(BlockKind::Aliases, ShellDialect::Bash, Path::new("/x"));
    assert_eq!(detect_file(&rc, &spec).unwrap(), Some(BlockState::Stray));
    assert_eq!(install_file(&rc, &spec).unwrap(), FileChange::Updated);
    assert_eq!(detect_file(&rc, &spec).unwrap(), Some(BlockState::Present));
}
