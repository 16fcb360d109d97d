//! Property-based tests for marker block installation
//!
//! - install is idempotent
//! - uninstall after install restores the original content
//! - a second uninstall is a no-op

use std::path::Path;

use proptest::prelude::*;
use sshgo_core::shell::{
    BlockKind, BlockState, ShellDialect, block_spec, detect, install, uninstall,
};

fn arb_dialect() -> impl Strategy<Value = ShellDialect> {
    prop_oneof![Just(ShellDialect::Bash), Just(ShellDialect::Zsh)]
}

fn arb_kind() -> impl Strategy<Value = BlockKind> {
    prop_oneof![Just(BlockKind::Completion), Just(BlockKind::Aliases)]
}

/// rc content made of newline-terminated lines
fn arb_rc_content() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9 =_$'\"/.]{0,30}", 0..15).prop_map(|lines| {
        lines.iter().map(|l| format!("{l}\n")).collect::<String>()
    })
}

const SCRIPT: &str = "/home/u/.bash_completion.d/sshgo-completion.sh";

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_install_is_idempotent(
        content in arb_rc_content(),
        kind in arb_kind(),
        dialect in arb_dialect(),
    ) {
        let spec = block_spec(kind, dialect, Path::new(SCRIPT));
        prop_assume!(detect(&content, &spec) == BlockState::Absent);

        let once = install(&content, &spec).unwrap();
        prop_assert!(once.starts_with(&content));
        prop_assert_eq!(detect(&once, &spec), BlockState::Present);
        prop_assert_eq!(install(&once, &spec), None);
        prop_assert_eq!(once.matches(spec.start_marker.as_str()).count(), 1);
    }

    #[test]
    fn prop_uninstall_restores_content(
        content in arb_rc_content(),
        kind in arb_kind(),
        dialect in arb_dialect(),
    ) {
        let spec = block_spec(kind, dialect, Path::new(SCRIPT));
        prop_assume!(detect(&content, &spec) == BlockState::Absent);

        let installed = install(&content, &spec).unwrap();
        let removed = uninstall(&installed, &spec).unwrap();
        prop_assert_eq!(&removed, &content);
        prop_assert_eq!(uninstall(&removed, &spec), None);
        prop_assert_eq!(detect(&removed, &spec), BlockState::Absent);
    }

    #[test]
    fn prop_blocks_of_different_kinds_coexist(
        content in arb_rc_content(),
        dialect in arb_dialect(),
    ) {
        let completion = block_spec(BlockKind::Completion, dialect, Path::new(SCRIPT));
        let aliases = block_spec(BlockKind::Aliases, dialect, Path::new(SCRIPT));
        prop_assume!(detect(&content, &completion) == BlockState::Absent);
        prop_assume!(detect(&content, &aliases) == BlockState::Absent);

        let both = install(&content, &completion)
            .and_then(|c| install(&c, &aliases))
            .unwrap();
        let without_completion = uninstall(&both, &completion).unwrap();
        prop_assert_eq!(detect(&without_completion, &aliases), BlockState::Present);
        prop_assert_eq!(uninstall(&without_completion, &aliases).unwrap(), content);
    }
}
