//! Property-based tests for store rewrites
//!
//! - add never changes existing lines and grows the store by one
//! - edit and remove touch only the targeted record line

use proptest::prelude::*;
use sshgo_core::error::StoreError;
use sshgo_core::models::{ConnectionRecord, Protocol};
use sshgo_core::store::StoreDocument;

#[derive(Debug, Clone)]
enum RawLine {
    Comment(String),
    Blank(String),
    Record,
}

fn arb_raw_line() -> impl Strategy<Value = RawLine> {
    prop_oneof![
        "[ ]{0,3}# [a-zA-Z0-9 |]{0,20}".prop_map(RawLine::Comment),
        "[ \t]{0,3}".prop_map(RawLine::Blank),
        Just(RawLine::Record),
    ]
}

/// Builds store text with uniquely named records `r0`, `r1`, ...
fn render_lines(lines: &[RawLine]) -> (Vec<String>, Vec<String>) {
    let mut text_lines = Vec::new();
    let mut names = Vec::new();
    for line in lines {
        match line {
            RawLine::Comment(text) | RawLine::Blank(text) => text_lines.push(text.clone()),
            RawLine::Record => {
                let name = format!("r{}", names.len());
                text_lines.push(format!("{name}|ssh|host-{name}|22|u|p|-A"));
                names.push(name);
            }
        }
    }
    (text_lines, names)
}

fn join(lines: &[String]) -> String {
    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_parse_render_identity(lines in prop::collection::vec(arb_raw_line(), 0..20)) {
        let (text_lines, names) = render_lines(&lines);
        let text = join(&text_lines);
        let doc = StoreDocument::parse(&text).unwrap();
        prop_assert_eq!(doc.render(), text);
        prop_assert_eq!(doc.names(), names);
    }

    #[test]
    fn prop_remove_excises_only_target(
        lines in prop::collection::vec(arb_raw_line(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let (text_lines, names) = render_lines(&lines);
        prop_assume!(!names.is_empty());
        let target = names[pick.index(names.len())].clone();

        let mut doc = StoreDocument::parse(&join(&text_lines)).unwrap();
        doc.remove(&target).unwrap();

        let expected: Vec<String> = text_lines
            .iter()
            .filter(|l| !l.starts_with(&format!("{target}|")))
            .cloned()
            .collect();
        prop_assert_eq!(doc.render(), join(&expected));
    }

    #[test]
    fn prop_edit_changes_only_target(
        lines in prop::collection::vec(arb_raw_line(), 1..20),
        pick in any::<prop::sample::Index>(),
        new_host in "[a-z]{1,12}",
    ) {
        let (text_lines, names) = render_lines(&lines);
        prop_assume!(!names.is_empty());
        let target = names[pick.index(names.len())].clone();

        let mut doc = StoreDocument::parse(&join(&text_lines)).unwrap();
        doc.update(&target, |r| r.host.clone_from(&new_host)).unwrap();

        let expected: Vec<String> = text_lines
            .iter()
            .map(|l| {
                if l.starts_with(&format!("{target}|")) {
                    format!("{target}|ssh|{new_host}|22|u|p|-A")
                } else {
                    l.clone()
                }
            })
            .collect();
        prop_assert_eq!(doc.render(), join(&expected));
    }

    #[test]
    fn prop_add_is_unique(
        lines in prop::collection::vec(arb_raw_line(), 0..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let (text_lines, names) = render_lines(&lines);
        let text = join(&text_lines);
        let mut doc = StoreDocument::parse(&text).unwrap();
        let before = doc.len();

        if !names.is_empty() {
            let taken = names[pick.index(names.len())].clone();
            let err = doc.insert(ConnectionRecord::new(taken, Protocol::Ssh, "x")).unwrap_err();
            prop_assert!(matches!(err, StoreError::DuplicateName(_)));
            prop_assert_eq!(doc.len(), before);
            prop_assert_eq!(doc.render(), text.clone());
        }

        doc.insert(ConnectionRecord::new("fresh", Protocol::Rdp, "x")).unwrap();
        prop_assert_eq!(doc.len(), before + 1);
        prop_assert!(doc.render().starts_with(&text));
    }
}
