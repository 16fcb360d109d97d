//! Connection registry against files on disk

use std::fs;

use sshgo_core::completion::export_names;
use sshgo_core::error::StoreError;
use sshgo_core::models::{ConnectionRecord, Protocol};
use sshgo_core::store::{ConnectionStore, STORE_TEMPLATE};
use tempfile::TempDir;

const TWO_RECORDS: &str = "s1|ssh|h|22|u|p|\ns2|rdp|h2|3389|Administrator|pw|\n";

fn store_with(contents: &str) -> (TempDir, ConnectionStore) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("connections.conf");
    fs::write(&path, contents).unwrap();
    (dir, ConnectionStore::new(path))
}

#[test]
fn add_to_empty_store_keeps_port_empty() {
    let dir = TempDir::new().unwrap();
    let store = ConnectionStore::new(dir.path().join("connections.conf"));

    let record = ConnectionRecord::new("s1", Protocol::Ssh, "10.0.0.1").with_username("root");
    store.add(record).unwrap();

    let records = store.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].port, None);
    assert_eq!(records[0].effective_port(), Some(22));
    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "s1|ssh|10.0.0.1||root||\n"
    );
}

#[test]
fn export_names_in_file_order() {
    let (_dir, store) = store_with(TWO_RECORDS);
    assert_eq!(export_names(&store).unwrap(), vec!["s1", "s2"]);
}

#[test]
fn remove_leaves_other_line_byte_for_byte() {
    let (_dir, store) = store_with(TWO_RECORDS);
    let removed = store.remove("s1").unwrap();
    assert_eq!(removed.name, "s1");
    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "s2|rdp|h2|3389|Administrator|pw|\n"
    );
}

#[test]
fn duplicate_add_fails_and_keeps_size() {
    let (_dir, store) = store_with(TWO_RECORDS);
    let err = store
        .add(ConnectionRecord::new("s2", Protocol::Ssh, "elsewhere"))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateName(ref n) if n == "s2"));
    assert_eq!(store.list().unwrap().len(), 2);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), TWO_RECORDS);
}

#[test]
fn edit_preserves_comments_and_unknown_lines() {
    let original = "\
# my servers
s1|ssh|h|22|u|p|

# windows
s2|rdp|h2|3389|Administrator|pw|
legacy|VNC|h3|5900|||
";
    let (_dir, store) = store_with(original);
    store
        .edit("s2", |r| {
            r.port = Some(3390);
            r.extra_params = "/f".into();
        })
        .unwrap();
    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        original.replace(
            "s2|rdp|h2|3389|Administrator|pw|",
            "s2|rdp|h2|3390|Administrator|pw|/f"
        )
    );
}

#[test]
fn edit_can_rename() {
    let (_dir, store) = store_with(TWO_RECORDS);
    store.edit("s1", |r| r.name = "s1-new".into()).unwrap();
    assert_eq!(store.names().unwrap(), vec!["s1-new", "s2"]);
    assert!(matches!(store.find("s1"), Err(StoreError::NotFound(_))));
}

#[test]
fn missing_targets_are_not_found() {
    let (_dir, store) = store_with(TWO_RECORDS);
    assert!(matches!(store.edit("nope", |_| {}), Err(StoreError::NotFound(_))));
    assert!(matches!(store.remove("nope"), Err(StoreError::NotFound(_))));
    assert_eq!(fs::read_to_string(store.path()).unwrap(), TWO_RECORDS);
}

#[test]
fn malformed_store_reports_line() {
    let (_dir, store) = store_with("# c\ns1|ssh|h|22|u|p|\nbroken|line\n");
    let err = store.list().unwrap_err();
    assert!(matches!(err, StoreError::MalformedRecord { line: 3, .. }));
    assert!(matches!(
        export_names(&store),
        Err(StoreError::MalformedRecord { line: 3, .. })
    ));
}

#[cfg(unix)]
#[test]
fn seeded_store_is_owner_only_and_edits_keep_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let store = ConnectionStore::new(dir.path().join("sshgo/connections.conf"));
    assert!(store.ensure_exists().unwrap());
    let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), STORE_TEMPLATE);

    fs::set_permissions(store.path(), fs::Permissions::from_mode(0o640)).unwrap();
    store
        .add(ConnectionRecord::new("a", Protocol::Ssh, "h"))
        .unwrap();
    let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o640);
    assert!(
        fs::read_to_string(store.path())
            .unwrap()
            .starts_with(STORE_TEMPLATE)
    );
}
