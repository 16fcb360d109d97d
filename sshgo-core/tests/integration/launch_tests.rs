//! Launch dispatcher over records read from a store

use std::fs;

use sshgo_core::config::Settings;
use sshgo_core::error::LaunchError;
use sshgo_core::models::{ConnectionRecord, Protocol};
use sshgo_core::protocol::{SSHPASS_ENV, build_invocation};
use sshgo_core::store::ConnectionStore;
use tempfile::TempDir;

#[test]
fn ssh_with_secret_uses_password_helper() {
    let record = ConnectionRecord::new("s", Protocol::Ssh, "h")
        .with_port(22)
        .with_username("u")
        .with_secret("pw");
    let launch = Settings::default().launch_settings_with(|_| true);
    let inv = build_invocation(&record, &launch).unwrap();

    assert_eq!(inv.program, "sshpass");
    assert_eq!(inv.args[..2], ["-e", "ssh"]);
    assert_eq!(inv.args[2..], ["-p", "22", "u@h"]);
    assert_eq!(inv.env, vec![(SSHPASS_ENV.to_string(), "pw".to_string())]);
}

#[test]
fn records_from_store_launch_by_protocol() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("connections.conf");
    fs::write(
        &path,
        "web|ssh|10.0.0.5|||| -A\nwin|rdp|10.0.0.6||Administrator|pw|\nold|vnc|h|5900|||\n",
    )
    .unwrap();
    let store = ConnectionStore::new(&path);
    let launch = Settings::default().launch_settings_with(|b| b == "xfreerdp");

    let web = build_invocation(&store.find("web").unwrap(), &launch).unwrap();
    assert_eq!(web.program, "ssh");
    assert_eq!(web.args, vec!["-p", "22", "-A", "10.0.0.5"]);

    let win = build_invocation(&store.find("win").unwrap(), &launch).unwrap();
    assert_eq!(win.program, "xfreerdp");
    assert_eq!(
        win.args,
        vec![
            "/v:10.0.0.6:3389",
            "/u:Administrator",
            "/p:pw",
            "/cert:ignore",
            "/dynamic-resolution"
        ]
    );
    assert_eq!(
        win.display_masked("pw"),
        "xfreerdp /v:10.0.0.6:3389 /u:Administrator /p:**** /cert:ignore /dynamic-resolution"
    );

    let err = build_invocation(&store.find("old").unwrap(), &launch).unwrap_err();
    assert!(matches!(err, LaunchError::UnsupportedProtocol(ref p) if p == "vnc"));
}

#[test]
fn rdp_without_client_fails_cleanly() {
    let record = ConnectionRecord::new("w", Protocol::Rdp, "h");
    let launch = Settings::default().launch_settings_with(|_| false);
    assert!(matches!(
        build_invocation(&record, &launch),
        Err(LaunchError::ClientNotFound(_))
    ));
}
