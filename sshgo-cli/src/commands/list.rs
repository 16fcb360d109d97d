//! List connections command.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use sshgo_core::models::ConnectionRecord;

use crate::cli::ListFormat;
use crate::error::CliError;
use crate::format::{escape_csv_field, port_label};
use crate::util::open_store;

/// List connections command handler
pub fn cmd_list(
    config_path: Option<&Path>,
    format: ListFormat,
    sorted: bool,
    protocol: Option<&str>,
) -> Result<(), CliError> {
    let store = open_store(config_path)?;
    let connections = if sorted {
        store.list_sorted()?
    } else {
        store.list()?
    };

    let filtered: Vec<&ConnectionRecord> = connections
        .iter()
        .filter(|c| protocol.is_none_or(|p| c.protocol.as_str().eq_ignore_ascii_case(p.trim())))
        .collect();

    match format {
        ListFormat::Table => println!("{}", format_table(&filtered)),
        ListFormat::Names => {
            for conn in &filtered {
                println!("{}", conn.name);
            }
        }
        ListFormat::Json => println!("{}", format_json(&filtered)?),
        ListFormat::Csv => println!("{}", format_csv(&filtered)),
    }

    Ok(())
}

/// Format connections as a table string
fn format_table(connections: &[&ConnectionRecord]) -> String {
    if connections.is_empty() {
        return "No connections found.".to_string();
    }

    let ports: Vec<String> = connections
        .iter()
        .map(|c| port_label(c.port, c.effective_port()))
        .collect();

    let name_width = connections
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let host_width = connections
        .iter()
        .map(|c| c.host.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);
    let port_width = ports.iter().map(String::len).max().unwrap_or(4).max(4);
    let protocol_width = 8;

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<name_width$}  {:<protocol_width$}  {:<host_width$}  {:<port_width$}  USER",
        "NAME", "PROTOCOL", "HOST", "PORT"
    );
    let _ = writeln!(
        output,
        "{:-<name_width$}  {:-<protocol_width$}  {:-<host_width$}  {:-<port_width$}  ----",
        "", "", "", ""
    );

    for (conn, port) in connections.iter().zip(&ports) {
        let _ = writeln!(
            output,
            "{:<name_width$}  {:<protocol_width$}  {:<host_width$}  {:<port_width$}  {}",
            conn.name,
            conn.protocol.to_string(),
            conn.host,
            port,
            conn.username
        );
    }

    output.trim_end().to_string()
}

/// Format connections as JSON string
fn format_json(connections: &[&ConnectionRecord]) -> Result<String, CliError> {
    let output: Vec<ConnectionOutput<'_>> = connections.iter().map(|c| (*c).into()).collect();
    serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::Usage(format!("Failed to serialize to JSON: {e}")))
}

/// Format connections as CSV string
fn format_csv(connections: &[&ConnectionRecord]) -> String {
    let mut output = String::from("name,protocol,host,port,username\n");

    for conn in connections {
        let _ = writeln!(
            output,
            "{},{},{},{},{}",
            escape_csv_field(&conn.name),
            conn.protocol.as_str(),
            escape_csv_field(&conn.host),
            conn.effective_port().map(|p| p.to_string()).unwrap_or_default(),
            escape_csv_field(&conn.username)
        );
    }

    output.trim_end().to_string()
}

/// Connection as shown by `list --format json`; never carries the secret
#[derive(Debug, Serialize)]
struct ConnectionOutput<'a> {
    name: &'a str,
    protocol: &'a str,
    host: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "is_blank")]
    username: &'a str,
    has_password: bool,
    #[serde(skip_serializing_if = "is_blank")]
    extra_params: &'a str,
}

fn is_blank(value: &&str) -> bool {
    value.is_empty()
}

impl<'a> From<&'a ConnectionRecord> for ConnectionOutput<'a> {
    fn from(conn: &'a ConnectionRecord) -> Self {
        Self {
            name: &conn.name,
            protocol: conn.protocol.as_str(),
            host: &conn.host,
            port: conn.effective_port(),
            username: &conn.username,
            has_password: !conn.secret.is_empty(),
            extra_params: conn.extra_params.trim(),
        }
    }
}
