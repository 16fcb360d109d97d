//! Numbered menu shown when `sshgo` runs without a command.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::Path;

use sshgo_core::models::ConnectionRecord;

use super::connect::{LaunchMode, launch};
use crate::error::CliError;
use crate::format::port_label;
use crate::util::{load_settings, open_store_seeded};

/// A parsed menu answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Quit,
    Connection(usize),
}

/// Reads `0`/`q` as quit and `1..=count` as a zero-based index.
fn parse_selection(input: &str, count: usize) -> Option<Selection> {
    match input.trim() {
        "0" | "q" | "Q" => Some(Selection::Quit),
        text => text
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=count).contains(n))
            .map(|n| Selection::Connection(n - 1)),
    }
}

fn format_menu(connections: &[ConnectionRecord]) -> String {
    let name_width = connections
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4);
    let number_width = connections.len().to_string().len();

    let mut output = String::from("Saved connections:\n");
    for (index, conn) in connections.iter().enumerate() {
        let _ = writeln!(
            output,
            "  {:>number_width$}) {:<name_width$}  {:<3}  {}:{}",
            index + 1,
            conn.name,
            conn.protocol.to_string(),
            conn.destination(),
            port_label(conn.port, conn.effective_port())
        );
    }
    let _ = writeln!(output, "  {:>number_width$}) Quit", 0);
    output
}

/// Menu handler; EOF or `0` exits without doing anything.
pub fn cmd_menu(config_path: Option<&Path>) -> Result<(), CliError> {
    let store = open_store_seeded(config_path)?;
    let connections = store.list()?;
    if connections.is_empty() {
        println!("No connections configured. Add one with: sshgo add <name> <host>");
        println!("Store: {}", store.path().display());
        return Ok(());
    }
    let settings = load_settings(&store)?;

    print!("{}", format_menu(&connections));
    let mut input = io::stdin().lock();
    loop {
        print!("Select a connection [1-{}]: ", connections.len());
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        match parse_selection(&line, connections.len()) {
            Some(Selection::Quit) => return Ok(()),
            Some(Selection::Connection(index)) => {
                return launch(&connections[index], &settings, LaunchMode::Foreground);
            }
            None => eprintln!("Invalid selection: {}", line.trim()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sshgo_core::models::Protocol;

    #[test]
    fn selections() {
        assert_eq!(parse_selection("0\n", 3), Some(Selection::Quit));
        assert_eq!(parse_selection(" 2 ", 3), Some(Selection::Connection(1)));
        assert_eq!(parse_selection("4", 3), None);
        assert_eq!(parse_selection("-1", 3), None);
        assert_eq!(parse_selection("web", 3), None);
    }

    #[test]
    fn menu_lists_every_connection() {
        let connections = vec![
            ConnectionRecord::new("web", Protocol::Ssh, "10.0.0.1").with_username("root"),
            ConnectionRecord::new("win", Protocol::Rdp, "10.0.0.2").with_port(3390),
        ];
        let menu = format_menu(&connections);
        assert!(menu.contains("1) web  SSH  root@10.0.0.1:(22)"));
        assert!(menu.contains("2) win  RDP  10.0.0.2:3390"));
        assert!(menu.contains("0) Quit"));
    }
}
