//! Line codec for the pipe-delimited store format
//!
//! `name|protocol|host|port|username|secret|extra_params`
//!
//! Field values are taken literally: no surrounding whitespace is trimmed,
//! only the line terminator.

use crate::error::{RecordError, RecordResult};
use crate::models::{ConnectionRecord, Protocol, Secret};

/// Field separator
pub const FIELD_DELIMITER: char = '|';

/// Number of fields on every record line
pub const FIELD_COUNT: usize = 7;

/// Prefix that marks a comment line
pub const COMMENT_PREFIX: char = '#';

/// A decoded store line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `#`-prefixed comment (text without the line terminator)
    Comment(String),
    /// Empty or whitespace-only line
    Blank,
    /// A connection record
    Record(ConnectionRecord),
}

/// Strips a trailing `\n` or `\r\n`, nothing else.
fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Decodes one line of the store.
///
/// # Errors
///
/// Returns [`RecordError::FieldCount`] when a non-comment, non-blank line
/// does not have exactly seven fields, [`RecordError::InvalidPort`] for a
/// non-numeric or out-of-range port and [`RecordError::EmptyName`] when
/// the key field is blank.
pub fn decode(line: &str) -> RecordResult<Line> {
    let line = strip_terminator(line);

    if line.trim().is_empty() {
        return Ok(Line::Blank);
    }
    if line.trim_start().starts_with(COMMENT_PREFIX) {
        return Ok(Line::Comment(line.to_string()));
    }

    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(RecordError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let name = fields[0];
    if name.trim().is_empty() {
        return Err(RecordError::EmptyName);
    }

    Ok(Line::Record(ConnectionRecord {
        name: name.to_string(),
        protocol: Protocol::from_token(fields[1]),
        host: fields[2].to_string(),
        port: parse_port(fields[3])?,
        username: fields[4].to_string(),
        secret: Secret::new(fields[5]),
        extra_params: fields[6].to_string(),
    }))
}

fn parse_port(token: &str) -> RecordResult<Option<u16>> {
    if token.is_empty() {
        return Ok(None);
    }
    match token.parse::<u16>() {
        Ok(0) | Err(_) => Err(RecordError::InvalidPort(token.to_string())),
        Ok(port) => Ok(Some(port)),
    }
}

/// Encodes a record as a single line without terminator.
///
/// Empty fields stay as empty tokens so every line has exactly six
/// delimiters.
#[must_use]
pub fn encode(record: &ConnectionRecord) -> String {
    let port = record.port.map(|p| p.to_string()).unwrap_or_default();
    [
        record.name.as_str(),
        record.protocol.as_str(),
        record.host.as_str(),
        port.as_str(),
        record.username.as_str(),
        record.secret.expose(),
        record.extra_params.as_str(),
    ]
    .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_record() {
        let line = decode("s1|ssh|h|22|u|p|-A\n").unwrap();
        let Line::Record(rec) = line else {
            panic!("expected a record");
        };
        assert_eq!(rec.name, "s1");
        assert_eq!(rec.protocol, Protocol::Ssh);
        assert_eq!(rec.host, "h");
        assert_eq!(rec.port, Some(22));
        assert_eq!(rec.username, "u");
        assert_eq!(rec.secret.expose(), "p");
        assert_eq!(rec.extra_params, "-A");
    }

    #[test]
    fn empty_port_stays_empty() {
        let Line::Record(rec) = decode("s1|ssh|10.0.0.1||root||").unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(rec.port, None);
        assert_eq!(rec.effective_port(), Some(22));
        assert_eq!(encode(&rec), "s1|ssh|10.0.0.1||root||");
    }

    #[test]
    fn field_values_are_not_trimmed() {
        let Line::Record(rec) = decode("s1|ssh| h |22| u | p w |").unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(rec.host, " h ");
        assert_eq!(rec.username, " u ");
        assert_eq!(rec.secret.expose(), " p w ");
    }

    #[test]
    fn crlf_terminator_is_stripped() {
        let Line::Record(rec) = decode("s1|rdp|h|3389|Administrator|pw|\r\n").unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(rec.extra_params, "");
        assert_eq!(rec.protocol, Protocol::Rdp);
    }

    #[test]
    fn comments_and_blanks() {
        assert_eq!(
            decode("# hello\n").unwrap(),
            Line::Comment("# hello".to_string())
        );
        assert_eq!(
            decode("   # indented").unwrap(),
            Line::Comment("   # indented".to_string())
        );
        assert_eq!(decode("").unwrap(), Line::Blank);
        assert_eq!(decode("  \t\n").unwrap(), Line::Blank);
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        assert_eq!(
            decode("s1|ssh|h|22|u|p"),
            Err(RecordError::FieldCount {
                expected: 7,
                found: 6
            })
        );
        assert_eq!(
            decode("s1|ssh|h|22|u|p|x|y"),
            Err(RecordError::FieldCount {
                expected: 7,
                found: 8
            })
        );
        assert!(decode("just some text").is_err());
    }

    #[test]
    fn bad_port_is_malformed() {
        assert_eq!(
            decode("s1|ssh|h|abc|u||"),
            Err(RecordError::InvalidPort("abc".into()))
        );
        assert_eq!(
            decode("s1|ssh|h|0|u||"),
            Err(RecordError::InvalidPort("0".into()))
        );
        assert_eq!(
            decode("s1|ssh|h|70000|u||"),
            Err(RecordError::InvalidPort("70000".into()))
        );
    }

    #[test]
    fn empty_name_is_malformed() {
        assert_eq!(decode("|ssh|h|22|u||"), Err(RecordError::EmptyName));
    }

    #[test]
    fn unknown_protocol_is_preserved() {
        let Line::Record(rec) = decode("k|vnc|h|5900|||").unwrap() else {
            panic!("expected a record");
        };
        assert_eq!(rec.protocol, Protocol::Other("vnc".into()));
        assert_eq!(encode(&rec), "k|vnc|h|5900|||");
    }

    #[test]
    fn encode_keeps_empty_trailing_fields() {
        let rec = ConnectionRecord::new("s1", Protocol::Ssh, "h");
        let line = encode(&rec);
        assert_eq!(line, "s1|ssh|h||||");
        assert_eq!(line.matches('|').count(), FIELD_COUNT - 1);
    }
}
