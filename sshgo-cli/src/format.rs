//! Output formatting helpers.

/// Quotes a CSV field when it contains a comma, quote or line break.
pub fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Port column text: the stored port, or the protocol default in
/// parentheses, or `-`.
pub fn port_label(port: Option<u16>, effective: Option<u16>) -> String {
    match (port, effective) {
        (Some(port), _) => port.to_string(),
        (None, Some(default)) => format!("({default})"),
        (None, None) => "-".to_string(),
    }
}
