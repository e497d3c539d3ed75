//! Status line and header line parsing.

/// Parsed HTTP status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Protocol version (HTTP/1.1 etc.)
    pub version: String,
    /// Numeric status code
    pub code: u16,
    /// Reason phrase, possibly empty
    pub reason: String,
}

/// Parse `"<protocol> <code> <reason>"`.
///
/// The line is trimmed and split on ASCII whitespace. Returns `None` when the
/// code token is missing, is not a valid `u16`, or is 0.
pub fn parse_status_line(line: &str) -> Option<StatusLine> {
    let mut tokens = line.trim_ascii().split_ascii_whitespace();
    let version = tokens.next()?;
    let code = tokens.next()?.parse().ok().filter(|&code: &u16| code != 0)?;
    let reason = tokens.collect::<Vec<_>>().join(" ");

    Some(StatusLine {
        version: version.to_string(),
        code,
        reason,
    })
}

/// Parse a `Name: value` header line.
///
/// The name must be letters, digits and hyphens, and the colon must be
/// followed by ASCII whitespace. Splits on the first colon only; returns the
/// lowercased name and the trimmed value.
pub fn parse_header_line(line: &str) -> Option<(String, String)> {
    let line = line.trim_ascii();
    let (name, rest) = line.split_once(':')?;

    if !is_token(name) {
        return None;
    }
    if !rest.starts_with(|c: char| c.is_ascii_whitespace()) {
        return None;
    }

    Some((name.to_ascii_lowercase(), rest.trim_ascii().to_string()))
}

fn is_token(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
