//! Write-once response builder.

use crate::line::{parse_header_line, parse_status_line};
use crate::{Body, ParserConfig, Response, ResponseError, Result};
use std::collections::HashMap;

/// Where the builder is in the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseState {
    /// Nothing fed yet; the next line is the status line.
    #[default]
    AwaitingStatusLine,
    /// Status line consumed; header lines or the body come next.
    AwaitingHeadersOrBody,
    /// Body written; the response is frozen.
    Complete,
}

/// Incremental HTTP response builder.
///
/// Fed the status line, then each header line, then the body exactly once.
/// After a successful [`write_body`](Self::write_body) every write is a no-op
/// returning `Ok(false)`.
///
/// ```
/// use linework_response::{Body, ResponseBuilder};
/// use serde_json::json;
///
/// let mut builder = ResponseBuilder::new();
/// builder.write_header_line("HTTP/1.1 200 OK")?;
/// builder.write_header_line("X-Request-Id: abc123")?;
/// builder.write_body(r#"{"ok":true}"#, "application/json")?;
///
/// let response = builder.into_response().unwrap();
/// assert_eq!(response.status_code(), 200);
/// assert_eq!(response.header("x-request-id"), "abc123");
/// assert_eq!(response.body(), &Body::Structured(json!({"ok": true})));
/// # Ok::<(), linework_response::ResponseError>(())
/// ```
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    config: ParserConfig,
    state: ParseState,
    status_code: u16,
    headers: HashMap<String, String>,
    header_line_count: usize,
    completed: Option<Response>,
}

impl ResponseBuilder {
    /// Create a builder with the default lenient configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with the given configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == ParseState::Complete
    }

    /// Feed one line of the response head.
    ///
    /// The first line is parsed as the status line, every later line as a
    /// `Name: value` header. Returns `Ok(true)` when the line was recognized
    /// and stored, `Ok(false)` when it was skipped or the response is
    /// already complete. Malformed lines are errors only in strict mode.
    pub fn write_header_line(&mut self, line: &str) -> Result<bool> {
        if self.is_complete() {
            return Ok(false);
        }

        if let Some(limit) = self.config.max_header_lines {
            let count = self.header_line_count + 1;
            if count > limit {
                return Err(ResponseError::TooManyHeaders { count, limit });
            }
        }

        self.header_line_count += 1;

        match self.state {
            ParseState::AwaitingStatusLine => {
                self.state = ParseState::AwaitingHeadersOrBody;
                self.apply_status_line(line)
            }
            ParseState::AwaitingHeadersOrBody => self.apply_header_line(line),
            ParseState::Complete => Ok(false),
        }
    }

    /// Feed several lines in order. Returns how many were applied.
    pub fn write_header_lines<I, S>(&mut self, lines: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut applied = 0;
        for line in lines {
            if self.write_header_line(line.as_ref())? {
                applied += 1;
            }
        }
        Ok(applied)
    }

    fn apply_status_line(&mut self, line: &str) -> Result<bool> {
        match parse_status_line(line) {
            Some(status) => {
                tracing::debug!(
                    version = %status.version,
                    status = status.code,
                    reason = %status.reason,
                    "Parsed status line"
                );
                self.status_code = status.code;
                Ok(true)
            }
            None if self.config.is_strict() => {
                Err(ResponseError::MalformedStatusLine(line.trim_ascii().to_string()))
            }
            None => {
                tracing::warn!(line = %line.trim_ascii(), "Malformed status line, status code left at 0");
                self.status_code = 0;
                Ok(false)
            }
        }
    }

    fn apply_header_line(&mut self, line: &str) -> Result<bool> {
        match parse_header_line(line) {
            Some((name, value)) => {
                tracing::trace!(name = %name, value = %value, "Stored header");
                self.headers.insert(name, value);
                Ok(true)
            }
            None if self.config.is_strict() => {
                Err(ResponseError::MalformedHeaderLine(line.trim_ascii().to_string()))
            }
            None => {
                tracing::warn!(line = %line.trim_ascii(), "Skipping malformed header line");
                Ok(false)
            }
        }
    }

    /// Attach the body and freeze the response.
    ///
    /// Fails with [`ResponseError::UnexpectedStatusCode`] when no status code
    /// was recorded, and with [`ResponseError::MalformedJsonBody`] when
    /// `content_type` is exactly `application/json` but the payload is not a
    /// JSON object or array. On failure the builder stays incomplete.
    pub fn write_body(&mut self, body: &str, content_type: &str) -> Result<bool> {
        if self.is_complete() {
            return Ok(false);
        }

        if self.status_code == 0 {
            return Err(ResponseError::UnexpectedStatusCode(self.status_code));
        }

        if let Some(limit) = self.config.max_body_size {
            if body.len() > limit {
                return Err(ResponseError::BodyTooLarge {
                    size: body.len(),
                    limit,
                });
            }
        }

        let body = Body::decode(body, content_type)?;

        tracing::debug!(
            status = self.status_code,
            content_type = %content_type,
            structured = body.is_structured(),
            headers = self.headers.len(),
            "Response complete"
        );

        self.completed = Some(Response {
            status_code: self.status_code,
            headers: std::mem::take(&mut self.headers),
            header_line_count: self.header_line_count,
            content_type: content_type.to_string(),
            body,
        });
        self.state = ParseState::Complete;
        Ok(true)
    }

    /// Current status code; 0 until a status line was parsed.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Number of lines fed so far, status line included.
    pub fn header_line_count(&self) -> usize {
        self.header_line_count
    }

    /// Get a header value (case-insensitive). Returns `""` when absent.
    pub fn header(&self, name: &str) -> &str {
        self.headers()
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Headers stored so far, keyed by lowercased name.
    pub fn headers(&self) -> &HashMap<String, String> {
        match &self.completed {
            Some(response) => &response.headers,
            None => &self.headers,
        }
    }

    /// Content type, set once the body is written.
    pub fn content_type(&self) -> Option<&str> {
        self.completed.as_ref().map(|r| r.content_type.as_str())
    }

    /// Body, set once the response is complete.
    pub fn body(&self) -> Option<&Body> {
        self.completed.as_ref().map(|r| &r.body)
    }

    /// The frozen response, once complete.
    pub fn response(&self) -> Option<&Response> {
        self.completed.as_ref()
    }

    /// Consume the builder, returning the response if it is complete.
    pub fn into_response(self) -> Option<Response> {
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_status(line: &str) -> ResponseBuilder {
        let mut builder = ResponseBuilder::new();
        builder.write_header_line(line).unwrap();
        builder
    }

    #[test]
    fn test_initial_state() {
        let builder = ResponseBuilder::new();
        assert_eq!(builder.state(), ParseState::AwaitingStatusLine);
        assert_eq!(builder.status_code(), 0);
        assert_eq!(builder.header_line_count(), 0);
        assert!(builder.content_type().is_none());
        assert!(builder.body().is_none());
        assert!(builder.response().is_none());
    }

    #[test]
    fn test_status_line_sets_code() {
        let builder = with_status("HTTP/1.1 201 Created");
        assert_eq!(builder.status_code(), 201);
        assert_eq!(builder.state(), ParseState::AwaitingHeadersOrBody);
        assert_eq!(builder.header_line_count(), 1);
    }

    #[test]
    fn test_headers_case_insensitive_and_trimmed() {
        let mut builder = with_status("HTTP/1.1 200 OK");
        assert!(builder.write_header_line("  X-Request-ID:   abc123  ").unwrap());
        assert_eq!(builder.header("x-request-id"), "abc123");
        assert_eq!(builder.header("X-REQUEST-ID"), "abc123");
        assert_eq!(builder.header("missing"), "");
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let mut builder = with_status("HTTP/1.1 200 OK");
        builder.write_header_line("Set-Cookie: a=1").unwrap();
        builder.write_header_line("set-cookie: b=2").unwrap();
        assert_eq!(builder.header("Set-Cookie"), "b=2");
        assert_eq!(builder.headers().len(), 1);
    }

    #[test]
    fn test_lenient_skips_malformed_header() {
        let mut builder = with_status("HTTP/1.1 200 OK");
        assert!(!builder.write_header_line("garbage line").unwrap());
        assert!(builder.headers().is_empty());
        assert_eq!(builder.header_line_count(), 2);
    }

    #[test]
    fn test_lenient_malformed_status_defaults_to_zero() {
        let mut builder = ResponseBuilder::new();
        assert!(!builder.write_header_line("HTTP/1.1 OK").unwrap());
        assert_eq!(builder.status_code(), 0);
        assert_eq!(builder.state(), ParseState::AwaitingHeadersOrBody);

        // the second line is a header, never a retry of the status line
        assert!(builder.write_header_line("HTTP/1.1 200 OK").is_ok());
        assert_eq!(builder.status_code(), 0);

        assert_eq!(
            builder.write_body("hi", "text/plain"),
            Err(ResponseError::UnexpectedStatusCode(0))
        );
    }

    #[test]
    fn test_strict_rejects_malformed_lines() {
        let mut builder = ResponseBuilder::with_config(ParserConfig::strict());
        assert!(matches!(
            builder.write_header_line("HTTP/1.1"),
            Err(ResponseError::MalformedStatusLine(_))
        ));
        assert_eq!(builder.header_line_count(), 1);

        let mut builder = ResponseBuilder::with_config(ParserConfig::strict());
        assert!(builder.config().is_strict());
        builder.write_header_line("HTTP/1.1 200 OK").unwrap();
        assert_eq!(
            builder.write_header_line("X-Token:abc"),
            Err(ResponseError::MalformedHeaderLine("X-Token:abc".to_string()))
        );
        assert!(builder.write_header_line("X-Token: abc").unwrap());
    }

    #[test]
    fn test_zero_status_code_is_malformed() {
        let mut builder = ResponseBuilder::with_config(ParserConfig::strict());
        assert_eq!(
            builder.write_header_line("HTTP/1.1 000 OK"),
            Err(ResponseError::MalformedStatusLine("HTTP/1.1 000 OK".to_string()))
        );
        assert_eq!(builder.status_code(), 0);

        let mut builder = ResponseBuilder::new();
        assert!(!builder.write_header_line("HTTP/1.1 000 OK").unwrap());
        assert_eq!(
            builder.write_body("hi", "text/plain"),
            Err(ResponseError::UnexpectedStatusCode(0))
        );
    }

    #[test]
    fn test_body_before_status_line() {
        let mut builder = ResponseBuilder::new();
        assert_eq!(
            builder.write_body("{}", "application/json"),
            Err(ResponseError::UnexpectedStatusCode(0))
        );
        assert!(!builder.is_complete());
    }

    #[test]
    fn test_json_body() {
        let mut builder = with_status("HTTP/1.1 200 OK");
        assert!(builder.write_body(r#"{"a":1}"#, "application/json").unwrap());
        assert!(builder.is_complete());
        assert_eq!(builder.content_type(), Some("application/json"));
        assert_eq!(builder.body(), Some(&Body::Structured(json!({"a": 1}))));
    }

    #[test]
    fn test_malformed_json_leaves_builder_open() {
        let mut builder = with_status("HTTP/1.1 200 OK");
        assert_eq!(
            builder.write_body(r#""just a string""#, "application/json"),
            Err(ResponseError::MalformedJsonBody)
        );
        assert_eq!(
            builder.write_body("{bad", "application/json"),
            Err(ResponseError::MalformedJsonBody)
        );
        assert!(!builder.is_complete());
        assert!(builder.content_type().is_none());

        // a later valid write still succeeds
        assert!(builder.write_body("[]", "application/json").unwrap());
    }

    #[test]
    fn test_raw_body() {
        let mut builder = with_status("HTTP/1.1 200 OK");
        assert!(builder.write_body("  hello\n", "text/plain").unwrap());
        assert_eq!(builder.body().and_then(Body::as_raw), Some("  hello\n"));
    }

    #[test]
    fn test_complete_is_frozen() {
        let mut builder = with_status("HTTP/1.1 200 OK");
        builder.write_header_line("X-A: 1").unwrap();
        builder.write_body("first", "text/plain").unwrap();

        assert!(!builder.write_header_line("X-A: 2").unwrap());
        assert!(!builder.write_header_line("X-B: 3").unwrap());
        assert!(!builder.write_body("second", "text/html").unwrap());

        assert_eq!(builder.header("x-a"), "1");
        assert_eq!(builder.header("x-b"), "");
        assert_eq!(builder.header_line_count(), 2);
        assert_eq!(builder.content_type(), Some("text/plain"));
        assert_eq!(builder.body().and_then(Body::as_raw), Some("first"));
    }

    #[test]
    fn test_header_limit() {
        let config = ParserConfig::builder().max_header_lines(2).build();
        let mut builder = ResponseBuilder::with_config(config);
        builder.write_header_line("HTTP/1.1 200 OK").unwrap();
        builder.write_header_line("X-A: 1").unwrap();

        assert_eq!(
            builder.write_header_line("X-B: 2"),
            Err(ResponseError::TooManyHeaders { count: 3, limit: 2 })
        );
        assert_eq!(builder.header_line_count(), 2);
        assert_eq!(builder.header("x-b"), "");
    }

    #[test]
    fn test_body_limit() {
        let config = ParserConfig::builder().max_body_size(4).build();
        let mut builder = ResponseBuilder::with_config(config);
        builder.write_header_line("HTTP/1.1 200 OK").unwrap();

        assert_eq!(
            builder.write_body("too long", "text/plain"),
            Err(ResponseError::BodyTooLarge { size: 8, limit: 4 })
        );
        assert!(builder.write_body("ok", "text/plain").unwrap());
    }

    #[test]
    fn test_write_header_lines() {
        let mut builder = ResponseBuilder::new();
        let applied = builder
            .write_header_lines(["HTTP/1.1 204 No Content", "X-A: 1", "broken", "X-B: 2"])
            .unwrap();
        assert_eq!(applied, 3);
        assert_eq!(builder.header_line_count(), 4);
    }

    #[test]
    fn test_into_response() {
        let mut builder = with_status("HTTP/1.1 404 Not Found");
        builder.write_header_line("Content-Length: 9").unwrap();
        assert!(builder.response().is_none());
        builder.write_body("not found", "text/plain").unwrap();

        let response = builder.into_response().unwrap();
        assert!(response.is_client_error());
        assert_eq!(response.content_length(), Some(9));
        assert_eq!(response.header_line_count(), 2);
        assert_eq!(response.text(), "not found");
    }
}
