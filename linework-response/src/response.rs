//! Completed, read-only HTTP response.

use crate::{Body, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// A finished HTTP response.
///
/// Produced by [`ResponseBuilder`](crate::ResponseBuilder) after a successful
/// body write. It has no mutating methods and can be shared across threads
/// for reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub(crate) status_code: u16,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) header_line_count: usize,
    pub(crate) content_type: String,
    pub(crate) body: Body,
}

impl Response {
    /// Get the status code.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Check if the response was successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Check if the response was a redirect (3xx).
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code)
    }

    /// Check if the response was a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Check if the response was a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Check if the response was informational (1xx).
    pub fn is_informational(&self) -> bool {
        (100..200).contains(&self.status_code)
    }

    /// Get a header value (case-insensitive). Returns `""` when absent.
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Get all headers, keyed by lowercased name.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Number of lines fed before the body, status line included.
    pub fn header_line_count(&self) -> usize {
        self.header_line_count
    }

    /// Content type the body was written with.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the content length if the header is present and numeric.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get("content-length")
            .and_then(|v| v.parse().ok())
    }

    /// Get the body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Consume the response and return the body.
    pub fn into_body(self) -> Body {
        self.body
    }

    /// Get the body as text.
    pub fn text(&self) -> String {
        self.body.text()
    }

    /// Deserialize a structured body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        self.body.json()
    }

    /// Consume the response and deserialize a structured body.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        self.body.into_json()
    }
}
