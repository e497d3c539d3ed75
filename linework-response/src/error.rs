//! Response and configuration error types.

use thiserror::Error;

/// Result type for response building operations.
pub type Result<T> = std::result::Result<T, ResponseError>;

/// Errors raised while assembling a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// A body was written before any status line was recorded.
    #[error("Request received an unexpected HTTP response code \"{0}\"")]
    UnexpectedStatusCode(u16),

    /// The declared content type was JSON but the payload is not an object or array.
    #[error("Failed to parse JSON response body")]
    MalformedJsonBody,

    /// Status line could not be parsed (strict mode only).
    #[error("Malformed status line: {0}")]
    MalformedStatusLine(String),

    /// Header line does not have the `Name: value` shape (strict mode only).
    #[error("Malformed header line: {0}")]
    MalformedHeaderLine(String),

    /// More lines were fed than the configured limit allows.
    #[error("Too many header lines: {count} > {limit}")]
    TooManyHeaders {
        /// Lines seen including the rejected one.
        count: usize,
        /// Configured limit.
        limit: usize,
    },

    /// Body exceeds the configured size limit.
    #[error("Body too large: {size} > {limit}")]
    BodyTooLarge {
        /// Body size in bytes.
        size: usize,
        /// Configured limit.
        limit: usize,
    },

    /// Typed deserialization of the body failed.
    #[error("JSON error: {0}")]
    Json(String),
}

impl ResponseError {
    /// Check if this error points at the upstream transport rather than the caller.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedStatusCode(_) | Self::MalformedStatusLine(_) | Self::MalformedHeaderLine(_)
        )
    }

    /// Check if this error comes from a configured limit.
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self, Self::TooManyHeaders { .. } | Self::BodyTooLarge { .. })
    }
}

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading parser configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
