//! # Linework Response
//!
//! An in-memory HTTP response model assembled incrementally from a
//! line-split response stream: status line first, then headers, then the
//! body exactly once.
//!
//! ## Features
//!
//! - **Write-once**: after the body is attached the response is frozen and
//!   further writes are no-ops
//! - **Content-type aware body**: `application/json` bodies are decoded into
//!   [`Body::Structured`], everything else is kept as [`Body::Raw`]
//! - **Case-insensitive headers**: names are stored lowercased, last write wins
//! - **Strict or lenient parsing**: malformed lines are skipped or rejected
//!   depending on [`ParseMode`]
//! - **Limits**: optional caps on header lines and body size
//!
//! ## Quick Start
//!
//! ```rust
//! use linework_response::{ResponseBuilder, Result};
//!
//! fn main() -> Result<()> {
//!     let mut builder = ResponseBuilder::new();
//!     builder.write_header_lines([
//!         "HTTP/1.1 200 OK",
//!         "Content-Type: application/json",
//!         "X-Request-Id: abc123",
//!     ])?;
//!     builder.write_body(r#"{"ok":true}"#, "application/json")?;
//!
//!     let response = builder.into_response().expect("body was written");
//!     assert_eq!(response.status_code(), 200);
//!     assert_eq!(response.header("X-Request-Id"), "abc123");
//!     Ok(())
//! }
//! ```
//!
//! ## Strict Parsing
//!
//! ```rust
//! use linework_response::{ParserConfig, ResponseBuilder, ResponseError};
//!
//! let config = ParserConfig::builder()
//!     .strict()
//!     .max_header_lines(100)
//!     .build();
//!
//! let mut builder = ResponseBuilder::with_config(config);
//! let err = builder.write_header_line("HTTP/1.1 OK").unwrap_err();
//! assert!(matches!(err, ResponseError::MalformedStatusLine(_)));
//! ```

mod body;
mod builder;
mod config;
mod env;
mod error;
mod line;
mod response;

pub use body::{Body, JSON_CONTENT_TYPE};
pub use builder::{ParseState, ResponseBuilder};
pub use config::{ParseMode, ParserConfig, ParserConfigBuilder};
pub use env::{EnvLoader, DEFAULT_PREFIX};
pub use error::{ConfigError, ConfigResult, ResponseError, Result};
pub use line::{parse_header_line, parse_status_line, StatusLine};
pub use response::Response;

// Re-export the JSON value type carried by structured bodies
pub use serde_json::Value;

/// Prelude for common imports.
///
/// ```
/// use linework_response::prelude::*;
/// ```
pub mod prelude {
    pub use crate::body::Body;
    pub use crate::builder::{ParseState, ResponseBuilder};
    pub use crate::config::{ParseMode, ParserConfig, ParserConfigBuilder};
    pub use crate::error::{ConfigError, ResponseError, Result};
    pub use crate::response::Response;
}
