//! Response body variants.

use crate::{ResponseError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Content type that triggers JSON decoding. Compared exactly.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A response body, shaped by the content type it was written with.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Decoded JSON; always an object or an array.
    Structured(Value),
    /// Raw body string, stored verbatim.
    Raw(String),
}

impl Body {
    /// Decode `raw` according to `content_type`.
    ///
    /// Only an exact `application/json` is decoded. The decoded value must be
    /// an object or array; invalid JSON and top-level scalars both fail with
    /// [`ResponseError::MalformedJsonBody`].
    pub fn decode(raw: &str, content_type: &str) -> Result<Self> {
        if content_type != JSON_CONTENT_TYPE {
            return Ok(Body::Raw(raw.to_string()));
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(value @ (Value::Object(_) | Value::Array(_))) => Ok(Body::Structured(value)),
            _ => Err(ResponseError::MalformedJsonBody),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Body::Structured(_))
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Body::Raw(_))
    }

    /// The decoded JSON value, if this is a structured body.
    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            Body::Structured(value) => Some(value),
            Body::Raw(_) => None,
        }
    }

    /// The raw string, if this is a raw body.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Body::Raw(raw) => Some(raw),
            Body::Structured(_) => None,
        }
    }

    /// Render the body as text. Structured bodies are re-serialized.
    pub fn text(&self) -> String {
        match self {
            Body::Raw(raw) => raw.clone(),
            Body::Structured(value) => value.to_string(),
        }
    }

    /// Deserialize a structured body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Body::Structured(value) => {
                T::deserialize(value).map_err(|e| ResponseError::Json(e.to_string()))
            }
            Body::Raw(_) => Err(ResponseError::Json(
                "body is not structured JSON".to_string(),
            )),
        }
    }

    /// Consume a structured body and deserialize it into `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Body::Structured(value) => {
                serde_json::from_value(value).map_err(|e| ResponseError::Json(e.to_string()))
            }
            Body::Raw(_) => Err(ResponseError::Json(
                "body is not structured JSON".to_string(),
            )),
        }
    }
}
