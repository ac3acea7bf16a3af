//! Typed view of the upstream record produced by the page-splitting function.
//!
//! ```text
//! { "result": { "statusCode": 200,
//!               "body": "{\"images\":[…],\"total_pages\":3}" } }
//! ```
//!
//! `body` arrives either as the JSON-encoded string the function returned or
//! already decoded by the host engine; [`RawBody`] keeps both forms until
//! [`crate::pipeline::decode`] normalises them into a [`PageBatch`]. The
//! record views borrow from the host item: the base64 pages are only copied
//! once, into the output items.

use crate::error::PageItemsError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Response of the remote function invocation, borrowed from the host item.
#[derive(Debug, Clone, Copy)]
pub struct FunctionResult<'a> {
    /// `statusCode` exactly as received. Only read by the upstream check.
    pub status_code: Option<&'a Value>,
    pub body: Option<RawBody<'a>>,
}

impl FunctionResult<'_> {
    /// The status as an HTTP code, if it is an integer or a numeric string
    /// in range. Anything else reads as "no status".
    pub fn status(&self) -> Option<u16> {
        match self.status_code? {
            Value::Number(n) => n.as_u64().and_then(|c| u16::try_from(c).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Body as received: still encoded, or already structured.
#[derive(Debug, Clone, Copy)]
pub enum RawBody<'a> {
    Text(&'a str),
    Structured(&'a Value),
}

impl<'a> RawBody<'a> {
    /// Parse a text body; structured bodies are borrowed as-is.
    pub fn into_value(self) -> Result<Cow<'a, Value>, PageItemsError> {
        match self {
            RawBody::Text(text) => serde_json::from_str(text)
                .map(Cow::Owned)
                .map_err(|source| PageItemsError::MalformedPayload { source }),
            RawBody::Structured(value) => Ok(Cow::Borrowed(value)),
        }
    }
}

/// Decoded body: the rendered pages and the document page count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBatch {
    /// Absent or `null` decodes as empty; the missing-images policy is
    /// applied before decoding.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<ImageEntry>,
    /// Carried through unchanged to every output item.
    pub total_pages: Value,
}

/// One rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub filename: String,
    /// Base64 image bytes.
    pub content: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Error object the function returns in place of a [`PageBatch`].
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FailureBody {
    pub error: Value,
    #[serde(default)]
    pub details: Option<Value>,
}

impl FailureBody {
    pub(crate) fn message(&self) -> String {
        scalar_text(&self.error)
    }

    pub(crate) fn details(&self) -> Option<String> {
        self.details.as_ref().map(scalar_text)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ImageEntry>, D::Error> {
    Ok(Option::<Vec<ImageEntry>>::deserialize(d)?.unwrap_or_default())
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
