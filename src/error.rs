//! Error types for the edgequake-pageitems library.
//!
//! Every failure of the step is fatal: the host engine either receives the
//! full list of page items or nothing at all. All variants therefore live in
//! a single [`PageItemsError`] returned from each library entry point.
//!
//! Variants that describe a position inside the upstream record carry a
//! dotted JSON path (`result.body.images[2].filename`) so the operator can
//! find the offending field in the function response without a debugger.

use crate::pipeline::decode::ROOT_PATH;
use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the edgequake-pageitems library.
#[derive(Debug, Error)]
pub enum PageItemsError {
    // ── Payload errors ────────────────────────────────────────────────────
    /// The function response body was a string but not valid JSON.
    #[error("Failed to parse Lambda response body: {source}")]
    MalformedPayload {
        #[source]
        source: serde_json::Error,
    },

    /// The item collection handed to the step was empty.
    #[error("No input items: expected at least one upstream record")]
    EmptyInput,

    /// A required field is absent (or `null`).
    #[error("Missing field '{path}' in upstream record")]
    MissingField { path: String },

    /// A field is present but has the wrong shape.
    #[error("Invalid payload at '{path}': {message}")]
    InvalidPayload { path: String, message: String },

    /// The remote function reported a failure instead of a page batch.
    #[error("{}", upstream_failure_message(*status_code, message, details.as_deref()))]
    UpstreamFailure {
        status_code: Option<u16>,
        message: String,
        details: Option<String>,
    },

    /// Image content failed verification.
    #[error("Image {index} ('{filename}') has invalid content: {detail}")]
    InvalidContent {
        index: usize,
        filename: String,
        detail: String,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// The items document could not be read.
    #[error("Failed to read input items from '{}': {source}", path.display())]
    InputReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The items document was read but is not JSON.
    #[error("Input items from '{origin}' are not valid JSON: {source}")]
    InvalidInput {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Output items could not be serialised or written.
    #[error("Failed to write output items to '{}': {source}", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PageItemsError {
    /// Build a [`PageItemsError::InvalidPayload`] from a path-tracking decode
    /// failure, prefixing the path with where the decoded value sits.
    pub(crate) fn invalid_payload(
        prefix: &str,
        err: serde_path_to_error::Error<serde_json::Error>,
    ) -> Self {
        let inner = err.path().to_string();
        let path = match (prefix, inner.as_str()) {
            ("", ".") => ROOT_PATH.to_string(),
            (prefix, ".") => prefix.to_string(),
            ("", _) => inner,
            (prefix, index) if index.starts_with('[') => format!("{prefix}{index}"),
            (prefix, _) => format!("{prefix}.{inner}"),
        };
        PageItemsError::InvalidPayload {
            path,
            message: err.into_inner().to_string(),
        }
    }
}

fn upstream_failure_message(status: Option<u16>, message: &str, details: Option<&str>) -> String {
    let mut out = match status {
        Some(code) => format!("Remote function failed with status {code}: {message}"),
        None => format!("Remote function failed: {message}"),
    };
    if let Some(d) = details {
        out.push_str(" (");
        out.push_str(d);
        out.push(')');
    }
    out
}
