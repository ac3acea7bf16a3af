//! Record and body decoding: host item → [`FunctionResult`] → [`PageBatch`].
//!
//! The record envelope is walked by reference; only the body goes through a
//! typed decode. Shape problems surface as [`PageItemsError::InvalidPayload`]
//! with the JSON path of the offending field, never as a panic further down
//! the pipeline.

use crate::config::{MissingImages, TransformConfig};
use crate::error::PageItemsError;
use crate::model::{FailureBody, FunctionResult, PageBatch, RawBody};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use tracing::debug;

/// Path name of the host item itself in error messages.
pub const ROOT_PATH: &str = "item";
const BODY_PATH: &str = "result.body";

/// Locate the upstream record inside a host item and borrow its `result`.
///
/// Host items wrap their payload as `{ "json": { … } }`. The wrapper is only
/// unwrapped when `result` is not already at the top level, so bare records
/// work too.
pub fn function_result(item: &Value) -> Result<FunctionResult<'_>, PageItemsError> {
    let record = match item.get("json") {
        Some(inner) if item.get("result").is_none() => {
            debug!("Unwrapping host item 'json' part");
            inner
        }
        _ => item,
    };
    let record = record
        .as_object()
        .ok_or_else(|| expected_object(ROOT_PATH, record))?;

    let result = match record.get("result") {
        None | Some(Value::Null) => {
            return Err(PageItemsError::MissingField {
                path: "result".into(),
            })
        }
        Some(Value::Object(result)) => result,
        Some(other) => return Err(expected_object("result", other)),
    };

    let body = match result.get("body") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(RawBody::Text(text)),
        Some(value) => Some(RawBody::Structured(value)),
    };

    Ok(FunctionResult {
        status_code: result.get("statusCode"),
        body,
    })
}

/// Fail if the function reported an error instead of a page batch.
///
/// Checks the status first, then an `{"error": …}` body without `images`.
/// `body` is the already-decoded body, if it decoded; an unparsable body
/// under an error status still yields [`PageItemsError::UpstreamFailure`].
pub fn check_upstream(status: Option<u16>, body: Option<&Value>) -> Result<(), PageItemsError> {
    let failure = body.and_then(failure_body);

    match (status, failure) {
        (Some(code), failure) if code >= 400 => Err(PageItemsError::UpstreamFailure {
            status_code: Some(code),
            message: failure
                .as_ref()
                .map(FailureBody::message)
                .unwrap_or_else(|| format!("HTTP {code}")),
            details: failure.as_ref().and_then(FailureBody::details),
        }),
        (status_code, Some(failure)) => Err(PageItemsError::UpstreamFailure {
            status_code,
            message: failure.message(),
            details: failure.details(),
        }),
        _ => Ok(()),
    }
}

/// Decode the body into a [`PageBatch`].
///
/// `body` is the output of [`RawBody::into_value`]: text bodies were parsed
/// there, structured ones are borrowed. Both go through the same typed
/// decode; an owned body is moved, not copied.
pub fn page_batch(
    body: Option<Cow<'_, Value>>,
    config: &TransformConfig,
) -> Result<PageBatch, PageItemsError> {
    let body = body.ok_or_else(|| PageItemsError::MissingField {
        path: BODY_PATH.into(),
    })?;

    check_missing_images(&body, config.missing_images)?;

    let batch: PageBatch = match body {
        Cow::Owned(value) => decode_at(BODY_PATH, value)?,
        Cow::Borrowed(value) => decode_at(BODY_PATH, value)?,
    };
    if !is_scalar(&batch.total_pages) {
        return Err(PageItemsError::InvalidPayload {
            path: format!("{BODY_PATH}.total_pages"),
            message: format!("expected a number or string, got {}", batch.total_pages),
        });
    }
    Ok(batch)
}

fn check_missing_images(body: &Value, policy: MissingImages) -> Result<(), PageItemsError> {
    let Some(obj) = body.as_object() else {
        // Non-object bodies are reported by the typed decode.
        return Ok(());
    };
    if obj.get("images").is_some_and(|v| !v.is_null()) {
        return Ok(());
    }
    match policy {
        MissingImages::Error => Err(PageItemsError::MissingField {
            path: format!("{BODY_PATH}.images"),
        }),
        MissingImages::Empty => {
            debug!("Body has no images; treating as an empty batch");
            Ok(())
        }
    }
}

fn failure_body(body: &Value) -> Option<FailureBody> {
    if body.get("images").is_some() {
        return None;
    }
    FailureBody::deserialize(body).ok()
}

fn decode_at<'de, D, T>(prefix: &str, de: D) -> Result<T, PageItemsError>
where
    D: serde::Deserializer<'de, Error = serde_json::Error>,
    T: DeserializeOwned,
{
    serde_path_to_error::deserialize(de).map_err(|e| PageItemsError::invalid_payload(prefix, e))
}

fn expected_object(path: &str, found: &Value) -> PageItemsError {
    let kind = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    PageItemsError::InvalidPayload {
        path: path.to_string(),
        message: format!("expected an object, got {kind}"),
    }
}

fn is_scalar(v: &Value) -> bool {
    matches!(v, Value::Number(_) | Value::String(_) | Value::Bool(_))
}
