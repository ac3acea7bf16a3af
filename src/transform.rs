//! Transformation entry points.
//!
//! [`transform_record`] is the core operation: one upstream record in, one
//! output item per rendered page out, in page order. [`transform_items`]
//! adapts it to the host engine's calling convention, where the step
//! receives a whole item collection and only the first item matters.

use crate::config::TransformConfig;
use crate::error::PageItemsError;
use crate::model::RawBody;
use crate::output::{Attachment, ItemMetadata, OutputRecord};
use crate::pipeline::{content, decode};
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Transform one upstream record into page items.
///
/// # Errors
/// - [`PageItemsError::MissingField`] — `result`, `result.body` or `images` absent
/// - [`PageItemsError::MalformedPayload`] — string body is not JSON
/// - [`PageItemsError::InvalidPayload`] — body does not have the page-batch shape
/// - [`PageItemsError::UpstreamFailure`] — the function reported an error
/// - [`PageItemsError::InvalidContent`] — `verify_content` is on and a page is not base64
pub fn transform_record(
    record: &Value,
    config: &TransformConfig,
) -> Result<Vec<OutputRecord>, PageItemsError> {
    let result = decode::function_result(record)?;
    // Parsed once; the upstream check reads the same value the decode consumes.
    let body = result.body.map(RawBody::into_value);
    if config.check_upstream_status {
        let decoded = body.as_ref().and_then(|b| b.as_ref().ok());
        decode::check_upstream(result.status(), decoded.map(|v| &**v))?;
    }

    let batch = decode::page_batch(body.transpose()?, config)?;
    info!(
        "Function returned {} images (total_pages = {})",
        batch.images.len(),
        batch.total_pages
    );

    let total_pages = batch.total_pages;
    batch
        .images
        .into_iter()
        .enumerate()
        .map(|(index, entry)| -> Result<OutputRecord, PageItemsError> {
            let mime_type = content::resolve_mime(&entry);
            if config.verify_content {
                content::verify(index, &entry, &mime_type)?;
            }
            Ok(OutputRecord {
                metadata: ItemMetadata {
                    file_name: entry.filename.clone(),
                    total_pages: total_pages.clone(),
                },
                attachment: Attachment {
                    data: entry.content,
                    mime_type,
                    file_name: entry.filename,
                },
                binary_property: config.binary_property.clone(),
            })
        })
        .collect()
}

/// Transform the first item of a host item collection.
///
/// The step is defined over a single upstream record; the engine still
/// passes a collection, so the first item is used and the rest are ignored.
pub fn transform_items(
    items: &[Value],
    config: &TransformConfig,
) -> Result<Vec<OutputRecord>, PageItemsError> {
    let (first, rest) = items.split_first().ok_or(PageItemsError::EmptyInput)?;
    if !rest.is_empty() {
        debug!("Ignoring {} extra input items", rest.len());
    }
    transform_record(first, config)
}

/// Serialise output records as a JSON array of host items.
pub fn to_items_json(records: &[OutputRecord], pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
}

/// Write output records to `path` as a JSON array of host items.
///
/// Uses an atomic write (temp file in the same directory, then rename) so a
/// consumer watching `path` never sees a half-written document.
pub fn write_items(
    path: impl AsRef<Path>,
    records: &[OutputRecord],
    pretty: bool,
) -> Result<(), PageItemsError> {
    let path = path.as_ref();
    let write_failed = |source: std::io::Error| PageItemsError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let json = to_items_json(records, pretty).map_err(|e| write_failed(e.into()))?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_failed)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_failed)?;
    tmp.write_all(json.as_bytes()).map_err(write_failed)?;
    tmp.write_all(b"\n").map_err(write_failed)?;
    tmp.persist(path).map_err(|e| write_failed(e.error))?;

    debug!("Wrote {} items to {}", records.len(), path.display());
    Ok(())
}
