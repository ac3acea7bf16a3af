//! Attachment content: MIME resolution and optional base64/signature checks.
//!
//! The page-splitting function always emits `image/jpeg`, but older
//! deployments and hand-built fixtures sometimes omit `content_type`. The
//! filename extension is the next best source; anything unknown becomes
//! `application/octet-stream` so the host engine still accepts the item.

use crate::error::PageItemsError;
use crate::model::ImageEntry;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, warn};

/// MIME type for an entry: the declared type verbatim, or a guess from the
/// filename when none (or only whitespace) is declared.
pub fn resolve_mime(entry: &ImageEntry) -> String {
    match entry.content_type.as_deref() {
        Some(declared) if !declared.trim().is_empty() => declared.to_string(),
        _ => {
            let guessed = mime_guess::from_path(&entry.filename).first_or_octet_stream();
            debug!(
                "No content_type for '{}', guessed {}",
                entry.filename, guessed
            );
            guessed.essence_str().to_string()
        }
    }
}

/// Check that `content` is standard base64 and, when the bytes carry a known
/// image signature, that it agrees with `mime_type`.
///
/// A signature mismatch is logged, not rejected: the host engine trusts the
/// declared type and the bytes are still delivered intact.
pub fn verify(index: usize, entry: &ImageEntry, mime_type: &str) -> Result<(), PageItemsError> {
    let bytes = STANDARD
        .decode(entry.content.as_bytes())
        .map_err(|e| PageItemsError::InvalidContent {
            index,
            filename: entry.filename.clone(),
            detail: e.to_string(),
        })?;

    match image::guess_format(&bytes) {
        Ok(format) => {
            let sniffed = format.to_mime_type();
            if !sniffed.eq_ignore_ascii_case(mime_type) {
                warn!(
                    "Image {} ('{}') declared as {} but content looks like {}",
                    index, entry.filename, mime_type, sniffed
                );
            }
        }
        Err(_) => debug!(
            "Image {} ('{}'): {} bytes, no known image signature",
            index,
            entry.filename,
            bytes.len()
        ),
    }
    Ok(())
}
