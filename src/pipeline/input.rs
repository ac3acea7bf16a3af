//! Input resolution: turn a path or stdin into the host item collection.
//!
//! The host engine hands the step an array of items. When the step runs
//! outside the engine, the same array is read from a file or stdin; a single
//! JSON object is accepted as a one-item collection so a raw function
//! response can be piped in directly.

use crate::error::PageItemsError;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where to read items from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSource {
    Stdin,
    File(PathBuf),
}

impl ItemSource {
    /// `-` means stdin; anything else is a file path.
    pub fn parse(input: &str) -> Self {
        if input == "-" {
            ItemSource::Stdin
        } else {
            ItemSource::File(PathBuf::from(input))
        }
    }

    fn origin(&self) -> String {
        match self {
            ItemSource::Stdin => "<stdin>".to_string(),
            ItemSource::File(p) => p.display().to_string(),
        }
    }
}

/// Read the item collection from `source`.
pub fn read_items(source: &ItemSource) -> Result<Vec<Value>, PageItemsError> {
    let text = match source {
        ItemSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| PageItemsError::InputReadFailed {
                    path: PathBuf::from("-"),
                    source: e,
                })?;
            buf
        }
        ItemSource::File(path) => read_file(path)?,
    };
    debug!("Read {} bytes from {}", text.len(), source.origin());
    parse_items(&text, &source.origin())
}

/// Parse an items document: an array of items, or one bare item.
pub fn parse_items(text: &str, origin: &str) -> Result<Vec<Value>, PageItemsError> {
    let doc: Value =
        serde_json::from_str(text).map_err(|source| PageItemsError::InvalidInput {
            origin: origin.to_string(),
            source,
        })?;
    Ok(match doc {
        Value::Array(items) => items,
        single => vec![single],
    })
}

fn read_file(path: &Path) -> Result<String, PageItemsError> {
    std::fs::read_to_string(path).map_err(|e| PageItemsError::InputReadFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
