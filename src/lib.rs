//! # edgequake-pageitems
//!
//! Turn the response of a PDF-to-images function into one workflow item per
//! rendered page.
//!
//! The page-splitting function (a Lambda that rasterises each PDF page to
//! JPEG) returns a single response whose body lists every page as a base64
//! image. Workflow engines want the opposite shape: one item per page, with
//! the page metadata in the item's `json` part and the image in its `binary`
//! part. This crate is that fan-out step.
//!
//! ## Pipeline Overview
//!
//! ```text
//! host items
//!  │
//!  ├─ 1. Input    first item → { result: { statusCode, body } }
//!  ├─ 2. Check    statusCode ≥ 400 or {"error": …} → UpstreamFailure
//!  ├─ 3. Decode   body string → JSON → typed PageBatch
//!  ├─ 4. Content  MIME fallback, optional base64 verification
//!  └─ 5. Output   one { json, binary } item per image, in page order
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use edgequake_pageitems::{transform_items, TransformConfig};
//! use serde_json::json;
//!
//! let items = vec![json!({
//!     "result": {
//!         "statusCode": 200,
//!         "body": "{\"images\":[{\"filename\":\"page_1.jpg\",\"content\":\"QQ==\",\"content_type\":\"image/jpeg\"}],\"total_pages\":1}"
//!     }
//! })];
//!
//! let pages = transform_items(&items, &TransformConfig::default()).unwrap();
//! assert_eq!(pages.len(), 1);
//! assert_eq!(pages[0].metadata.file_name, "page_1.jpg");
//! let item = pages[0].to_item().unwrap();
//! assert_eq!(item["binary"]["data"]["mimeType"], "image/jpeg");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pageitems` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod transform;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{MissingImages, TransformConfig, TransformConfigBuilder, DEFAULT_BINARY_PROPERTY};
pub use error::PageItemsError;
pub use model::{FunctionResult, ImageEntry, PageBatch, RawBody};
pub use output::{Attachment, ItemMetadata, OutputRecord};
pub use pipeline::input::{parse_items, read_items, ItemSource};
pub use transform::{to_items_json, transform_items, transform_record, write_items};
