//! Pipeline stages for turning a function response into page items.
//!
//! Each submodule implements exactly one step.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ decode ──▶ content ──▶ output items
//! (items)   (typed)    (mime/b64)
//! ```
//!
//! 1. [`input`]   — read the host item collection from a file or stdin
//! 2. [`decode`]  — host item → function result → typed page batch
//! 3. [`content`] — resolve MIME types; optionally verify base64 payloads

pub mod content;
pub mod decode;
pub mod input;
