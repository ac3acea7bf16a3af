//! Configuration types for the page-items transformation.
//!
//! All transformation behaviour is controlled through [`TransformConfig`],
//! built via its [`TransformConfigBuilder`]. The defaults reproduce what the
//! workflow step has always done: binary part under `"data"`, upstream
//! failures surfaced as errors, content passed through untouched.

use crate::error::PageItemsError;
use serde::{Deserialize, Serialize};

/// Binary property name the host engine reads attachments from by default.
pub const DEFAULT_BINARY_PROPERTY: &str = "data";

/// Configuration for one transformation.
///
/// # Example
/// ```rust
/// use edgequake_pageitems::{MissingImages, TransformConfig};
///
/// let config = TransformConfig::builder()
///     .binary_property("page")
///     .missing_images(MissingImages::Empty)
///     .verify_content(true)
///     .build()
///     .unwrap();
/// assert_eq!(config.binary_property, "page");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Key of the attachment inside each item's `binary` part. Default: `"data"`.
    pub binary_property: String,

    /// What to do when the body carries no `images` field. Default: [`MissingImages::Error`].
    pub missing_images: MissingImages,

    /// Treat `statusCode >= 400` or an `{"error": …}` body as a failure. Default: true.
    ///
    /// The page-splitting function reports its own failures in-band (status
    /// 400/500 plus an error object in the body) rather than failing the
    /// invocation, so without this check the step would report a confusing
    /// "missing images" error instead of the real cause.
    pub check_upstream_status: bool,

    /// Decode every `content` as base64 and sniff its image signature. Default: false.
    ///
    /// Costs one base64 decode per page. Off by default because the host
    /// engine decodes the attachment itself.
    pub verify_content: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            binary_property: DEFAULT_BINARY_PROPERTY.to_string(),
            missing_images: MissingImages::default(),
            check_upstream_status: true,
            verify_content: false,
        }
    }
}

impl TransformConfig {
    /// Create a new builder for `TransformConfig`.
    pub fn builder() -> TransformConfigBuilder {
        TransformConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`TransformConfig`].
#[derive(Debug)]
pub struct TransformConfigBuilder {
    config: TransformConfig,
}

impl TransformConfigBuilder {
    pub fn binary_property(mut self, name: impl Into<String>) -> Self {
        self.config.binary_property = name.into();
        self
    }

    pub fn missing_images(mut self, policy: MissingImages) -> Self {
        self.config.missing_images = policy;
        self
    }

    pub fn check_upstream_status(mut self, v: bool) -> Self {
        self.config.check_upstream_status = v;
        self
    }

    pub fn verify_content(mut self, v: bool) -> Self {
        self.config.verify_content = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<TransformConfig, PageItemsError> {
        let name = self.config.binary_property.trim();
        if name.is_empty() {
            return Err(PageItemsError::InvalidConfig(
                "binary property name must not be empty".into(),
            ));
        }
        if name.len() != self.config.binary_property.len() {
            return Err(PageItemsError::InvalidConfig(format!(
                "binary property name has surrounding whitespace: {:?}",
                self.config.binary_property
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Policy for a body whose `images` field is absent or `null`.
///
/// A present `images` that is not an array is always an error; this only
/// decides whether "no images at all" means an empty batch or a broken
/// response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingImages {
    /// Fail with [`PageItemsError::MissingField`]. (default)
    #[default]
    Error,
    /// Produce zero items.
    Empty,
}
