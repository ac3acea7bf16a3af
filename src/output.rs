//! Output items in the host engine's `{ json, binary }` convention.

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use serde_json::Value;

/// One workflow item per rendered page.
///
/// Serialises as:
///
/// ```text
/// { "json":   { "fileName": "page_1.jpg", "totalPages": 3 },
///   "binary": { "<binary_property>": { "data": "…", "mimeType": "image/jpeg",
///                                      "fileName": "page_1.jpg" } } }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub metadata: ItemMetadata,
    pub attachment: Attachment,
    /// Key the attachment is stored under in `binary`.
    pub binary_property: String,
}

/// The `json` part of an item.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    pub file_name: String,
    pub total_pages: Value,
}

/// Binary content plus its mime type and filename.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Base64 payload, passed through as received.
    pub data: String,
    pub mime_type: String,
    pub file_name: String,
}

impl OutputRecord {
    /// Serialise into a `serde_json::Value` host item.
    pub fn to_item(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut item = serializer.serialize_struct("OutputRecord", 2)?;
        item.serialize_field("json", &self.metadata)?;
        item.serialize_field(
            "binary",
            &BinaryPart {
                key: &self.binary_property,
                attachment: &self.attachment,
            },
        )?;
        item.end()
    }
}

struct BinaryPart<'a> {
    key: &'a str,
    attachment: &'a Attachment,
}

impl Serialize for BinaryPart<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, self.attachment)?;
        map.end()
    }
}
