use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One paragraph entry inside the dataset document. The merger rewrites the
/// whole document, so fields this tool does not interpret are kept verbatim
/// in `extra`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SentenceEntry {
    #[serde(default)]
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ImageEntry {
    #[serde(default)]
    pub sentences: Vec<SentenceEntry>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The dataset document: a list of images, each with its paragraph
/// sentences. Split reads it, merge reads and rewrites it.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Dataset {
    pub images: Vec<ImageEntry>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
