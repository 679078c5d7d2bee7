use serde::{Deserialize, Serialize};

/// One paragraph of raw text, as written by the splitter and read by the
/// batch converter. `imgid`/`paraid` locate the paragraph in the dataset.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ParagraphRecord {
    pub imgid: i64,
    pub paraid: i64,
    pub raw: String,
}

/// The converted form of one paragraph: one serialized constituency tree
/// per detected sentence, in sentence order. An empty `tree_list` means the
/// parse was abandoned for this paragraph.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TreeRecord {
    pub imgid: i64,
    pub paraid: i64,
    pub tree_list: Vec<String>,
}
