pub mod dataset;
pub mod records;

// Re-export the record structs most callers want
pub use dataset::{Dataset, ImageEntry, SentenceEntry};
pub use records::{ParagraphRecord, TreeRecord};
