use crate::types::dataset::Dataset;
use crate::types::records::{ParagraphRecord, TreeRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, Box<dyn Error>> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open {} file at {:?}: {}", what, path, e))?;
    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader)
        .map_err(|e| format!("Failed to deserialize {} from {:?}: {}", what, path, e))?;
    Ok(value)
}

// Compact output, serialize-then-flush. No cleanup of a half-written file.
fn write_json<T: Serialize>(path: &Path, value: &T, what: &str) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)
        .map_err(|e| format!("Failed to create {} file at {:?}: {}", what, path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)
        .map_err(|e| format!("Failed to serialize {} to {:?}: {}", what, path, e))?;
    writer
        .flush()
        .map_err(|e| format!("Failed to flush {} file at {:?}: {}", what, path, e))?;
    Ok(())
}

/// Loads one paragraph shard (a JSON array of records).
pub fn load_paragraph_records(path: &Path) -> Result<Vec<ParagraphRecord>, Box<dyn Error>> {
    read_json(path, "paragraph shard")
}

pub fn save_paragraph_records(
    path: &Path,
    records: &[ParagraphRecord],
) -> Result<(), Box<dyn Error>> {
    write_json(path, &records, "paragraph shard")
}

/// Loads one tree shard (a JSON array of converted records).
pub fn load_tree_records(path: &Path) -> Result<Vec<TreeRecord>, Box<dyn Error>> {
    read_json(path, "tree shard")
}

pub fn save_tree_records(path: &Path, records: &[TreeRecord]) -> Result<(), Box<dyn Error>> {
    write_json(path, &records, "tree shard")
}

pub fn load_dataset(path: &Path) -> Result<Dataset, Box<dyn Error>> {
    read_json(path, "dataset")
}

pub fn save_dataset(path: &Path, dataset: &Dataset) -> Result<(), Box<dyn Error>> {
    write_json(path, dataset, "dataset")
}
