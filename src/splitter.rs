use crate::config::Config;
use crate::records_io;
use crate::types::dataset::Dataset;
use crate::types::records::ParagraphRecord;
use regex::Regex;
use std::error::Error;
use tracing::info;

/// Scrubs raw paragraph text before it ever reaches the parser pipeline:
/// non-ASCII characters are dropped, runs of periods collapse to one, every
/// period gets a trailing space, runs of spaces collapse to one.
pub struct ParagraphCleaner {
    period_runs: Regex,
    space_runs: Regex,
}

impl ParagraphCleaner {
    pub fn new() -> Self {
        ParagraphCleaner {
            period_runs: Regex::new(r"\.+").unwrap(),
            space_runs: Regex::new(r" +").unwrap(),
        }
    }

    pub fn clean(&self, raw: &str) -> String {
        let ascii: String = raw.chars().filter(|c| c.is_ascii()).collect();
        let single_periods = self.period_runs.replace_all(&ascii, ".");
        let spaced = single_periods.replace('.', ". ");
        self.space_runs.replace_all(&spaced, " ").into_owned()
    }
}

impl Default for ParagraphCleaner {
    fn default() -> Self {
        ParagraphCleaner::new()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SplitOutcome {
    pub files_written: u32,
    pub records_total: usize,
}

/// Flattens the dataset into one cleaned ParagraphRecord per sentence, ids
/// taken from the enumeration order of images and sentences.
pub fn flatten_dataset(dataset: &Dataset) -> Vec<ParagraphRecord> {
    let cleaner = ParagraphCleaner::new();
    let mut records = Vec::new();
    for (imgid, image) in dataset.images.iter().enumerate() {
        for (paraid, sentence) in image.sentences.iter().enumerate() {
            records.push(ParagraphRecord {
                imgid: imgid as i64,
                paraid: paraid as i64,
                raw: cleaner.clean(&sentence.raw),
            });
        }
    }
    records
}

/// Reads the dataset document and writes it back out as numbered paragraph
/// shards of at most `records_per_file` records, starting at index 1. Every
/// record lands in exactly one shard, in dataset order.
pub fn run_split(config: &Config) -> Result<SplitOutcome, Box<dyn Error>> {
    let dataset = records_io::load_dataset(&config.dataset_path())?;
    let records = flatten_dataset(&dataset);

    let mut outcome = SplitOutcome {
        files_written: 0,
        records_total: records.len(),
    };
    for (chunk_idx, chunk) in records.chunks(config.records_per_file).enumerate() {
        let index = chunk_idx as u32 + 1;
        records_io::save_paragraph_records(&config.input_path(index), chunk)?;
        outcome.files_written += 1;
    }

    info!(
        "split {} paragraphs into {} files; convert with end_index = {}",
        outcome.records_total, outcome.files_written, outcome.files_written
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::dataset::{ImageEntry, SentenceEntry};

    fn sentence(raw: &str) -> SentenceEntry {
        SentenceEntry {
            raw: raw.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn cleaner_normalizes_periods_and_spaces() {
        let cleaner = ParagraphCleaner::new();
        assert_eq!(cleaner.clean("so..  hot.It"), "so. hot. It");
        assert_eq!(cleaner.clean("A  dog...runs"), "A dog. runs");
    }

    #[test]
    fn cleaner_drops_non_ascii() {
        let cleaner = ParagraphCleaner::new();
        assert_eq!(cleaner.clean("caf\u{e9}."), "caf. ");
    }

    #[test]
    fn flatten_enumerates_image_and_paragraph_ids() {
        let dataset = Dataset {
            images: vec![
                ImageEntry {
                    sentences: vec![sentence("One."), sentence("Two.")],
                    ..Default::default()
                },
                ImageEntry {
                    sentences: vec![sentence("Three.")],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let records = flatten_dataset(&dataset);
        assert_eq!(records.len(), 3);
        assert_eq!((records[0].imgid, records[0].paraid), (0, 0));
        assert_eq!((records[1].imgid, records[1].paraid), (0, 1));
        assert_eq!((records[2].imgid, records[2].paraid), (1, 0));
        assert_eq!(records[2].raw, "Three. ");
    }
}
