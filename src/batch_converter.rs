use crate::config::Config;
use crate::parsing::sentence_parser::ConstituencyParser;
use crate::records_io;
use crate::types::records::{ParagraphRecord, TreeRecord};
use std::error::Error;
use tracing::{info, warn};

/// Counters for one batch run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchOutcome {
    pub files_converted: u32,
    pub files_skipped: u32,
    pub records_total: usize,
}

/// Converts a single paragraph. Identity fields are copied through no matter
/// what; any parser failure degrades the record to an empty tree list and is
/// logged, never raised. The whole attempt is discarded as a unit, so the
/// tree list is never partially filled.
pub fn convert_record(record: &ParagraphRecord, parser: &dyn ConstituencyParser) -> TreeRecord {
    let mut converted = TreeRecord {
        imgid: record.imgid,
        paraid: record.paraid,
        tree_list: Vec::new(),
    };
    match parser.segment_and_parse(&record.raw) {
        Ok(trees) => converted.tree_list = trees,
        Err(e) => warn!(
            "parse failed for imgid {} paraid {}: {}",
            record.imgid, record.paraid, e
        ),
    }
    converted
}

/// Runs the whole batch: one shard at a time, one record at a time, a single
/// parser instance shared across the run. An unreadable input shard is
/// logged and skipped with no output file for that index; a failed output
/// write propagates and ends the run.
pub fn run_batch(
    config: &Config,
    parser: &dyn ConstituencyParser,
) -> Result<BatchOutcome, Box<dyn Error>> {
    let mut outcome = BatchOutcome::default();

    for index in config.start_index..=config.end_index {
        let input_path = config.input_path(index);
        let records = match records_io::load_paragraph_records(&input_path) {
            Ok(records) => records,
            Err(e) => {
                warn!("skipping shard {}: {}", index, e);
                outcome.files_skipped += 1;
                continue;
            }
        };

        let mut converted = Vec::with_capacity(records.len());
        for record in &records {
            converted.push(convert_record(record, parser));
        }

        records_io::save_tree_records(&config.output_path(index), &converted)?;
        info!("example {} done", index);
        outcome.files_converted += 1;
        outcome.records_total += records.len();
    }

    Ok(outcome)
}
