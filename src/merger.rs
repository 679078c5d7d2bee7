use crate::config::Config;
use crate::records_io;
use std::error::Error;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MergeOutcome {
    pub paragraphs_total: usize,
    pub paragraphs_with_trees: usize,
    pub files_skipped: u32,
}

/// Folds every tree shard in the configured range back into the dataset
/// document and writes the merged copy. Each covered paragraph gets its
/// trees joined with newlines as a `tree` field; paragraphs no shard covered
/// end up with an empty one.
pub fn run_merge(config: &Config) -> Result<MergeOutcome, Box<dyn Error>> {
    let mut dataset = records_io::load_dataset(&config.dataset_path())?;
    let mut outcome = MergeOutcome::default();

    for index in config.start_index..=config.end_index {
        let shard_path = config.output_path(index);
        let records = match records_io::load_tree_records(&shard_path) {
            Ok(records) => records,
            Err(e) => {
                warn!("skipping tree shard {}: {}", index, e);
                outcome.files_skipped += 1;
                continue;
            }
        };

        for record in records {
            let sentence = dataset
                .images
                .get_mut(record.imgid as usize)
                .and_then(|image| image.sentences.get_mut(record.paraid as usize));
            match sentence {
                Some(sentence) => sentence.tree = Some(record.tree_list.join("\n")),
                None => warn!(
                    "tree shard {} references unknown paragraph imgid {} paraid {}",
                    index, record.imgid, record.paraid
                ),
            }
        }
    }

    for image in &mut dataset.images {
        for sentence in &mut image.sentences {
            outcome.paragraphs_total += 1;
            if sentence.tree.is_some() {
                outcome.paragraphs_with_trees += 1;
            } else {
                sentence.tree = Some(String::new());
            }
        }
    }

    records_io::save_dataset(&config.merged_path(), &dataset)?;
    info!(
        "merged trees for {} of {} paragraphs",
        outcome.paragraphs_with_trees, outcome.paragraphs_total
    );
    Ok(outcome)
}
