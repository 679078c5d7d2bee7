use clap::{Parser, Subcommand};
use std::error::Error;
use tracing_subscriber::EnvFilter;

use paratree::batch_converter::run_batch;
use paratree::config::load_config_from_file;
use paratree::merger::run_merge;
use paratree::parsing::sentence_parser::CommandParser;
use paratree::splitter::run_split;

#[derive(Parser, Debug)]
#[command(
    name = "paratree",
    version,
    about = "Prepare constituency parse trees for a paragraph dataset"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Split the dataset document into numbered paragraph shards
    Split,
    /// Parse every paragraph shard in the configured range into a tree shard
    Convert {
        /// Override the first shard index
        #[arg(long)]
        start: Option<u32>,
        /// Override the last shard index
        #[arg(long)]
        end: Option<u32>,
    },
    /// Fold the tree shards back into the dataset document
    Merge,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = load_config_from_file(&cli.config)?;

    match cli.command {
        CliCommand::Split => {
            run_split(&config)?;
        }
        CliCommand::Convert { start, end } => {
            if let Some(start) = start {
                config.start_index = start;
            }
            if let Some(end) = end {
                config.end_index = end;
            }
            config.validate()?;

            // One pipeline instance for the whole run.
            let parser = CommandParser::new(&config.parser_command)?;
            run_batch(&config, &parser)?;
        }
        CliCommand::Merge => {
            run_merge(&config)?;
        }
    }

    Ok(())
}
