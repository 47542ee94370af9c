//! Prints the batch payloads a write would send, one JSON document per line.
//!
//! ```text
//! batch-plan records.json --action updateObject --batch-size 500
//! cat records.json | batch-plan - --action addObject
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tracing::{error, info};

use searchindex_client::batch::{map_object_ids, split_into_batches};
use searchindex_client::config::BATCH_SIZE_ENV;
use searchindex_client::{logging, Action, IndexingConfig};

#[derive(Debug, Parser)]
#[command(
    name = "batch-plan",
    version,
    about = "Split a JSON array of records into batch write payloads."
)]
struct Cli {
    /// JSON file holding an array of records, or `-` for stdin.
    input: PathBuf,

    /// Batch action wire value (e.g. addObject, updateObject, deleteObject).
    #[arg(long, default_value = "updateObject")]
    action: Action,

    /// Records per batch (default: 1000).
    #[arg(long, env = BATCH_SIZE_ENV)]
    batch_size: Option<usize>,

    /// Attribute copied into objectID before batching.
    #[arg(long)]
    object_id_key: Option<String>,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(&cli, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let config = match cli.batch_size {
        Some(size) => IndexingConfig::default().with_batch_size(size)?,
        None => IndexingConfig::default(),
    };

    let raw = if cli.input.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?
    } else {
        std::fs::read_to_string(&cli.input)
            .with_context(|| format!("failed to read {}", cli.input.display()))?
    };
    let records: Vec<Value> =
        serde_json::from_str(&raw).context("input must be a JSON array of records")?;

    let records = match cli.object_id_key.as_deref() {
        Some(key) => map_object_ids(key, records)?,
        None => records,
    };

    let record_count = records.len();
    let batches = split_into_batches(cli.action, records, config.batch_size)?;
    info!(
        action = %cli.action,
        records = record_count,
        batches = batches.len(),
        batch_size = config.batch_size,
        "planned batches"
    );

    for params in &batches {
        serde_json::to_writer(&mut *out, params)?;
        writeln!(out)?;
    }
    Ok(())
}
