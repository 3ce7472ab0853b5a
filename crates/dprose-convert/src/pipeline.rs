//! Conversion pipeline
//!
//! Runs the stages strictly in order:
//!
//! 1. load the metadata table (no output is touched if this fails)
//! 2. transform the record stream into per-record files
//! 3. write `index.json` for the ids seen in stage 2
//!
//! There are no retries and no cleanup: a failed run leaves whatever files
//! were already written and is meant to be re-run after fixing the input.

use crate::config::ConvertConfig;
use crate::index::write_index;
use crate::metadata::MetadataTable;
use crate::progress::create_record_spinner;
use crate::records::RecordTransformer;
use dprose_common::{DproseError, Result};
use tracing::{info, info_span};

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    LoadMetadata,
    TransformRecords,
    WriteIndex,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::LoadMetadata => write!(f, "load-metadata"),
            Stage::TransformRecords => write!(f, "transform-records"),
            Stage::WriteIndex => write!(f, "write-index"),
            Stage::Done => write!(f, "done"),
        }
    }
}

/// Counts reported at the end of a successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub metadata_rows: usize,
    pub records_written: usize,
    pub index_entries: usize,
    /// Metadata rows without any record, left out of the index
    pub unmatched_metadata: usize,
}

impl std::fmt::Display for ConversionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wrote {} records and {} index entries ({} of {} metadata rows had no records)",
            self.records_written, self.index_entries, self.unmatched_metadata, self.metadata_rows
        )
    }
}

/// Run the whole conversion described by `config`
pub fn run(config: &ConvertConfig) -> Result<ConversionSummary> {
    let span = info_span!(
        "convert",
        records = %config.records_file.display(),
        metadata = %config.metadata_file.display(),
        out_dir = %config.out_dir.display(),
    );
    let _entered = span.enter();

    info!(stage = %Stage::LoadMetadata, "Starting stage");
    let table = MetadataTable::load(&config.metadata_file, config.delimiter)?;

    std::fs::create_dir_all(&config.out_dir).map_err(|e| DproseError::io(&config.out_dir, e))?;

    info!(stage = %Stage::TransformRecords, "Starting stage");
    let mut transformer = RecordTransformer::new(&config.out_dir, table.ids());
    let spinner = config
        .show_progress
        .then(|| create_record_spinner("written"));
    if let Some(ref spinner) = spinner {
        transformer = transformer.with_progress(spinner.clone());
    }
    let outcome = transformer.transform_file(&config.records_file);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let outcome = outcome?;

    info!(stage = %Stage::WriteIndex, "Starting stage");
    let index_entries = write_index(&config.out_dir, table.records(), &outcome.seen)?;

    let summary = ConversionSummary {
        metadata_rows: table.len(),
        records_written: outcome.records_written,
        index_entries,
        unmatched_metadata: table.len() - index_entries,
    };
    info!(stage = %Stage::Done, ?summary, "Conversion complete");
    Ok(summary)
}
