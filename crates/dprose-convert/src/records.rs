//! Record transformation
//!
//! Streams classification records one line at a time. Each record is checked
//! against the metadata ids, stripped of its `dprose_id` field and written to
//! its own file before the next line is read.

use dprose_common::types::{prefixed_id, raw_id_to_string, record_file_name, RAW_ID_FIELD};
use dprose_common::{DproseError, Result};
use indicatif::ProgressBar;
use serde_json::{Map, Value};
use serde_jsonlines::JsonLinesReader;
use std::collections::{BTreeSet, HashSet};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Prefixed ids of every record written during a run
pub type SeenIds = BTreeSet<String>;

/// A record ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedRecord {
    /// Prefixed id, matches a metadata record
    pub id: String,

    /// Raw `dprose_id`, used for the file name
    pub raw_id: String,

    /// Remaining fields in input order
    pub payload: Map<String, Value>,
}

impl TransformedRecord {
    pub fn file_name(&self) -> String {
        record_file_name(&self.raw_id)
    }
}

/// Rewrite a single record.
///
/// Fails if the record has no usable `dprose_id` or if its prefixed id is
/// not in `known_ids`. `line` is only used for error reporting.
pub fn transform_record(
    mut record: Map<String, Value>,
    line: usize,
    known_ids: &HashSet<String>,
) -> Result<TransformedRecord> {
    let raw = record
        .get(RAW_ID_FIELD)
        .ok_or(DproseError::MissingRecordId { line })?;
    let raw_id = raw_id_to_string(raw).ok_or_else(|| DproseError::InvalidRecordId {
        line,
        value: raw.to_string(),
    })?;

    let id = prefixed_id(&raw_id);
    if !known_ids.contains(&id) {
        return Err(DproseError::UnknownId { id, line });
    }

    record.shift_remove(RAW_ID_FIELD);

    Ok(TransformedRecord {
        id,
        raw_id,
        payload: record,
    })
}

/// Result of transforming a record stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOutcome {
    pub seen: SeenIds,

    /// Files written, counting overwrites of a repeated raw id
    pub records_written: usize,
}

/// Writes one output file per input record
pub struct RecordTransformer<'a> {
    out_dir: &'a Path,
    known_ids: &'a HashSet<String>,
    progress: Option<ProgressBar>,
}

impl<'a> RecordTransformer<'a> {
    pub fn new(out_dir: &'a Path, known_ids: &'a HashSet<String>) -> Self {
        Self {
            out_dir,
            known_ids,
            progress: None,
        }
    }

    /// Tick `progress` once per written record
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Transform every record of a line-delimited JSON file
    pub fn transform_file(&self, path: &Path) -> Result<TransformOutcome> {
        let file = std::fs::File::open(path).map_err(|e| DproseError::io(path, e))?;
        self.transform_reader(BufReader::new(file), path)
    }

    /// Transform every record read from `reader`; `origin` names the source
    /// in errors
    pub fn transform_reader<R: BufRead>(&self, reader: R, origin: &Path) -> Result<TransformOutcome> {
        let mut lines = JsonLinesReader::new(reader);
        let mut outcome = TransformOutcome::default();
        let mut line = 0;

        loop {
            line += 1;
            let record = match lines.read::<Map<String, Value>>() {
                Ok(Some(record)) => record,
                Ok(None) => break,
                Err(e) => return Err(read_error(e, line, origin)),
            };

            let record = transform_record(record, line, self.known_ids)?;
            let path = self.write_record(&record)?;
            trace!(line, id = %record.id, path = %path.display(), "Wrote record");

            outcome.seen.insert(record.id);
            outcome.records_written += 1;
            if let Some(ref progress) = self.progress {
                progress.inc(1);
            }
        }

        info!(
            records = outcome.records_written,
            distinct_ids = outcome.seen.len(),
            "Transformed records"
        );
        Ok(outcome)
    }

    /// Write the payload as one complete JSON document
    fn write_record(&self, record: &TransformedRecord) -> Result<PathBuf> {
        let path = self.out_dir.join(record.file_name());
        let bytes = serde_json::to_vec(&record.payload)?;
        std::fs::write(&path, bytes).map_err(|e| DproseError::io(&path, e))?;
        Ok(path)
    }
}

/// Split reader failures into malformed JSON and genuine IO errors.
///
/// `JsonLinesReader` reports both as `io::Error`; JSON failures carry the
/// `serde_json::Error` as payload.
fn read_error(err: std::io::Error, line: usize, origin: &Path) -> DproseError {
    if !err
        .get_ref()
        .is_some_and(|inner| inner.is::<serde_json::Error>())
    {
        return DproseError::io(origin, err);
    }

    let kind = err.kind();
    match err.into_inner().map(|inner| inner.downcast::<serde_json::Error>()) {
        Some(Ok(source)) => {
            debug!(line, error = %source, "Malformed record");
            DproseError::Parse {
                line,
                source: *source,
            }
        },
        Some(Err(other)) => DproseError::io(origin, std::io::Error::new(kind, other)),
        None => DproseError::io(origin, kind.into()),
    }
}
