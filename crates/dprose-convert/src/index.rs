//! Index writing

use crate::records::SeenIds;
use dprose_common::types::INDEX_FILE_NAME;
use dprose_common::{DproseError, MetadataRecord, Result};
use std::path::Path;
use tracing::{debug, info};

/// Metadata records whose id was written, in their original order
pub fn filter_index<'a>(records: &'a [MetadataRecord], seen: &SeenIds) -> Vec<&'a MetadataRecord> {
    records
        .iter()
        .filter(|record| {
            let matched = seen.contains(&record.id);
            if !matched {
                debug!(id = %record.id, "No records for metadata entry");
            }
            matched
        })
        .collect()
}

/// Write `index.json` into `out_dir`, returning the number of entries
pub fn write_index(out_dir: &Path, records: &[MetadataRecord], seen: &SeenIds) -> Result<usize> {
    let entries = filter_index(records, seen);
    let path = out_dir.join(INDEX_FILE_NAME);

    let bytes = serde_json::to_vec(&entries)?;
    std::fs::write(&path, bytes).map_err(|e| DproseError::io(&path, e))?;

    info!(path = %path.display(), entries = entries.len(), "Wrote index");
    Ok(entries.len())
}
