//! Metadata loading
//!
//! Reads the metadata table into memory. Columns are looked up by header
//! name, so their order and any extra columns (`Vorname Autor`,
//! `Dateiname`, ...) do not matter.

use crate::config::Delimiter;
use dprose_common::{DproseError, MetadataRecord, Result};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Header names of the metadata table
pub mod columns {
    pub const ID: &str = "ID";
    pub const SOURCE: &str = "Repositorium";
    pub const AUTHOR: &str = "Gesamtname Autor";
    pub const TITLE: &str = "Titel";
    /// Optional
    pub const RELEASE_YEAR: &str = "verwendetes Datum";
}

/// Positions of the consumed columns within a row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    id: usize,
    source: usize,
    author: usize,
    title: usize,
    release_year: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, origin: &Path) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim_start_matches('\u{feff}') == name)
        };
        let require =
            |name: &str| find(name).ok_or_else(|| DproseError::missing_column(name, origin));

        Ok(Self {
            id: require(columns::ID)?,
            source: require(columns::SOURCE)?,
            author: require(columns::AUTHOR)?,
            title: require(columns::TITLE)?,
            release_year: find(columns::RELEASE_YEAR),
        })
    }

    fn record(&self, row: &csv::StringRecord) -> MetadataRecord {
        let field = |idx: usize| row.get(idx).unwrap_or_default();
        let release_year = self
            .release_year
            .map(field)
            .filter(|year| !year.is_empty())
            .map(str::to_string);

        MetadataRecord::new(
            field(self.id),
            field(self.source),
            field(self.author),
            field(self.title),
            release_year,
        )
    }
}

/// The metadata table, in input order, plus its id set
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    records: Vec<MetadataRecord>,
    ids: HashSet<String>,
}

impl MetadataTable {
    /// Load the table from a file
    pub fn load(path: &Path, delimiter: Delimiter) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| DproseError::io(path, e))?;
        Self::from_reader(file, delimiter, path)
    }

    /// Load the table from any reader; `origin` names the source in errors
    pub fn from_reader<R: Read>(reader: R, delimiter: Delimiter, origin: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let csv_error = |source| DproseError::Csv {
            path: origin.to_path_buf(),
            source,
        };

        let headers = reader.headers().map_err(csv_error)?.clone();
        let columns = ColumnIndex::resolve(&headers, origin)?;
        debug!(?columns, delimiter = %delimiter, "Resolved metadata columns");

        let mut table = Self::default();
        for row in reader.records() {
            let row = row.map_err(csv_error)?;
            table.push(columns.record(&row));
        }

        info!(
            path = %origin.display(),
            rows = table.len(),
            "Loaded metadata"
        );
        Ok(table)
    }

    fn push(&mut self, record: MetadataRecord) {
        if !self.ids.insert(record.id.clone()) {
            warn!(id = %record.id, "Duplicate metadata id");
        }
        self.records.push(record);
    }

    /// Records in input order
    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    /// Prefixed ids of all records
    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
