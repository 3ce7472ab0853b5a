//! Run configuration
//!
//! Everything comes from the command line; there is no config file.

use std::path::{Path, PathBuf};

/// Field delimiter of the metadata table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter(u8);

impl Delimiter {
    pub const COMMA: Self = Self(b',');
    pub const TAB: Self = Self(b'\t');
    pub const SEMICOLON: Self = Self(b';');

    /// Guess from the file extension: `.tsv` and `.tab` are tab separated,
    /// everything else is comma separated.
    pub fn infer(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("tsv" | "tab") => Self::TAB,
            _ => Self::COMMA,
        }
    }

    pub fn as_byte(self) -> u8 {
        self.0
    }
}

impl std::str::FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comma" | "," => Ok(Self::COMMA),
            "tab" | "\t" | "\\t" => Ok(Self::TAB),
            "semicolon" | ";" => Ok(Self::SEMICOLON),
            _ => match s.as_bytes() {
                [byte] if byte.is_ascii() && *byte != b'"' && *byte != b'\n' => Ok(Self(*byte)),
                _ => Err(format!(
                    "invalid delimiter '{s}': expected comma, tab, semicolon or a single ASCII character"
                )),
            },
        }
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            b',' => write!(f, "comma"),
            b'\t' => write!(f, "tab"),
            b';' => write!(f, "semicolon"),
            other => write!(f, "{}", other as char),
        }
    }
}

/// Inputs and output location of one conversion run
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Line-delimited JSON records, each carrying a `dprose_id`
    pub records_file: PathBuf,

    /// Metadata table with a header row
    pub metadata_file: PathBuf,

    /// Receives the per-record files and `index.json`
    pub out_dir: PathBuf,

    pub delimiter: Delimiter,

    /// Show a spinner while records are written
    pub show_progress: bool,
}

impl ConvertConfig {
    /// Create a config, inferring the delimiter from the metadata file name
    pub fn new(
        records_file: impl Into<PathBuf>,
        metadata_file: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        let metadata_file = metadata_file.into();
        Self {
            records_file: records_file.into(),
            delimiter: Delimiter::infer(&metadata_file),
            metadata_file,
            out_dir: out_dir.into(),
            show_progress: false,
        }
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}
