//! dprose Convert Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Turns a line-delimited file of pre-computed classification records and a
//! metadata table into a directory suitable for static serving:
//!
//! - one `dprose_<raw id>.json` per record, without its `dprose_id` field
//! - one `index.json` listing the metadata of every record written
//!
//! The run is a fixed sequence of stages: load metadata, transform records,
//! write the index. Any error aborts the run.
//!
//! # Example
//!
//! ```no_run
//! use dprose_convert::{pipeline, ConvertConfig};
//!
//! fn main() -> dprose_common::Result<()> {
//!     let config = ConvertConfig::new("dprose.jsonlines", "metadata.csv", "./public/data");
//!     let summary = pipeline::run(&config)?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod index;
pub mod metadata;
pub mod pipeline;
pub mod progress;
pub mod records;

// Re-export commonly used types
pub use config::{ConvertConfig, Delimiter};
pub use metadata::MetadataTable;
pub use pipeline::ConversionSummary;
pub use records::{RecordTransformer, SeenIds};
