//! dprose Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, error handling and logging for the dprose tools.
//!
//! # Overview
//!
//! - **Types**: `MetadataRecord` and the id prefixing rules
//! - **Error Handling**: `DproseError` and the `Result` alias
//! - **Logging**: `tracing` subscriber setup
//!
//! # Example
//!
//! ```
//! use dprose_common::types::{prefixed_id, record_file_name};
//!
//! assert_eq!(prefixed_id("42"), "dprose_42");
//! assert_eq!(record_file_name("42"), "dprose_42.json");
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{DproseError, Result};
pub use types::MetadataRecord;
