//! Core processing logic for chatlinks.
//!
//! This module contains:
//! - [`models`] - Extracted links, parse results and output configuration
//! - [`filter`] - Link filtering by date, author, domain and text
//! - [`processor`] - Link statistics
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatlinks::core::{
//!     ExtractedLink, LinkRecord, OutputConfig, LinkFilter, LinkStats,
//!     apply_filters, write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod filter;
pub mod models;
pub mod output;
pub mod processor;

// Re-export main types for convenience
pub use filter::{LinkFilter, apply_filters};
pub use models::{ExtractedLink, LinkRecord, OutputConfig, ParseResult};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};

pub use processor::LinkStats;
