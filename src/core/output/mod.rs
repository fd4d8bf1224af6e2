//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter (spreadsheets) - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of links - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one link per line - requires `json-output` feature
//!
//! Every writer takes [`LinkRecord`](crate::core::models::LinkRecord)s, so a
//! resolved preview travels with its link when
//! [`OutputConfig::include_previews`](crate::core::models::OutputConfig) is set.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlinks::Result<()> {
//! use chatlinks::core::models::{LinkRecord, OutputConfig};
//! use chatlinks::core::output::{to_csv, write_json, write_jsonl};
//! use chatlinks::parse;
//!
//! let result = parse("[3/1/24, 10:00] Alice: https://example.com");
//! let records: Vec<LinkRecord> = result.links.into_iter().map(LinkRecord::from).collect();
//!
//! let config = OutputConfig::new().with_timestamps();
//!
//! write_json(&records, "links.json", &config)?;
//! write_jsonl(&records, "links.jsonl", &config)?;
//! let csv_string = to_csv(&records, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

#[cfg(feature = "json-output")]
use crate::core::models::{LinkRecord, OutputConfig};
#[cfg(feature = "json-output")]
use crate::metadata::LinkMetadata;

/// Link shape shared by the JSON and JSONL writers.
/// Only includes fields enabled in `OutputConfig`.
#[cfg(feature = "json-output")]
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonLink<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    date: &'a str,
    author: &'a str,
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<&'a LinkMetadata>,
}

#[cfg(feature = "json-output")]
impl<'a> JsonLink<'a> {
    fn from_record(record: &'a LinkRecord, config: &OutputConfig) -> Self {
        let link = &record.link;
        Self {
            id: config.include_ids.then(|| link.id.to_string()),
            timestamp: if config.include_timestamps {
                link.datetime()
                    .map(|ts| ts.format("%Y-%m-%dT%H:%M:%SZ").to_string())
            } else {
                None
            },
            date: &link.date,
            author: &link.author,
            url: &link.url,
            original_message: config
                .include_messages
                .then_some(link.original_message.as_str()),
            preview: if config.include_previews {
                record.preview.as_ref()
            } else {
                None
            },
        }
    }
}
