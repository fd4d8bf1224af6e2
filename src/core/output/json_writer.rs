//! JSON output writer.

use std::fs::File;
use std::io::Write;

use super::JsonLink;
use crate::core::models::{LinkRecord, OutputConfig};
use crate::error::Result;

/// Writes links to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"date": "3/1/24, 10:00:15", "author": "Alice", "url": "https://example.com/a"},
///   {"date": "2024-03-02", "author": "Bob", "url": "https://example.org/"}
/// ]
/// ```
pub fn write_json(records: &[LinkRecord], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(records, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts links to a pretty-printed JSON array.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(records: &[LinkRecord], config: &OutputConfig) -> Result<String> {
    let links: Vec<JsonLink<'_>> = records
        .iter()
        .map(|r| JsonLink::from_record(r, config))
        .collect();

    Ok(serde_json::to_string_pretty(&links)?)
}
