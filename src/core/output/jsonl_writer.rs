//! JSON Lines (JSONL) output writer.
//!
//! One link per line, so large results can be streamed into other tools
//! or appended to incrementally.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::JsonLink;
use crate::core::models::{LinkRecord, OutputConfig};
use crate::error::Result;

/// Writes links to JSONL (JSON Lines) format.
///
/// # Format
/// ```text
/// {"date":"3/1/24, 10:00:15","author":"Alice","url":"https://example.com/a"}
/// {"date":"2024-03-02","author":"Bob","url":"https://example.org/"}
/// ```
pub fn write_jsonl(records: &[LinkRecord], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let json = serde_json::to_string(&JsonLink::from_record(record, config))?;
        writeln!(writer, "{json}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts links to a JSONL string.
pub fn to_jsonl(records: &[LinkRecord], config: &OutputConfig) -> Result<String> {
    let mut output = String::new();

    for record in records {
        let json = serde_json::to_string(&JsonLink::from_record(record, config))?;
        output.push_str(&json);
        output.push('\n');
    }

    Ok(output)
}
