//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::core::models::{LinkRecord, OutputConfig};
use crate::error::Result;

/// Writes links to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: Depends on OutputConfig
///   - Basic: `Date`, `Author`, `URL`
///   - With IDs: `ID` first
///   - With timestamps: `Timestamp` before `Date`
///   - With messages: `Message` after `URL`
///   - With previews: `Title`, `Description`, `Summary`, `Image`, `Domain`, `Error` last
/// - Encoding: UTF-8
pub fn write_csv(records: &[LinkRecord], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, records, config)
}

/// Converts links to a CSV string.
///
/// Same format as `write_csv`, but returns a String instead of writing to file.
pub fn to_csv(records: &[LinkRecord], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, records, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(out: W, records: &[LinkRecord], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for record in records {
        writer.write_record(build_record(record, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_ids {
        header.push("ID");
    }
    if config.include_timestamps {
        header.push("Timestamp");
    }

    header.extend(["Date", "Author", "URL"]);

    if config.include_messages {
        header.push("Message");
    }
    if config.include_previews {
        header.extend(["Title", "Description", "Summary", "Image", "Domain", "Error"]);
    }

    header
}

/// Build CSV record for a single link.
fn build_record(record: &LinkRecord, config: &OutputConfig) -> Vec<String> {
    let link = &record.link;
    let mut row = Vec::new();

    if config.include_ids {
        row.push(link.id.to_string());
    }
    if config.include_timestamps {
        row.push(
            link.datetime()
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        );
    }

    row.push(link.date.clone());
    row.push(link.author.clone());
    row.push(link.url.clone());

    if config.include_messages {
        row.push(link.original_message.clone());
    }

    if config.include_previews {
        match &record.preview {
            Some(meta) => {
                row.push(meta.title.clone().unwrap_or_default());
                row.push(meta.description.clone().unwrap_or_default());
                row.push(meta.summary.clone().unwrap_or_default());
                row.push(meta.image.clone().unwrap_or_default());
                row.push(meta.domain.clone());
                row.push(meta.error.to_string());
            }
            None => {
                row.extend(std::iter::repeat_n(String::new(), 4));
                row.push(link.domain());
                row.push(String::new());
            }
        }
    }

    row
}
