//! Picking a writer for link records.
//!
//! [`OutputFormat`] names one of the writers in [`crate::core::output`].
//! Each writer sits behind its own cargo feature; asking for one that was
//! compiled out is an [`InvalidFormat`](ChatlinksError::InvalidFormat) error
//! rather than a build failure, so callers can choose at runtime.
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatlinks::Result<()> {
//! use chatlinks::core::models::{LinkRecord, OutputConfig};
//! use chatlinks::format::{OutputFormat, to_format_string};
//! use chatlinks::parse;
//!
//! let result = parse("[3/1/24, 10:00] Alice: https://example.com");
//! let records: Vec<LinkRecord> = result.links.into_iter().map(LinkRecord::from).collect();
//!
//! let format = OutputFormat::from_path("links.jsonl")?;
//! let text = to_format_string(&records, format, &OutputConfig::new())?;
//! assert_eq!(text.lines().count(), 1);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::models::{LinkRecord, OutputConfig};
use crate::error::ChatlinksError;

/// Which writer turns link records into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// `;`-separated rows, one per link
    #[default]
    Csv,
    /// Pretty-printed array
    Json,
    /// One object per line
    Jsonl,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Every format, in the order they are listed to users.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Cargo feature that compiles this format's writer in.
    pub fn feature(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    /// `true` if the writer for this format was compiled in.
    pub fn is_available(&self) -> bool {
        match self {
            OutputFormat::Csv => cfg!(feature = "csv-output"),
            OutputFormat::Json | OutputFormat::Jsonl => cfg!(feature = "json-output"),
        }
    }

    /// Picks the format from a file name's extension (`.ndjson` reads as JSONL).
    pub fn from_path(path: &str) -> Result<Self, ChatlinksError> {
        let ext = path.rsplit_once('.').map_or("", |(_, ext)| ext);
        Self::from_name(ext).ok_or_else(|| {
            ChatlinksError::invalid_format(
                "output",
                format!("unknown file extension '.{ext}', expected {}", known_names()),
            )
        })
    }

    fn from_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if name == "ndjson" {
            return Some(OutputFormat::Jsonl);
        }
        Self::all().iter().copied().find(|f| f.extension() == name)
    }

    fn unavailable(self) -> ChatlinksError {
        ChatlinksError::invalid_format(
            "output",
            format!("{self} output needs the '{}' feature", self.feature()),
        )
    }
}

fn known_names() -> String {
    OutputFormat::all()
        .iter()
        .map(OutputFormat::extension)
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ChatlinksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            ChatlinksError::invalid_format(
                "output",
                format!("unknown format '{s}', expected {}", known_names()),
            )
        })
    }
}

/// Writes `records` to `path` with the writer for `format`.
///
/// # Errors
///
/// I/O and encoding errors from the writer, or
/// [`ChatlinksError::InvalidFormat`] if the writer was compiled out.
#[allow(unused_variables)]
pub fn write_to_format(
    records: &[LinkRecord],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), ChatlinksError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(records, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(records, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(records, path, config),
        #[allow(unreachable_patterns)]
        other => Err(other.unavailable()),
    }
}

/// Renders `records` in memory, same text [`write_to_format`] would write.
#[allow(unused_variables)]
pub fn to_format_string(
    records: &[LinkRecord],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, ChatlinksError> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(records, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(records, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(records, config),
        #[allow(unreachable_patterns)]
        other => Err(other.unavailable()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ExtractedLink;
    use crate::metadata::{LinkMetadata, Preview};

    fn records() -> Vec<LinkRecord> {
        let video = ExtractedLink::new(
            "https://youtu.be/dQw4w9WgXcQ",
            "3/1/24, 10:00",
            "Alice",
            1_709_287_200_000,
            "watch https://youtu.be/dQw4w9WgXcQ",
        );
        let page = ExtractedLink::new(
            "https://example.com/a",
            "3/1/24, 10:05",
            "Bob",
            1_709_287_500_000,
            "https://example.com/a",
        );
        vec![
            LinkRecord::with_preview(
                video,
                LinkMetadata::settled("https://youtu.be/dQw4w9WgXcQ", Preview::titled("A video")),
            ),
            LinkRecord::bare(page),
        ]
    }

    #[test]
    fn test_picked_from_output_file_name() {
        assert_eq!(OutputFormat::from_path("out/links.CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path("links.ndjson").unwrap(), OutputFormat::Jsonl);
        assert!(OutputFormat::from_path("links").unwrap_err().is_invalid_format());
        assert!(OutputFormat::from_path("links.xlsx").unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_unknown_name_lists_every_format() {
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        let message = err.to_string();
        for format in OutputFormat::all() {
            assert!(message.contains(format.extension()), "{message}");
        }
        assert_eq!("NDJSON".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_file_matches_in_memory_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let config = OutputConfig::new().with_previews();

        for format in OutputFormat::all() {
            assert!(format.is_available());
            let path = dir.path().join(format!("links.{}", format.extension()));
            let path = path.to_str().unwrap();

            write_to_format(&records(), path, *format, &config).unwrap();
            let on_disk = std::fs::read_to_string(path).unwrap();
            // ids differ between calls to records(), so compare shape only
            let in_memory = to_format_string(&records(), *format, &config).unwrap();
            assert_eq!(on_disk.lines().count(), in_memory.lines().count());
            assert!(on_disk.contains("https://youtu.be/dQw4w9WgXcQ"));
        }
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_preview_travels_with_record() {
        let text = to_format_string(&records(), OutputFormat::Jsonl, &OutputConfig::new().with_previews())
            .unwrap();
        let lines: Vec<serde_json::Value> =
            text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines[0]["preview"]["title"], "A video");
        assert_eq!(lines[0]["preview"]["domain"], "youtu.be");
        assert!(lines[1].get("preview").is_none());
    }

    #[cfg(not(feature = "json-output"))]
    #[test]
    fn test_compiled_out_writer_is_reported() {
        assert!(!OutputFormat::Json.is_available());
        let err = to_format_string(&records(), OutputFormat::Json, &OutputConfig::new()).unwrap_err();
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("json-output"));
    }

    #[cfg(not(feature = "csv-output"))]
    #[test]
    fn test_compiled_out_csv_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.csv");
        let err = write_to_format(&records(), path.to_str().unwrap(), OutputFormat::Csv, &OutputConfig::new())
            .unwrap_err();
        assert!(err.to_string().contains("csv-output"));
        assert!(!path.exists());
    }
}
