//! Tests for output writers (JSON, JSONL, CSV)

use chatlinks::core::output::{to_csv, to_json, to_jsonl, write_csv, write_json, write_jsonl};
use chatlinks::core::{ExtractedLink, LinkRecord, OutputConfig};
use chatlinks::format::{OutputFormat, to_format_string, write_to_format};
use chatlinks::metadata::{LinkMetadata, Preview};
use chrono::{TimeZone, Utc};
use std::fs;
use tempfile::tempdir;

fn ms(h: u32, m: u32) -> i64 {
    Utc.with_ymd_and_hms(2024, 1, 15, h, m, 0)
        .unwrap()
        .timestamp_millis()
}

fn sample_records() -> Vec<LinkRecord> {
    let first = ExtractedLink::new(
        "https://www.rust-lang.org/learn",
        "1/15/24, 10:30",
        "Alice",
        ms(10, 30),
        "read https://www.rust-lang.org/learn",
    );
    let second = ExtractedLink::new(
        "https://x.com/jack/status/20",
        "1/15/24, 10:31",
        "Bob",
        ms(10, 31),
        "Quotes \"inside\"; and semicolons https://x.com/jack/status/20",
    );
    let third = ExtractedLink::new(
        "https://youtu.be/dQw4w9WgXcQ",
        "1/15/24, 10:32",
        "Иван",
        ms(10, 32),
        "🎉 https://youtu.be/dQw4w9WgXcQ",
    );

    vec![
        LinkRecord::with_preview(
            first,
            LinkMetadata::settled(
                "https://www.rust-lang.org/learn",
                Preview::titled("Learn Rust")
                    .with_description("Get started")
                    .with_summary("Get started\n\nParagraph")
                    .with_image("https://www.rust-lang.org/static/images/rust-social.jpg"),
            ),
        ),
        LinkRecord::with_preview(
            second,
            LinkMetadata::settled(
                "https://x.com/jack/status/20",
                Preview::titled("X / Twitter Post").failed(),
            ),
        ),
        LinkRecord::bare(third),
    ]
}

// ============================================================================
// JSON Writer Tests
// ============================================================================

mod json_writer_tests {
    use super::*;

    #[test]
    fn test_write_json_basic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.json");
        let path_str = path.to_str().unwrap();

        write_json(&sample_records(), path_str, &OutputConfig::new()).unwrap();

        let parsed: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0]["url"], "https://www.rust-lang.org/learn");
        assert_eq!(parsed[0]["author"], "Alice");
        assert_eq!(parsed[0]["date"], "1/15/24, 10:30");
        assert!(parsed[0].get("id").is_none());
        assert!(parsed[0].get("timestamp").is_none());
        assert!(parsed[0].get("originalMessage").is_none());
        assert!(parsed[0].get("preview").is_none());
    }

    #[test]
    fn test_json_with_all_fields() {
        let records = sample_records();
        let json = to_json(&records, &OutputConfig::all()).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["id"], records[0].link.id.to_string());
        assert_eq!(parsed[0]["timestamp"], "2024-01-15T10:30:00Z");
        assert_eq!(
            parsed[0]["originalMessage"],
            "read https://www.rust-lang.org/learn"
        );

        let preview = &parsed[0]["preview"];
        assert_eq!(preview["title"], "Learn Rust");
        assert_eq!(preview["isLoading"], false);
        assert_eq!(preview["error"], false);
        assert_eq!(preview["domain"], "rust-lang.org");

        assert_eq!(parsed[1]["preview"]["error"], true);
        assert!(parsed[2].get("preview").is_none());
    }

    #[test]
    fn test_json_empty() {
        let json = to_json(&[], &OutputConfig::new()).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_json_unicode_preserved() {
        let json = to_json(&sample_records(), &OutputConfig::new().with_messages()).unwrap();
        assert!(json.contains("Иван"));
        assert!(json.contains("🎉"));
    }
}

// ============================================================================
// JSONL Writer Tests
// ============================================================================

mod jsonl_writer_tests {
    use super::*;

    #[test]
    fn test_write_jsonl_one_object_per_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.jsonl");

        write_jsonl(&sample_records(), path.to_str().unwrap(), &OutputConfig::new()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["url"].as_str().unwrap().starts_with("https://"));
        }
    }

    #[test]
    fn test_jsonl_with_previews() {
        let jsonl = to_jsonl(&sample_records(), &OutputConfig::new().with_previews()).unwrap();
        let first: serde_json::Value = serde_json::from_str(jsonl.lines().next().unwrap()).unwrap();
        assert_eq!(
            first["preview"]["image"],
            "https://www.rust-lang.org/static/images/rust-social.jpg"
        );
    }

    #[test]
    fn test_jsonl_empty() {
        let jsonl = to_jsonl(&[], &OutputConfig::new()).unwrap();
        assert!(jsonl.trim().is_empty());
    }
}

// ============================================================================
// CSV Writer Tests
// ============================================================================

mod csv_writer_tests {
    use super::*;

    #[test]
    fn test_write_csv_readable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.csv");

        write_csv(&sample_records(), path.to_str().unwrap(), &OutputConfig::all()).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_path(&path)
            .unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(
            headers,
            vec![
                "ID",
                "Timestamp",
                "Date",
                "Author",
                "URL",
                "Message",
                "Title",
                "Description",
                "Summary",
                "Image",
                "Domain",
                "Error"
            ]
        );

        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][6], "Learn Rust");
        assert_eq!(&rows[0][8], "Get started\n\nParagraph");
        assert_eq!(&rows[0][10], "rust-lang.org");
        assert_eq!(&rows[0][11], "false");
        assert_eq!(&rows[1][11], "true");
        // special characters survive quoting
        assert_eq!(
            &rows[1][5],
            "Quotes \"inside\"; and semicolons https://x.com/jack/status/20"
        );
        // bare record: empty preview cells, derived domain
        assert_eq!(&rows[2][6], "");
        assert_eq!(&rows[2][8], "");
        assert_eq!(&rows[2][10], "youtu.be");
        assert_eq!(&rows[2][11], "");
    }

    #[test]
    fn test_csv_minimal() {
        let csv = to_csv(&sample_records(), &OutputConfig::new()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Date;Author;URL"));
        assert_eq!(
            lines.next(),
            Some("1/15/24, 10:30;Alice;https://www.rust-lang.org/learn")
        );
    }

    #[test]
    fn test_csv_empty_has_header() {
        let csv = to_csv(&[], &OutputConfig::new()).unwrap();
        assert_eq!(csv.trim(), "Date;Author;URL");
    }
}

// ============================================================================
// Format Dispatch Tests
// ============================================================================

mod format_tests {
    use super::*;

    #[test]
    fn test_write_to_format_each_format() {
        let dir = tempdir().unwrap();
        let records = sample_records();

        for format in OutputFormat::all() {
            let path = dir.path().join(format!("links.{}", format.extension()));
            write_to_format(&records, path.to_str().unwrap(), *format, &OutputConfig::new())
                .unwrap();
            let written = fs::read_to_string(&path).unwrap();
            assert_eq!(
                written,
                to_format_string(&records, *format, &OutputConfig::new()).unwrap()
            );
        }
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("a/links.csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path("links.JSONL").unwrap(), OutputFormat::Jsonl);
        assert!(OutputFormat::from_path("links.txt").is_err());
    }
}
