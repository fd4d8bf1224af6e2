//! Chat log parser.
//!
//! [`LogParser`] turns a raw chat export into a [`ParseResult`]: every URL
//! found in a recognised message becomes one [`ExtractedLink`], sorted by
//! timestamp.
//!
//! # Example
//!
//! ```rust
//! use chatlinks::parser::LogParser;
//!
//! let log = "\
//! [3/1/24, 10:00:15] Alice: check this https://example.com/a
//! 2024-03-01 - Bob: no links here";
//!
//! let result = LogParser::new().parse(log);
//! assert_eq!(result.total_links, 1);
//! assert_eq!(result.links[0].author, "Alice");
//! assert_eq!(result.authors.len(), 2);
//! ```
//!
//! Parsing never fails: lines that match neither grammar are skipped and
//! dates that cannot be read fall back to the time the parse started.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::Utc;
use log::debug;
use regex::Regex;

use crate::ChatMessage;
use crate::config::ParserConfig;
use crate::core::models::{ExtractedLink, ParseResult};
use crate::error::{ChatlinksError, Result};
use crate::parsing::date::timestamp_millis_or;
use crate::parsing::line::{LineMatcher, URL_PATTERN, clean_line};

/// Line-oriented link extractor.
#[derive(Debug, Clone)]
pub struct LogParser {
    matcher: LineMatcher,
    url: Regex,
    invisible: Vec<char>,
}

impl LogParser {
    /// Creates a parser with the built-in grammars.
    pub fn new() -> Self {
        let config = ParserConfig::default();
        Self {
            matcher: LineMatcher::default(),
            url: Regex::new(URL_PATTERN).expect("built-in URL pattern is valid"),
            invisible: config.invisible_chars,
        }
    }

    /// Creates a parser from custom patterns.
    ///
    /// Returns [`ChatlinksError::InvalidFormat`] if a pattern does not compile.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        let matcher = LineMatcher::new(&config.bracketed_pattern, &config.dashed_pattern)
            .map_err(|e| ChatlinksError::invalid_format("line pattern", e.to_string()))?;
        let url = Regex::new(&config.url_pattern)
            .map_err(|e| ChatlinksError::invalid_format("URL pattern", e.to_string()))?;

        Ok(Self {
            matcher,
            url,
            invisible: config.invisible_chars,
        })
    }

    /// Returns every recognised message, in input order.
    pub fn parse_messages(&self, text: &str) -> Vec<ChatMessage> {
        text.lines()
            .filter_map(|raw| {
                let line = clean_line(raw, &self.invisible);
                if line.is_empty() {
                    return None;
                }
                let m = self.matcher.match_line(&line)?;
                Some(ChatMessage::new(
                    m.date.trim(),
                    m.author.trim(),
                    m.content.to_string(),
                ))
            })
            .collect()
    }

    /// Extracts links using the current time as the fallback timestamp.
    pub fn parse(&self, text: &str) -> ParseResult {
        self.parse_at(text, Utc::now().timestamp_millis())
    }

    /// Extracts links with an explicit fallback timestamp in milliseconds.
    ///
    /// Every link whose date cannot be read gets `fallback_ms`, so one parse
    /// sees a single clock value.
    pub fn parse_at(&self, text: &str, fallback_ms: i64) -> ParseResult {
        let messages = self.parse_messages(text);

        let mut links = Vec::new();
        let mut authors = Vec::new();
        let mut seen = HashSet::new();

        for msg in &messages {
            if seen.insert(msg.author.clone()) {
                authors.push(msg.author.clone());
            }

            let original = msg.content.trim();
            for url in self.url.find_iter(&msg.content) {
                links.push(ExtractedLink::new(
                    url.as_str(),
                    msg.date.clone(),
                    msg.author.clone(),
                    timestamp_millis_or(&msg.date, fallback_ms),
                    original,
                ));
            }
        }

        // stable: equal timestamps keep input order
        links.sort_by_key(|link| link.timestamp);

        debug!(
            "parsed {} messages, {} links, {} authors",
            messages.len(),
            links.len(),
            authors.len()
        );

        ParseResult {
            total_links: links.len(),
            links,
            authors,
        }
    }

    /// Reads a UTF-8 export from disk and parses it.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParseResult> {
        let content = fs::read_to_string(path)?;
        Ok(self.parse(&content))
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `text` with the default grammars.
pub fn parse(text: &str) -> ParseResult {
    LogParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const NOW: i64 = 1_900_000_000_000;

    #[test]
    fn test_bracketed_with_link() {
        let result = LogParser::new().parse_at(
            "[3/1/24, 10:00:15] Alice: check this https://example.com/a",
            NOW,
        );
        assert_eq!(result.total_links, 1);
        let link = &result.links[0];
        assert_eq!(link.url, "https://example.com/a");
        assert_eq!(link.author, "Alice");
        assert_eq!(link.date, "3/1/24, 10:00:15");
        assert_eq!(link.original_message, "check this https://example.com/a");
        assert_eq!(
            link.timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 15)
                .unwrap()
                .timestamp_millis()
        );
        assert_eq!(result.authors, vec!["Alice"]);
    }

    #[test]
    fn test_author_without_links_is_registered() {
        let result = LogParser::new().parse_at(
            "[3/1/24, 10:00:15] Alice: check this https://example.com/a\n2024-03-01 - Bob: no links here",
            NOW,
        );
        assert_eq!(result.total_links, 1);
        assert_eq!(result.links[0].author, "Alice");
        assert_eq!(result.authors, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_multiple_urls_share_context() {
        let result = LogParser::new().parse_at(
            "[3/1/24, 10:00] Carol: a http://a.example/x b https://b.example/y",
            NOW,
        );
        assert_eq!(result.total_links, 2);
        assert_eq!(result.links[0].url, "http://a.example/x");
        assert_eq!(result.links[1].url, "https://b.example/y");
        assert_eq!(result.links[0].timestamp, result.links[1].timestamp);
        assert_eq!(result.links[0].original_message, result.links[1].original_message);
        assert_ne!(result.links[0].id, result.links[1].id);
    }

    #[test]
    fn test_unparseable_date_uses_fallback() {
        let result = LogParser::new().parse_at("[yesterday] Dan: https://d.example", NOW);
        assert_eq!(result.links[0].timestamp, NOW);
        assert_eq!(result.links[0].date, "yesterday");
    }

    #[test]
    fn test_sorted_by_timestamp() {
        let log = "\
[3/2/24, 09:00] A: https://late.example
[3/1/24, 09:00] B: https://early.example
[3/1/24, 09:00] C: https://early-tie.example";
        let result = LogParser::new().parse_at(log, NOW);
        let urls: Vec<&str> = result.links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://early.example",
                "https://early-tie.example",
                "https://late.example"
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let result = LogParser::new().parse("");
        assert!(result.is_empty());
        assert_eq!(result.total_links, 0);
        assert!(result.authors.is_empty());
    }

    #[test]
    fn test_noise_lines_dropped() {
        let log = "\
Messages and calls are end-to-end encrypted.

continuation https://lost.example
[1/1/24, 10:00] Eve: kept https://kept.example";
        let result = LogParser::new().parse_at(log, NOW);
        assert_eq!(result.total_links, 1);
        assert_eq!(result.links[0].url, "https://kept.example");
        assert_eq!(result.authors, vec!["Eve"]);
    }

    #[test]
    fn test_invisible_characters_stripped() {
        let log = "\u{200E}[1/1/24, 10:00] \u{200B}Frank: https://f.example\u{FEFF}";
        let result = LogParser::new().parse_at(log, NOW);
        assert_eq!(result.links[0].author, "Frank");
        assert_eq!(result.links[0].url, "https://f.example");
    }

    #[test]
    fn test_duplicates_kept() {
        let log = "\
[1/1/24, 10:00] A: https://same.example
[1/1/24, 10:01] B: https://same.example";
        let result = LogParser::new().parse_at(log, NOW);
        assert_eq!(result.total_links, 2);
    }

    #[test]
    fn test_parse_messages_in_input_order() {
        let log = "[3/2/24, 09:00] A: late\n[3/1/24, 09:00] B: early";
        let messages = LogParser::new().parse_messages(log);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].author, "A");
        assert_eq!(messages[1].author, "B");
    }

    #[test]
    fn test_custom_config() {
        let config = ParserConfig::new().with_url_pattern(r"https://\S+");
        let parser = LogParser::with_config(config).unwrap();
        let result = parser.parse_at("[1/1/24] A: http://a.example https://b.example", NOW);
        assert_eq!(result.total_links, 1);
        assert_eq!(result.links[0].url, "https://b.example");
    }

    #[test]
    fn test_invalid_config() {
        let config = ParserConfig::new().with_bracketed_pattern("([");
        let err = LogParser::with_config(config).unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_free_parse() {
        let result = parse("[1/1/24] A: https://a.example");
        assert_eq!(result.total_links, 1);
    }
}
