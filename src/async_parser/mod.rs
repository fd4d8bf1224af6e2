//! Async parser support for chatlinks.
//!
//! Parsing is CPU-bound and synchronous. These entry points move it onto
//! tokio's blocking pool so an async caller can keep serving other work
//! while a large export is scanned.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatlinks::async_parser::AsyncLogParser;
//!
//! # async fn example() -> Result<(), chatlinks::ChatlinksError> {
//! let parser = AsyncLogParser::new();
//! let result = parser.parse("chat.txt").await?;
//!
//! for link in &result.links {
//!     println!("{}: {}", link.author, link.url);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! This module requires the `async` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! chatlinks = { version = "0.1", default-features = false, features = ["async"] }
//! ```

use std::path::Path;

use tokio::fs;
use tokio::task;

use crate::config::ParserConfig;
use crate::core::models::ParseResult;
use crate::error::ChatlinksError;
use crate::parser::LogParser;

/// Non-blocking wrapper around [`LogParser`].
#[derive(Debug, Clone, Default)]
pub struct AsyncLogParser {
    inner: LogParser,
}

impl AsyncLogParser {
    /// Creates a new async parser with the built-in grammars.
    pub fn new() -> Self {
        Self {
            inner: LogParser::new(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Result<Self, ChatlinksError> {
        Ok(Self {
            inner: LogParser::with_config(config)?,
        })
    }

    /// Parses text already in memory on the blocking pool.
    pub async fn parse_str(&self, content: impl Into<String>) -> Result<ParseResult, ChatlinksError> {
        let parser = self.inner.clone();
        let content = content.into();
        let result = task::spawn_blocking(move || parser.parse(&content)).await?;
        Ok(result)
    }

    /// Reads a file with tokio's async I/O and parses it.
    pub async fn parse(&self, path: impl AsRef<Path>) -> Result<ParseResult, ChatlinksError> {
        let content = read_file_async(path).await?;
        self.parse_str(content).await
    }
}

/// Parses text with the default grammars off the async executor.
pub async fn parse_text_async(content: impl Into<String>) -> Result<ParseResult, ChatlinksError> {
    AsyncLogParser::new().parse_str(content).await
}

/// Reads and parses a file with the default grammars.
pub async fn parse_file_async(path: impl AsRef<Path>) -> Result<ParseResult, ChatlinksError> {
    AsyncLogParser::new().parse(path).await
}

/// Helper function to read a file asynchronously.
pub(crate) async fn read_file_async(path: impl AsRef<Path>) -> Result<String, ChatlinksError> {
    let content = fs::read_to_string(path).await?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_parse_str() {
        let result = parse_text_async("[1/1/24, 10:00] A: https://a.example")
            .await
            .unwrap();
        assert_eq!(result.total_links, 1);
        assert_eq!(result.authors, vec!["A"]);
    }

    #[tokio::test]
    async fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2024-03-01 - Bob: see https://b.example/x").unwrap();
        writeln!(file, "garbage line").unwrap();

        let result = parse_file_async(file.path()).await.unwrap();
        assert_eq!(result.total_links, 1);
        assert_eq!(result.links[0].url, "https://b.example/x");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = parse_file_async("/definitely/not/here.txt").await.unwrap_err();
        assert!(err.is_io());
    }

    #[tokio::test]
    async fn test_invalid_config() {
        let config = ParserConfig::new().with_url_pattern("(");
        assert!(AsyncLogParser::with_config(config).is_err());
    }
}
