//! Core data models for extracted links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metadata::{LinkMetadata, domain_of};

/// One URL occurrence found inside a chat message.
///
/// A message with three URLs yields three links sharing `date`, `author` and
/// `original_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedLink {
    /// Generated at parse time
    pub id: Uuid,
    /// Starts with `http://` or `https://`, no whitespace
    pub url: String,
    /// Raw date token from the line
    pub date: String,
    /// Author of the message
    pub author: String,
    /// Milliseconds since the Unix epoch, best effort
    pub timestamp: i64,
    /// Trimmed message text the URL was found in
    pub original_message: String,
}

impl ExtractedLink {
    /// Creates a link with a fresh identifier.
    pub fn new(
        url: impl Into<String>,
        date: impl Into<String>,
        author: impl Into<String>,
        timestamp: i64,
        original_message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            date: date.into(),
            author: author.into(),
            timestamp,
            original_message: original_message.into(),
        }
    }

    /// The timestamp as a UTC datetime, if it is in chrono's range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Host of the URL with any `www.` prefix removed.
    pub fn domain(&self) -> String {
        domain_of(&self.url)
    }
}

/// Everything extracted from one chat log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Links in ascending timestamp order, ties in input order
    pub links: Vec<ExtractedLink>,
    /// Always `links.len()`
    pub total_links: usize,
    /// Distinct authors of every matched message, first-seen order
    pub authors: Vec<String>,
}

impl ParseResult {
    /// Returns `true` if no links were found.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// A link paired with its resolved preview, if one was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    #[serde(flatten)]
    pub link: ExtractedLink,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<LinkMetadata>,
}

impl LinkRecord {
    /// A record without preview data.
    pub fn bare(link: ExtractedLink) -> Self {
        Self {
            link,
            preview: None,
        }
    }

    /// A record carrying a preview.
    pub fn with_preview(link: ExtractedLink, preview: LinkMetadata) -> Self {
        Self {
            link,
            preview: Some(preview),
        }
    }
}

impl From<ExtractedLink> for LinkRecord {
    fn from(link: ExtractedLink) -> Self {
        Self::bare(link)
    }
}

/// Configuration for output format.
/// Controls which optional fields are included in the output.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Include link IDs in output
    pub include_ids: bool,
    /// Include numeric timestamps in output
    pub include_timestamps: bool,
    /// Include the originating message text
    pub include_messages: bool,
    /// Include preview fields when present
    pub include_previews: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every optional field enabled.
    pub fn all() -> Self {
        Self {
            include_ids: true,
            include_timestamps: true,
            include_messages: true,
            include_previews: true,
        }
    }

    pub fn with_ids(mut self) -> Self {
        self.include_ids = true;
        self
    }

    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    pub fn with_messages(mut self) -> Self {
        self.include_messages = true;
        self
    }

    pub fn with_previews(mut self) -> Self {
        self.include_previews = true;
        self
    }
}
