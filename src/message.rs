//! One authored line of chat.
//!
//! [`ChatMessage`] is what the line grammars recover from a raw export before
//! any URL scanning happens. The date is kept exactly as captured, since chat
//! exports use locale-specific formats that are not always parseable.
//!
//! # Example
//!
//! ```
//! use chatlinks::ChatMessage;
//!
//! let msg = ChatMessage::new("3/1/24, 10:00:15", "Alice", "see https://example.com");
//! assert_eq!(msg.author(), "Alice");
//! assert_eq!(msg.urls().count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::parsing::line::find_urls;

/// A single chat message recovered from one input line.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `id` | `Uuid` | Generated at parse time, unique per message |
/// | `date` | `String` | Raw date/time token(s) as captured |
/// | `author` | `String` | Trimmed author name |
/// | `content` | `String` | Remainder of the line after date and author |
///
/// Messages are immutable once parsed; the parser hands them out by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Opaque unique identifier.
    pub id: Uuid,

    /// Raw date/time token(s) from the line.
    pub date: String,

    /// Author name as it appears in the log.
    pub author: String,

    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a message with a fresh identifier.
    pub fn new(
        date: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: date.into(),
            author: author.into(),
            content: content.into(),
        }
    }

    /// Returns the author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the raw date token.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the message text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Iterates over every URL-shaped token in the content, in order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        find_urls(&self.content)
    }

    /// Returns `true` if the content contains at least one URL.
    pub fn has_links(&self) -> bool {
        self.urls().next().is_some()
    }
}

impl std::fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.date, self.author, self.content)
    }
}
