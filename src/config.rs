//! Configuration types for the parser and the metadata resolver.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - line grammars, URL pattern, invisible characters
//! - [`ResolverConfig`] - timeout, endpoints, relay, summary thresholds
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use chatlinks::config::ResolverConfig;
//!
//! let config = ResolverConfig::new()
//!     .with_timeout(Duration::from_secs(3))
//!     .without_relay();
//!
//! assert!(config.relay_prefix.is_none());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::parsing::line::{BRACKETED_PATTERN, DASHED_PATTERN, INVISIBLE_CHARS, URL_PATTERN};

/// Default bound on a generic page fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Public CORS relay used when none is configured.
pub const DEFAULT_RELAY_PREFIX: &str = "https://corsproxy.io/?";

/// fxtwitter-compatible status API.
pub const DEFAULT_SOCIAL_API_BASE: &str = "https://api.fxtwitter.com";

/// noembed-compatible oEmbed proxy.
pub const DEFAULT_EMBED_ENDPOINT: &str = "https://noembed.com/embed";

/// YouTube still-image host.
pub const DEFAULT_THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";

/// User agent sent with every preview request.
pub const DEFAULT_USER_AGENT: &str = concat!("chatlinks/", env!("CARGO_PKG_VERSION"));

/// Configuration for chat log parsing.
///
/// The defaults recognise the two common export layouts. Custom patterns
/// must keep three capture groups (date, author, content).
///
/// # Example
///
/// ```rust
/// use chatlinks::config::ParserConfig;
///
/// let config = ParserConfig::new().with_invisible_chars(vec!['\u{FEFF}']);
/// assert_eq!(config.invisible_chars.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Pattern for `[date] author: content` lines
    pub bracketed_pattern: String,

    /// Pattern for `date - author: content` lines
    pub dashed_pattern: String,

    /// Pattern for URL tokens inside message content
    pub url_pattern: String,

    /// Characters stripped from every line before matching
    pub invisible_chars: Vec<char>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            bracketed_pattern: BRACKETED_PATTERN.to_string(),
            dashed_pattern: DASHED_PATTERN.to_string(),
            url_pattern: URL_PATTERN.to_string(),
            invisible_chars: INVISIBLE_CHARS.to_vec(),
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bracketed-line pattern.
    #[must_use]
    pub fn with_bracketed_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.bracketed_pattern = pattern.into();
        self
    }

    /// Sets the dashed-line pattern.
    #[must_use]
    pub fn with_dashed_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.dashed_pattern = pattern.into();
        self
    }

    /// Sets the URL token pattern.
    #[must_use]
    pub fn with_url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.url_pattern = pattern.into();
        self
    }

    /// Replaces the set of stripped characters.
    #[must_use]
    pub fn with_invisible_chars(mut self, chars: Vec<char>) -> Self {
        self.invisible_chars = chars;
        self
    }
}

/// Configuration for link preview resolution.
///
/// Endpoints are configurable so that tests can point strategies at a
/// local mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Bound on a generic page fetch (default: 8s). Also used as the HTTP
    /// client timeout for every other request.
    pub timeout: Duration,

    /// Prefix the URL-encoded target is appended to. `None` fetches directly.
    pub relay_prefix: Option<String>,

    /// Base of the social post status API
    pub social_api_base: String,

    /// oEmbed proxy endpoint for videos
    pub embed_endpoint: String,

    /// Base URL for constructed video thumbnails
    pub thumbnail_base: String,

    /// User agent header
    pub user_agent: String,

    /// Maximum redirects followed per request (default: 5)
    pub max_redirects: usize,

    /// Descriptions shorter than this are replaced by paragraphs (default: 200)
    pub short_description_chars: usize,

    /// Minimum paragraph length to count as content (default: 50)
    pub paragraph_min_chars: usize,

    /// Number of paragraphs collected (default: 3)
    pub paragraph_count: usize,

    /// Summary truncation length (default: 1000)
    pub summary_max_chars: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            relay_prefix: Some(DEFAULT_RELAY_PREFIX.to_string()),
            social_api_base: DEFAULT_SOCIAL_API_BASE.to_string(),
            embed_endpoint: DEFAULT_EMBED_ENDPOINT.to_string(),
            thumbnail_base: DEFAULT_THUMBNAIL_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 5,
            short_description_chars: 200,
            paragraph_min_chars: 50,
            paragraph_count: 3,
            summary_max_chars: 1000,
        }
    }
}

impl ResolverConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fetch timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Routes requests through a different relay.
    #[must_use]
    pub fn with_relay_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.relay_prefix = Some(prefix.into());
        self
    }

    /// Fetches targets directly.
    #[must_use]
    pub fn without_relay(mut self) -> Self {
        self.relay_prefix = None;
        self
    }

    /// Sets the social post API base.
    #[must_use]
    pub fn with_social_api_base(mut self, base: impl Into<String>) -> Self {
        self.social_api_base = trim_base(base.into());
        self
    }

    /// Sets the oEmbed endpoint.
    #[must_use]
    pub fn with_embed_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.embed_endpoint = endpoint.into();
        self
    }

    /// Sets the thumbnail base URL.
    #[must_use]
    pub fn with_thumbnail_base(mut self, base: impl Into<String>) -> Self {
        self.thumbnail_base = trim_base(base.into());
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Sets the redirect limit.
    #[must_use]
    pub fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Sets the summary truncation length.
    #[must_use]
    pub fn with_summary_max_chars(mut self, max: usize) -> Self {
        self.summary_max_chars = max;
        self
    }
}

fn trim_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}
