//! # chatlinks
//!
//! A Rust library for pulling every shared link out of a plain-text chat
//! export and, optionally, enriching each link with a rich preview.
//!
//! ## Overview
//!
//! chatlinks reads exports written in either of the two common line shapes:
//! - **Bracketed** - `[3/1/24, 10:00:15 AM] Alice: see https://example.com`
//! - **Dashed** - `15/01/2024, 10:30 - Bob: https://youtu.be/dQw4w9WgXcQ`
//!
//! Lines matching neither shape (continuations, system notices) are skipped.
//! Every `http://` or `https://` token in a message becomes one
//! [`ExtractedLink`], and the result is ordered oldest first. Dates that
//! cannot be understood fall back to the moment of parsing.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlinks::parse;
//!
//! let result = parse("\
//! [3/1/24, 10:00:15 AM] Alice: read https://www.rust-lang.org/learn
//! continuation lines are ignored
//! 15/01/2024, 10:30 - Bob: https://youtu.be/dQw4w9WgXcQ and https://x.com/a/status/1");
//!
//! assert_eq!(result.total_links, 3);
//! assert_eq!(result.authors, vec!["Alice", "Bob"]);
//! ```
//!
//! ## Link Previews
//!
//! With the `resolver` feature (on by default) a
//! [`MetadataResolver`](resolver::MetadataResolver) fetches a title,
//! description, summary and image for each link. Posts on x.com go through a
//! post-rendering API, YouTube links through an oEmbed endpoint, and every
//! other page is fetched and scraped. A failed fetch never surfaces as an
//! error: the link gets a placeholder preview with `error = true`.
//!
//! ```rust,no_run
//! # #[cfg(feature = "resolver")]
//! # async fn example() -> chatlinks::Result<()> {
//! use chatlinks::config::ResolverConfig;
//! use chatlinks::resolver::MetadataResolver;
//!
//! let resolver = MetadataResolver::new(ResolverConfig::default())?;
//! let meta = resolver.resolve_url("https://www.rust-lang.org").await;
//! println!("{:?} ({})", meta.title, meta.domain);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`LogParser`] and [`parse`]
//! - [`parsing`] - Line grammars, URL extraction and date handling
//! - [`message`] - [`ChatMessage`], one parsed line
//! - [`metadata`] - [`LinkMetadata`], preview display helpers
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`ResolverConfig`](config::ResolverConfig)
//! - [`core`] - Models, filtering, statistics and output writers
//! - [`format`] - Output format selection
//! - `resolver` - Preview strategies and the one-shot preview cell (feature `resolver`)
//! - `async_parser` - Tokio-based parsing (feature `async`)
//! - `cli` - CLI argument types (feature `cli`)
//! - [`error`] - Unified error types ([`ChatlinksError`], [`Result`])
//! - [`prelude`] - Convenient re-exports
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `resolver` | Preview fetching (reqwest, scraper, tokio) |
//! | `async` | [`AsyncLogParser`](async_parser::AsyncLogParser) |
//! | `csv-output` | CSV writer |
//! | `json-output` | JSON and JSONL writers |
//! | `cli` | The `chatlinks` binary |
//! | `full` | All of the above (default) |

#[cfg(feature = "async")]
pub mod async_parser;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod metadata;
pub mod parser;
pub mod parsing;
#[cfg(feature = "resolver")]
pub mod resolver;

// Re-export the main types at the crate root for convenience
pub use crate::core::models::{ExtractedLink, LinkRecord, ParseResult};
#[cfg(feature = "resolver")]
pub use error::ResolveError;
pub use error::{ChatlinksError, Result};
pub use message::ChatMessage;
pub use metadata::LinkMetadata;
pub use parser::{LogParser, parse};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlinks::prelude::*;
///
/// let result = parse("[1/2/24] Ann: https://example.com");
/// let links = apply_filters(result.links, &LinkFilter::new().with_author("ann"));
/// assert_eq!(links.len(), 1);
/// ```
pub mod prelude {
    pub use crate::error::{ChatlinksError, Result};

    pub use crate::message::ChatMessage;
    pub use crate::metadata::{LinkMetadata, Preview, PreviewKind};
    pub use crate::parser::{LogParser, parse};

    pub use crate::config::{ParserConfig, ResolverConfig};

    pub use crate::core::filter::{LinkFilter, apply_filters};
    pub use crate::core::models::{ExtractedLink, LinkRecord, OutputConfig, ParseResult};
    pub use crate::core::processor::LinkStats;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};

    #[cfg(feature = "async")]
    pub use crate::async_parser::AsyncLogParser;
    #[cfg(feature = "resolver")]
    pub use crate::resolver::{MetadataResolver, PreviewCell, PreviewStrategy};
}
