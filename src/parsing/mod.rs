//! Shared parsing utilities.
//!
//! - [`line`] - line grammars, invisible-character cleaning, URL scanning
//! - [`date`] - best-effort timestamps for raw date tokens

pub mod date;
pub mod line;

pub use date::{clean_date_token, parse_chat_timestamp, timestamp_millis_or};
pub use line::{LineGrammar, LineMatch, LineMatcher, clean_line, find_urls};
