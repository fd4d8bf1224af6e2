//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! The library-side equivalents live in [`crate::format`] and
//! [`crate::config`]; this module only adds the clap derive layer.

use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::config::ResolverConfig;
use crate::core::filter::LinkFilter;
use crate::core::models::OutputConfig;
use crate::error::ChatlinksError;

/// Output file stem used when `-o` is not given.
pub const DEFAULT_OUTPUT_STEM: &str = "links";

/// Extract every link from a chat export, optionally with previews.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlinks")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlinks chat.txt
    chatlinks chat.txt -o links.json --format json
    chatlinks chat.txt --resolve --timeout-ms 5000
    chatlinks chat.txt --from Alice --after 2024-01-01 --domain youtube.com
    chatlinks chat.txt --query rust --messages -f jsonl")]
pub struct Args {
    /// Path to the chat export (plain text)
    pub input: String,

    /// Path to output file [default: links.<format extension>]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Fetch a preview (title, description, image) for every link
    #[arg(long)]
    pub resolve: bool,

    /// Bound on each page fetch, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 8000)]
    pub timeout_ms: u64,

    /// Previews fetched at the same time
    #[arg(long, value_name = "N", default_value_t = 8)]
    pub concurrency: usize,

    /// Fetch pages directly instead of through the relay
    #[arg(long, conflicts_with = "relay")]
    pub no_relay: bool,

    /// Relay prefix the encoded target URL is appended to
    #[arg(long, value_name = "PREFIX")]
    pub relay: Option<String>,

    /// Keep links posted by this author
    #[arg(long, value_name = "AUTHOR")]
    pub from: Option<String>,

    /// Keep links posted on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep links posted on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep links to this domain (subdomains included)
    #[arg(long, value_name = "DOMAIN")]
    pub domain: Option<String>,

    /// Keep links whose URL, author or message contains this text
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Include link IDs in output
    #[arg(long)]
    pub ids: bool,

    /// Include timestamps in output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Include the message each link was found in
    #[arg(short = 'm', long)]
    pub messages: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log level implied by `-v` flags.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// The `-o` path as given, or `links.<ext>` for the chosen format.
    pub fn output_path(&self) -> String {
        if let Some(ref output) = self.output {
            return output.clone();
        }
        let lib_format: crate::format::OutputFormat = self.format.into();
        format!("{DEFAULT_OUTPUT_STEM}.{}", lib_format.extension())
    }

    /// Filter built from the selection flags.
    pub fn link_filter(&self) -> Result<LinkFilter, ChatlinksError> {
        let mut filter = LinkFilter::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_author(from.clone());
        }
        if let Some(ref domain) = self.domain {
            filter = filter.with_domain(domain.clone());
        }
        if let Some(ref query) = self.query {
            filter = filter.with_query(query.clone());
        }
        Ok(filter)
    }

    /// Which optional columns to write.
    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        if self.ids {
            config = config.with_ids();
        }
        if self.timestamps {
            config = config.with_timestamps();
        }
        if self.messages {
            config = config.with_messages();
        }
        if self.resolve {
            config = config.with_previews();
        }
        config
    }

    /// Resolver settings from the network flags.
    pub fn resolver_config(&self) -> ResolverConfig {
        let mut config = ResolverConfig::new().with_timeout(Duration::from_millis(self.timeout_ms));
        if self.no_relay {
            config = config.without_relay();
        } else if let Some(ref relay) = self.relay {
            config = config.with_relay_prefix(relay.clone());
        }
        config
    }
}

/// Output format options.
///
/// - [`Csv`](OutputFormat::Csv) - one row per link
/// - [`Json`](OutputFormat::Json) - pretty-printed array
/// - [`Jsonl`](OutputFormat::Jsonl) - one object per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON array of links
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lib_format: crate::format::OutputFormat = (*self).into();
        lib_format.fmt(f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
