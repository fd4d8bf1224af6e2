//! Link preview resolution.
//!
//! [`MetadataResolver`] turns a URL into a settled [`LinkMetadata`]. It never
//! fails: each strategy supplies its own placeholder when its fetch does not
//! work out, and the reason is logged.
//!
//! Strategies are tried in order, first claim wins:
//!
//! 1. [`SocialPostStrategy`] - posts on X / Twitter, via a status API
//! 2. [`VideoEmbedStrategy`] - YouTube, thumbnail plus oEmbed title
//! 3. [`WebPageStrategy`] - any page, Open Graph and HTML scraping, time bounded
//!
//! # Example
//!
//! ```rust,no_run
//! use chatlinks::config::ResolverConfig;
//! use chatlinks::resolver::MetadataResolver;
//!
//! # async fn example() -> chatlinks::Result<()> {
//! let resolver = MetadataResolver::new(ResolverConfig::default())?;
//! let meta = resolver.resolve_url("https://www.rust-lang.org/").await;
//! assert!(!meta.is_loading);
//! println!("{:?}", meta.title);
//! # Ok(())
//! # }
//! ```

mod cell;
mod html;
mod http;
mod relay;
mod social;
mod strategy;
mod video;
mod web;

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use uuid::Uuid;

pub use cell::PreviewCell;
pub use html::PageMetadata;
pub use http::Fetcher;
pub use relay::Relay;
pub use social::{
    SOCIAL_DOMAIN, SOCIAL_FALLBACK_DESCRIPTION, SOCIAL_FALLBACK_SUMMARY, SOCIAL_FALLBACK_TITLE,
    SocialPostStrategy, post_id,
};
pub use strategy::PreviewStrategy;
pub use video::{VIDEO_FALLBACK_TITLE, VideoEmbedStrategy, video_id};
pub use web::{
    SummaryLimits, WEB_EMPTY_SUMMARY, WEB_FAILURE_SUMMARY, WebPageStrategy, compose_summary,
    page_preview,
};

use crate::config::ResolverConfig;
use crate::core::models::ExtractedLink;
use crate::error::Result;
use crate::metadata::{LinkMetadata, Preview};

/// Dispatches URLs to preview strategies.
pub struct MetadataResolver {
    config: ResolverConfig,
    strategies: Vec<Box<dyn PreviewStrategy>>,
}

impl MetadataResolver {
    /// Creates a resolver with the three built-in strategies.
    ///
    /// Fails only if the HTTP client cannot be built.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let fetcher = Fetcher::new(&config)?;
        let strategies: Vec<Box<dyn PreviewStrategy>> = vec![
            Box::new(SocialPostStrategy::new(fetcher.clone(), &config)),
            Box::new(VideoEmbedStrategy::new(fetcher.clone(), &config)),
            Box::new(WebPageStrategy::new(fetcher, &config)),
        ];
        Ok(Self { config, strategies })
    }

    /// Creates a resolver with a custom strategy list, tried in order.
    pub fn with_strategies(config: ResolverConfig, strategies: Vec<Box<dyn PreviewStrategy>>) -> Self {
        Self { config, strategies }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Name of the strategy that would handle `url`.
    pub fn strategy_for(&self, url: &str) -> Option<&'static str> {
        self.strategies
            .iter()
            .find(|s| s.claim(url).is_some())
            .map(|s| s.name())
    }

    /// Runs the claiming strategy for `url` and returns its preview.
    pub async fn preview(&self, url: &str) -> Preview {
        for strategy in &self.strategies {
            let Some(key) = strategy.claim(url) else {
                continue;
            };
            debug!("{} strategy claimed {}", strategy.name(), url);

            return match strategy.fetch(url, &key).await {
                Ok(preview) => preview,
                Err(err) => {
                    warn!("{} preview failed for {}: {}", strategy.name(), url, err);
                    strategy.fallback(url, &key, &err)
                }
            };
        }

        debug!("no strategy claimed {url}");
        Preview::titled(url).with_summary(WEB_FAILURE_SUMMARY).failed()
    }

    /// Resolves one URL into a settled record.
    pub async fn resolve_url(&self, url: &str) -> LinkMetadata {
        LinkMetadata::settled(url, self.preview(url).await)
    }

    /// Resolves one extracted link into a settled record.
    pub async fn resolve(&self, link: &ExtractedLink) -> LinkMetadata {
        self.resolve_url(&link.url).await
    }

    /// Resolves many links with at most `concurrency` in flight.
    ///
    /// Results come back in completion order, keyed by link id.
    pub async fn resolve_all(
        &self,
        links: &[ExtractedLink],
        concurrency: usize,
    ) -> Vec<(Uuid, LinkMetadata)> {
        stream::iter(links)
            .map(|link| async move { (link.id, self.resolve(link).await) })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await
    }
}

impl std::fmt::Debug for MetadataResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("MetadataResolver")
            .field("config", &self.config)
            .field("strategies", &names)
            .finish()
    }
}
