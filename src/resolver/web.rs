//! Previews for arbitrary web pages.

use std::time::Duration;

use async_trait::async_trait;

use super::html::PageMetadata;
use super::http::Fetcher;
use super::strategy::PreviewStrategy;
use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::metadata::Preview;

pub const WEB_EMPTY_SUMMARY: &str = "No summary available for this content.";
pub const WEB_FAILURE_SUMMARY: &str =
    "Could not fetch content preview. The website might be blocking automated access.";

/// Thresholds used when composing a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLimits {
    pub short_description_chars: usize,
    pub paragraph_min_chars: usize,
    pub paragraph_count: usize,
    pub max_chars: usize,
}

impl SummaryLimits {
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            short_description_chars: config.short_description_chars,
            paragraph_min_chars: config.paragraph_min_chars,
            paragraph_count: config.paragraph_count,
            max_chars: config.summary_max_chars,
        }
    }
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

/// Builds the summary: the description, or the body paragraphs in its place
/// when the description is short, then truncated.
///
/// A short description stays available on its own in the preview's
/// `description` field.
pub fn compose_summary(description: Option<&str>, paragraphs: &[String], limits: &SummaryLimits) -> String {
    let mut summary = description.unwrap_or_default().to_string();

    if summary.chars().count() < limits.short_description_chars && !paragraphs.is_empty() {
        summary = paragraphs.join("\n\n");
    }

    if summary.chars().count() > limits.max_chars {
        summary = summary.chars().take(limits.max_chars).collect();
        summary.push_str("...");
    }

    if summary.is_empty() {
        WEB_EMPTY_SUMMARY.to_string()
    } else {
        summary
    }
}

/// Builds a preview from a fetched page.
pub fn page_preview(url: &str, page: &PageMetadata, limits: &SummaryLimits) -> Preview {
    let mut preview = Preview::titled(page.best_title().unwrap_or(url))
        .with_summary(compose_summary(page.best_description(), &page.paragraphs, limits));
    preview.description = page.best_description().map(str::to_string);
    preview.image = page.image_url(url);
    preview
}

/// Generic page strategy. Claims every URL.
#[derive(Debug, Clone)]
pub struct WebPageStrategy {
    fetcher: Fetcher,
    timeout: Duration,
    limits: SummaryLimits,
}

impl WebPageStrategy {
    pub fn new(fetcher: Fetcher, config: &ResolverConfig) -> Self {
        Self {
            fetcher,
            timeout: config.timeout,
            limits: SummaryLimits::from_config(config),
        }
    }
}

#[async_trait]
impl PreviewStrategy for WebPageStrategy {
    fn name(&self) -> &'static str {
        "web"
    }

    fn claim(&self, url: &str) -> Option<String> {
        Some(url.to_string())
    }

    async fn fetch(&self, url: &str, _key: &str) -> Result<Preview, ResolveError> {
        // dropping the request future on expiry aborts it
        let html = tokio::time::timeout(self.timeout, self.fetcher.get_text(url, true))
            .await
            .map_err(|_| ResolveError::Timeout(self.timeout))??;

        let page = PageMetadata::extract(
            &html,
            self.limits.paragraph_min_chars,
            self.limits.paragraph_count,
        );
        Ok(page_preview(url, &page, &self.limits))
    }

    fn fallback(&self, url: &str, _key: &str, _err: &ResolveError) -> Preview {
        Preview::titled(url).with_summary(WEB_FAILURE_SUMMARY).failed()
    }
}
