//! Previews for YouTube videos.
//!
//! The thumbnail is derived from the video id without any request. Title and
//! channel come from a noembed-style oEmbed proxy, fetched directly.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use url::Url;

use super::http::Fetcher;
use super::strategy::PreviewStrategy;
use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::metadata::Preview;

pub const VIDEO_FALLBACK_TITLE: &str = "YouTube Video";

const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be", "youtube-nocookie.com"];

static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("video id pattern is valid")
});

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    title: Option<String>,
    author_name: Option<String>,
    error: Option<String>,
}

/// Returns the 11-character video id if `url` is a YouTube watch/share link.
pub fn video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let known = VIDEO_HOSTS
        .iter()
        .any(|h| host == *h || host.ends_with(&format!(".{h}")));
    if !known {
        return None;
    }

    let id = VIDEO_ID.captures(url)?.get(2)?.as_str();
    let well_formed = id.len() == 11
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    well_formed.then(|| id.to_string())
}

fn watch_summary(title: Option<&str>, author: Option<&str>) -> String {
    format!(
        "Watch \"{}\" on YouTube.\n\nAuthor: {}\nProvider: YouTube",
        title.unwrap_or("this video"),
        author.unwrap_or("Unknown"),
    )
}

/// Video embed strategy.
#[derive(Debug, Clone)]
pub struct VideoEmbedStrategy {
    fetcher: Fetcher,
    embed_endpoint: String,
    thumbnail_base: String,
}

impl VideoEmbedStrategy {
    pub fn new(fetcher: Fetcher, config: &ResolverConfig) -> Self {
        Self {
            fetcher,
            embed_endpoint: config.embed_endpoint.clone(),
            thumbnail_base: config.thumbnail_base.clone(),
        }
    }

    /// High-quality still for a video id.
    pub fn thumbnail_url(&self, id: &str) -> String {
        format!("{}/{}/hqdefault.jpg", self.thumbnail_base, id)
    }
}

#[async_trait]
impl PreviewStrategy for VideoEmbedStrategy {
    fn name(&self) -> &'static str {
        "video"
    }

    fn claim(&self, url: &str) -> Option<String> {
        video_id(url)
    }

    async fn fetch(&self, url: &str, key: &str) -> Result<Preview, ResolveError> {
        let endpoint = Url::parse_with_params(&self.embed_endpoint, &[("url", url)])?;
        let data: EmbedResponse = self.fetcher.get_json(endpoint.as_str(), false).await?;
        if let Some(err) = data.error {
            return Err(ResolveError::Upstream(err));
        }

        let title = data.title.filter(|t| !t.is_empty());
        let author = data.author_name.filter(|a| !a.is_empty());

        let summary = watch_summary(title.as_deref(), author.as_deref());

        let mut preview = Preview::titled(title.unwrap_or_else(|| VIDEO_FALLBACK_TITLE.to_string()))
            .with_summary(summary)
            .with_image(self.thumbnail_url(key));
        preview.description = author.map(|a| format!("Video by {a}"));
        Ok(preview)
    }

    fn fallback(&self, _url: &str, key: &str, err: &ResolveError) -> Preview {
        // thumbnail alone is a usable card, so not an error
        let preview = Preview::titled(VIDEO_FALLBACK_TITLE).with_image(self.thumbnail_url(key));
        match err {
            // the proxy answered but knew nothing about the video
            ResolveError::Upstream(_) => preview.with_summary(watch_summary(None, None)),
            _ => preview,
        }
    }
}
