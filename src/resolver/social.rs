//! Previews for posts on X (formerly Twitter).
//!
//! Post pages need JavaScript, so the post is read from an fxtwitter-style
//! status API instead: `GET {api_base}/status/{id}`, through the relay.

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

pub const SOCIAL_DOMAIN: &str = "x.com";
pub const SOCIAL_FALLBACK_TITLE: &str = "X / Twitter Post";
pub const SOCIAL_FALLBACK_DESCRIPTION: &str = "Click to view this post on X.";
pub const SOCIAL_FALLBACK_SUMMARY: &str =
    "Content could not be loaded automatically. Please visit the link to view the content.";

const SOCIAL_HOSTS: &[&str] = &["x.com", "twitter.com"];

static STATUS_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/status/(\d+)").expect("status id pattern is valid"));

#[derive(Debug, Deserialize)]
struct StatusResponse {
    tweet: Option<Post>,
}

#[derive(Debug, Default, Deserialize)]
struct Post {
    text: Option<String>,
    author: Option<PostAuthor>,
    media: Option<PostMedia>,
}

#[derive(Debug, Default, Deserialize)]
struct PostAuthor {
    name: Option<String>,
    screen_name: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PostMedia {
    #[serde(default)]
    photos: Vec<Photo>,
    #[serde(default)]
    videos: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Video {
    thumbnail_url: Option<String>,
}

/// Returns the numeric post id if `url` is a post on a known social host.
pub fn post_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    let known = SOCIAL_HOSTS
        .iter()
        .any(|h| host == *h || host.ends_with(&format!(".{h}")));
    if !known {
        return None;
    }

    STATUS_ID
        .captures(parsed.path())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Social post strategy.
#[derive(Debug, Clone)]
pub struct SocialPostStrategy {
    fetcher: Fetcher,
    api_base: String,
}

impl SocialPostStrategy {
    pub fn new(fetcher: Fetcher, config: &ResolverConfig) -> Self {
        Self {
            fetcher,
            api_base: config.social_api_base.clone(),
        }
    }

    fn build_preview(post: Post) -> Preview {
        let author = post.author.unwrap_or_default();
        let media = post.media.unwrap_or_default();

        let name = present(author.name).unwrap_or_else(|| "Unknown".to_string());
        let handle = present(author.screen_name).unwrap_or_else(|| "twitter".to_string());
        let text = post.text.unwrap_or_default();

        let image = media
            .photos
            .into_iter()
            .find_map(|p| present(p.url))
            .or_else(|| media.videos.into_iter().find_map(|v| present(v.thumbnail_url)))
            .or_else(|| present(author.avatar_url));

        let mut preview = Preview::titled(format!("Post by {name} (@{handle})"))
            .with_description(text.clone())
            .with_summary(text)
            .with_domain(SOCIAL_DOMAIN);
        preview.image = image;
        preview
    }
}

#[async_trait]
impl PreviewStrategy for SocialPostStrategy {
    fn name(&self) -> &'static str {
        "social"
    }

    fn claim(&self, url: &str) -> Option<String> {
        post_id(url)
    }

    async fn fetch(&self, _url: &str, key: &str) -> Result<Preview, ResolveError> {
        let api_url = format!("{}/status/{}", self.api_base, key);
        let response: StatusResponse = self.fetcher.get_json(&api_url, true).await?;
        let post = response.tweet.ok_or(ResolveError::MissingField("tweet"))?;
        Ok(Self::build_preview(post))
    }

    fn fallback(&self, _url: &str, _key: &str, _err: &ResolveError) -> Preview {
        Preview::titled(SOCIAL_FALLBACK_TITLE)
            .with_description(SOCIAL_FALLBACK_DESCRIPTION)
            .with_summary(SOCIAL_FALLBACK_SUMMARY)
            .failed()
    }
}
