//! Preview records and the display hints derived from them.
//!
//! A [`LinkMetadata`] starts life as [`LinkMetadata::pending`], which already
//! carries the domain so a card can be drawn before any network traffic.
//! A strategy produces a [`Preview`] and [`LinkMetadata::settle`] folds it in
//! exactly once.
//!
//! ```rust
//! use chatlinks::metadata::{LinkMetadata, Preview, PreviewKind};
//!
//! let mut meta = LinkMetadata::pending("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
//! assert!(meta.is_loading);
//! assert_eq!(meta.domain, "youtube.com");
//!
//! meta.settle(Preview::titled("YouTube Video"));
//! assert!(!meta.is_loading);
//! assert_eq!(meta.kind(), PreviewKind::Video);
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

/// Display-ready preview state for one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkMetadata {
    /// `true` until a strategy has settled the record
    pub is_loading: bool,
    /// `true` when the preview is a placeholder for a failed fetch
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Host without `www.`, known before resolution
    pub domain: String,
}

impl LinkMetadata {
    /// The record shown while a link is still being resolved.
    pub fn pending(url: &str) -> Self {
        Self {
            is_loading: true,
            error: false,
            title: None,
            description: None,
            summary: None,
            image: None,
            domain: domain_of(url),
        }
    }

    /// A settled record built directly from a preview.
    pub fn settled(url: &str, preview: Preview) -> Self {
        let mut meta = Self::pending(url);
        meta.settle(preview);
        meta
    }

    /// Applies a strategy's result and marks the record as no longer loading.
    ///
    /// Only fields the preview sets are replaced; the domain is kept unless
    /// the preview overrides it.
    pub fn settle(&mut self, preview: Preview) {
        let Preview {
            title,
            description,
            summary,
            image,
            domain,
            error,
        } = preview;

        if title.is_some() {
            self.title = title;
        }
        if description.is_some() {
            self.description = description;
        }
        if summary.is_some() {
            self.summary = summary;
        }
        if image.is_some() {
            self.image = image;
        }
        if let Some(domain) = domain {
            self.domain = domain;
        }
        self.error = error;
        self.is_loading = false;
    }

    /// Which card treatment the record calls for.
    pub fn kind(&self) -> PreviewKind {
        PreviewKind::from_domain(&self.domain)
    }

    /// `true` when an image should be drawn.
    pub fn shows_image(&self) -> bool {
        !self.error && self.image.as_deref().is_some_and(|img| !img.is_empty())
    }
}

/// What a strategy returns for one URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preview {
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    /// Replaces the derived domain when set
    pub domain: Option<String>,
    pub error: bool,
}

impl Preview {
    /// A preview with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = non_empty(summary.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = non_empty(image.into());
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Marks the preview as a failure placeholder.
    #[must_use]
    pub fn failed(mut self) -> Self {
        self.error = true;
        self
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Card treatment chosen from the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    /// Play overlay over the thumbnail
    Video,
    /// Social post icon when no image is available
    Social,
    /// Globe icon when no image is available
    Web,
}

impl PreviewKind {
    pub fn from_domain(domain: &str) -> Self {
        if domain.contains("youtu") {
            PreviewKind::Video
        } else if domain.contains("x.com") || domain.contains("twitter") {
            PreviewKind::Social
        } else {
            PreviewKind::Web
        }
    }
}

/// Host of `url` with a leading `www.` removed.
///
/// Falls back to the text between the scheme and the first `/`, `?` or `#`
/// when the URL does not parse, so a pending card always has a label.
pub fn domain_of(url: &str) -> String {
    let host = match Url::parse(url) {
        Ok(parsed) => parsed.host_str().map(str::to_string),
        Err(_) => None,
    };

    let host = host.unwrap_or_else(|| {
        let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
        rest.split(['/', '?', '#']).next().unwrap_or(rest).to_string()
    });

    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}

/// Palette for author avatars, indexed by [`avatar_color`].
pub const AVATAR_PALETTE: [&str; 15] = [
    "red", "orange", "amber", "yellow", "lime", "green", "emerald", "teal", "cyan", "sky", "blue",
    "indigo", "violet", "purple", "pink",
];

/// Stable avatar colour for an author name.
///
/// Uses the classic `hash = c + (hash << 5) - hash` over UTF-16 code units
/// with 32-bit shifts, so colours match what the web front end shows.
pub fn avatar_color(name: &str) -> &'static str {
    let mut hash: i64 = 0;
    for unit in name.encode_utf16() {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        hash = i64::from(unit).wrapping_add(shifted.wrapping_sub(hash));
    }
    let index = (hash.unsigned_abs() % AVATAR_PALETTE.len() as u64) as usize;
    AVATAR_PALETTE[index]
}

/// The part of a raw date token before the first comma.
///
/// `"3/1/24, 10:00:15"` becomes `"3/1/24"`.
pub fn short_date(date: &str) -> &str {
    date.split(',').next().unwrap_or(date)
}
