//! Page metadata extraction.
//!
//! Only the handful of tags a link card needs are read: Open Graph title,
//! description and image, `<title>`, the meta description, and body
//! paragraphs long enough to read as content.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[property="og:title"]"#));
static OG_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[property="og:description"]"#));
static OG_IMAGE: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[property="og:image"]"#));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[name="description"]"#));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));

fn selector(css: &str) -> Selector {
    Selector::parse(css)
        .unwrap_or_else(|e| panic!("built-in selector '{css}' failed to parse: {e}"))
}

/// Raw fields pulled from one HTML document. Empty values are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    /// Trimmed paragraph texts longer than the threshold, document order
    pub paragraphs: Vec<String>,
}

impl PageMetadata {
    /// Parses `html` and collects up to `paragraph_count` paragraphs longer
    /// than `paragraph_min_chars`.
    pub fn extract(html: &str, paragraph_min_chars: usize, paragraph_count: usize) -> Self {
        let document = Html::parse_document(html);

        let paragraphs = document
            .select(&PARAGRAPH)
            .map(element_text)
            .filter(|text| text.chars().count() > paragraph_min_chars)
            .take(paragraph_count)
            .collect();

        Self {
            og_title: meta_content(&document, &OG_TITLE),
            og_description: meta_content(&document, &OG_DESCRIPTION),
            og_image: meta_content(&document, &OG_IMAGE),
            title: document
                .select(&TITLE)
                .next()
                .map(element_text)
                .filter(|t| !t.is_empty()),
            meta_description: meta_content(&document, &META_DESCRIPTION),
            paragraphs,
        }
    }

    /// Open Graph title, then `<title>`.
    pub fn best_title(&self) -> Option<&str> {
        self.og_title.as_deref().or(self.title.as_deref())
    }

    /// Open Graph description, then the meta description.
    pub fn best_description(&self) -> Option<&str> {
        self.og_description
            .as_deref()
            .or(self.meta_description.as_deref())
    }

    /// The Open Graph image resolved against the page URL.
    pub fn image_url(&self, page_url: &str) -> Option<String> {
        let image = self.og_image.as_deref()?;
        match Url::parse(page_url).and_then(|base| base.join(image)) {
            Ok(resolved) => Some(resolved.to_string()),
            Err(_) => Some(image.to_string()),
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html><head>
  <title> Plain Title </title>
  <meta property="og:title" content="OG Title">
  <meta property="og:description" content="OG description">
  <meta property="og:image" content="/img/cover.png">
  <meta name="description" content="Meta description">
</head><body>
  <p>short</p>
  <p>This paragraph is comfortably longer than fifty characters in total.</p>
  <p>Another paragraph that also clears the fifty character threshold easily.</p>
</body></html>"#;

    #[test]
    fn test_extract_all_fields() {
        let page = PageMetadata::extract(PAGE, 50, 3);
        assert_eq!(page.og_title.as_deref(), Some("OG Title"));
        assert_eq!(page.title.as_deref(), Some("Plain Title"));
        assert_eq!(page.og_description.as_deref(), Some("OG description"));
        assert_eq!(page.meta_description.as_deref(), Some("Meta description"));
        assert_eq!(page.paragraphs.len(), 2);
        assert!(page.paragraphs[0].starts_with("This paragraph"));
    }

    #[test]
    fn test_priorities() {
        let page = PageMetadata::extract(PAGE, 50, 3);
        assert_eq!(page.best_title(), Some("OG Title"));
        assert_eq!(page.best_description(), Some("OG description"));

        let bare = PageMetadata::extract(
            r#"<html><head><title>Only</title><meta name="description" content="d"></head></html>"#,
            50,
            3,
        );
        assert_eq!(bare.best_title(), Some("Only"));
        assert_eq!(bare.best_description(), Some("d"));
    }

    #[test]
    fn test_relative_image_resolved() {
        let page = PageMetadata::extract(PAGE, 50, 3);
        assert_eq!(
            page.image_url("https://example.com/articles/1").as_deref(),
            Some("https://example.com/img/cover.png")
        );
    }

    #[test]
    fn test_paragraph_count_limit() {
        let body: String = (0..5)
            .map(|i| format!("<p>Paragraph number {i} which is definitely long enough to be kept.</p>"))
            .collect();
        let page = PageMetadata::extract(&format!("<html><body>{body}</body></html>"), 50, 3);
        assert_eq!(page.paragraphs.len(), 3);
        assert!(page.paragraphs[2].contains("number 2"));
    }

    #[test]
    fn test_empty_document() {
        let page = PageMetadata::extract("", 50, 3);
        assert_eq!(page, PageMetadata::default());
        assert!(page.best_title().is_none());
    }
}
