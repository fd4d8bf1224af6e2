//! Filter extracted links by author, date window, domain and text.
//!
//! This module provides [`LinkFilter`] for defining filter criteria and
//! [`apply_filters`] for filtering link collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | After | [`with_date_from`](LinkFilter::with_date_from) | Links on or after date |
//! | Before | [`with_date_to`](LinkFilter::with_date_to) | Links on or before date |
//! | Author | [`with_author`](LinkFilter::with_author) | Links posted by one author |
//! | Domain | [`with_domain`](LinkFilter::with_domain) | Links to one site |
//! | Query | [`with_query`](LinkFilter::with_query) | Substring of URL, author or message |
//!
//! # Example
//!
//! ```
//! use chatlinks::core::filter::{LinkFilter, apply_filters};
//! use chatlinks::parse;
//!
//! # fn main() -> chatlinks::Result<()> {
//! let result = parse("\
//! [3/1/24, 10:00] Alice: https://www.rust-lang.org/learn
//! [3/2/24, 11:00] Bob: https://example.com/news
//! [6/2/24, 11:00] alice: https://example.com/later");
//!
//! let filter = LinkFilter::new()
//!     .with_author("ALICE")
//!     .with_date_from("2024-03-01")?
//!     .with_date_to("2024-03-31")?;
//!
//! let links = apply_filters(result.links, &filter);
//! assert_eq!(links.len(), 1);
//! assert_eq!(links[0].domain(), "rust-lang.org");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Author and domain matching is case-insensitive for ASCII characters
//! - Links whose date fell back to the parse clock are compared by that value
//! - Multiple filters are combined with AND logic

use chrono::{DateTime, NaiveDate, Utc};

use crate::core::models::ExtractedLink;
use crate::error::ChatlinksError;

/// Criteria for selecting links. All active criteria must match.
#[derive(Debug, Clone, Default)]
pub struct LinkFilter {
    /// Include only links on or after this timestamp.
    pub after: Option<DateTime<Utc>>,

    /// Include only links on or before this timestamp.
    pub before: Option<DateTime<Utc>>,

    /// Include only links from this author (case-insensitive).
    pub author: Option<String>,

    /// Include only links whose domain equals or ends with this value.
    pub domain: Option<String>,

    /// Include only links whose URL, author or message contains this text.
    pub query: Option<String>,
}

impl LinkFilter {
    /// Creates a new empty filter. All links pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlinksError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlinksError> {
        let day = parse_day(date_str)?;
        self.after = day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlinksError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlinksError> {
        let day = parse_day(date_str)?;
        // end of the day, inclusive
        self.before = day.and_hms_milli_opt(23, 59, 59, 999).map(|dt| dt.and_utc());
        Ok(self)
    }

    /// Sets the start timestamp directly.
    #[must_use]
    pub fn with_after(mut self, dt: DateTime<Utc>) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the end timestamp directly.
    #[must_use]
    pub fn with_before(mut self, dt: DateTime<Utc>) -> Self {
        self.before = Some(dt);
        self
    }

    /// Sets the author filter.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the domain filter. A leading `www.` is ignored.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        let domain = domain.strip_prefix("www.").unwrap_or(&domain).to_string();
        self.domain = Some(domain);
        self
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some()
            || self.before.is_some()
            || self.author.is_some()
            || self.domain.is_some()
            || self.query.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if `link` satisfies every active criterion.
    pub fn matches(&self, link: &ExtractedLink) -> bool {
        if let Some(ref author) = self.author {
            if !link.author.eq_ignore_ascii_case(author) {
                return false;
            }
        }

        if self.after.is_some_and(|after| link.timestamp < after.timestamp_millis()) {
            return false;
        }
        if self.before.is_some_and(|before| link.timestamp > before.timestamp_millis()) {
            return false;
        }

        if let Some(ref domain) = self.domain {
            let link_domain = link.domain().to_ascii_lowercase();
            let wanted = domain.to_ascii_lowercase();
            if link_domain != wanted && !link_domain.ends_with(&format!(".{wanted}")) {
                return false;
            }
        }

        if let Some(ref query) = self.query {
            let needle = query.to_lowercase();
            let found = [&link.url, &link.author, &link.original_message]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }

        true
    }
}

fn parse_day(date_str: &str) -> Result<NaiveDate, ChatlinksError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatlinksError::invalid_date(date_str))
}

/// Keeps the links that match all active filters, preserving order.
pub fn apply_filters(links: Vec<ExtractedLink>, filter: &LinkFilter) -> Vec<ExtractedLink> {
    if !filter.is_active() {
        return links;
    }

    links.into_iter().filter(|link| filter.matches(link)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_link(author: &str, url: &str, day: &str) -> ExtractedLink {
        let naive = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
        let ts = naive.and_hms_opt(12, 0, 0).unwrap().and_utc().timestamp_millis();
        ExtractedLink::new(url, day, author, ts, format!("look {url}"))
    }

    #[test]
    fn test_filter_by_author() {
        let links = vec![
            make_link("Alice", "https://a.example", "2024-01-01"),
            make_link("Bob", "https://b.example", "2024-01-01"),
            make_link("alice", "https://c.example", "2024-01-01"),
        ];

        let filtered = apply_filters(links, &LinkFilter::new().with_author("Alice"));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|l| l.author.eq_ignore_ascii_case("alice")));
    }

    #[test]
    fn test_filter_by_date_window() {
        let links = vec![
            make_link("A", "https://old.example", "2024-01-01"),
            make_link("A", "https://mid.example", "2024-03-15"),
            make_link("A", "https://new.example", "2024-06-15"),
        ];

        let filter = LinkFilter::new()
            .with_date_from("2024-03-01")
            .unwrap()
            .with_date_to("2024-03-15")
            .unwrap();
        let filtered = apply_filters(links, &filter);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].url, "https://mid.example");
    }

    #[test]
    fn test_filter_by_domain() {
        let links = vec![
            make_link("A", "https://www.youtube.com/watch?v=1", "2024-01-01"),
            make_link("A", "https://m.youtube.com/watch?v=2", "2024-01-01"),
            make_link("A", "https://notyoutube.com/x", "2024-01-01"),
        ];

        let filtered = apply_filters(links, &LinkFilter::new().with_domain("www.YouTube.com"));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_by_query() {
        let links = vec![
            make_link("Alice", "https://a.example/rust", "2024-01-01"),
            make_link("Bob", "https://b.example/go", "2024-01-01"),
        ];

        let filtered = apply_filters(links.clone(), &LinkFilter::new().with_query("RUST"));
        assert_eq!(filtered.len(), 1);

        let filtered = apply_filters(links, &LinkFilter::new().with_query("bob"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].author, "Bob");
    }

    #[test]
    fn test_invalid_date_format() {
        let result = LinkFilter::new().with_date_from("01-01-2024");
        assert!(matches!(result, Err(ChatlinksError::InvalidDate { .. })));
        assert!(LinkFilter::new().with_date_to("tomorrow").is_err());
    }

    #[test]
    fn test_combined_filters() {
        let links = vec![
            make_link("Alice", "https://a.example", "2024-01-01"),
            make_link("Alice", "https://b.example", "2024-06-15"),
            make_link("Bob", "https://c.example", "2024-06-15"),
        ];

        let filter = LinkFilter::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_author("alice");
        let filtered = apply_filters(links, &filter);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].url, "https://b.example");
    }

    #[test]
    fn test_with_datetime_directly() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let filter = LinkFilter::new().with_after(dt);
        assert_eq!(filter.after, Some(dt));
        assert!(filter.has_date_filter());
    }

    #[test]
    fn test_is_active() {
        assert!(!LinkFilter::new().is_active());
        assert!(LinkFilter::new().with_author("Alice").is_active());
        assert!(LinkFilter::new().with_domain("x.com").is_active());
        assert!(LinkFilter::new().with_query("q").is_active());
    }

    #[test]
    fn test_inactive_filter_passes_everything() {
        let links = vec![make_link("A", "https://a.example", "2024-01-01")];
        assert_eq!(apply_filters(links, &LinkFilter::new()).len(), 1);
    }
}
