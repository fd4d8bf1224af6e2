use std::collections::{HashMap, HashSet};

use super::models::ExtractedLink;

/// Counts over a set of extracted links.
///
/// # Example
///
/// ```
/// use chatlinks::core::processor::LinkStats;
/// use chatlinks::parse;
///
/// let result = parse("\
/// [1/1/24] Alice: https://a.example https://a.example/2
/// [1/2/24] Bob: https://b.example");
///
/// let stats = LinkStats::from_links(&result.links);
/// assert_eq!(stats.total_links, 3);
/// assert_eq!(stats.by_author[0], ("Alice".to_string(), 2));
/// assert_eq!(stats.by_domain[0], ("a.example".to_string(), 2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkStats {
    pub total_links: usize,
    pub unique_urls: usize,
    /// Links per author, most active first, ties by name
    pub by_author: Vec<(String, usize)>,
    /// Links per domain, most linked first, ties by name
    pub by_domain: Vec<(String, usize)>,
}

impl LinkStats {
    pub fn from_links(links: &[ExtractedLink]) -> Self {
        let mut authors: HashMap<&str, usize> = HashMap::new();
        let mut domains: HashMap<String, usize> = HashMap::new();
        let mut urls: HashSet<&str> = HashSet::new();

        for link in links {
            *authors.entry(link.author.as_str()).or_default() += 1;
            *domains.entry(link.domain()).or_default() += 1;
            urls.insert(link.url.as_str());
        }

        Self {
            total_links: links.len(),
            unique_urls: urls.len(),
            by_author: ranked(authors.into_iter().map(|(k, v)| (k.to_string(), v))),
            by_domain: ranked(domains),
        }
    }

    /// Share of links that repeat an earlier URL, in percent.
    pub fn duplicate_ratio(&self) -> f64 {
        if self.total_links == 0 {
            return 0.0;
        }
        (1.0 - (self.unique_urls as f64 / self.total_links as f64)) * 100.0
    }
}

fn ranked(counts: impl IntoIterator<Item = (String, usize)>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(author: &str, url: &str) -> ExtractedLink {
        ExtractedLink::new(url, "d", author, 0, "m")
    }

    #[test]
    fn test_counts_and_ranking() {
        let links = vec![
            link("Bob", "https://x.com/a/status/1"),
            link("Alice", "https://www.example.com/1"),
            link("Alice", "https://example.com/2"),
            link("Carol", "https://example.com/2"),
        ];
        let stats = LinkStats::from_links(&links);

        assert_eq!(stats.total_links, 4);
        assert_eq!(stats.unique_urls, 3);
        assert_eq!(stats.by_author[0], ("Alice".to_string(), 2));
        assert_eq!(stats.by_author[1], ("Bob".to_string(), 1));
        assert_eq!(stats.by_author[2], ("Carol".to_string(), 1));
        assert_eq!(stats.by_domain[0], ("example.com".to_string(), 3));
        assert_eq!(stats.by_domain[1], ("x.com".to_string(), 1));
    }

    #[test]
    fn test_duplicate_ratio() {
        let stats = LinkStats::from_links(&[
            link("A", "https://a.example"),
            link("B", "https://a.example"),
        ]);
        assert!((stats.duplicate_ratio() - 50.0).abs() < 0.001);
        assert_eq!(LinkStats::default().duplicate_ratio(), 0.0);
    }
}
