//! Request relaying.
//!
//! Some targets refuse requests that do not come from a browser. A relay
//! is a proxy that takes the full target URL, percent-encoded, appended to a
//! fixed prefix: `https://corsproxy.io/?https%3A%2F%2Fexample.com%2F`.

use url::form_urlencoded::byte_serialize;

/// Rewrites target URLs to go through a relay, or leaves them alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relay {
    prefix: Option<String>,
}

impl Relay {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// A relay that fetches targets directly.
    pub fn direct() -> Self {
        Self { prefix: None }
    }

    pub fn is_direct(&self) -> bool {
        self.prefix.is_none()
    }

    /// The URL to actually request for `target`.
    pub fn wrap(&self, target: &str) -> String {
        match &self.prefix {
            Some(prefix) => {
                let encoded: String = byte_serialize(target.as_bytes()).collect();
                format!("{prefix}{encoded}")
            }
            None => target.to_string(),
        }
    }
}
