//! The strategy seam.

use async_trait::async_trait;

use crate::error::ResolveError;
use crate::metadata::Preview;

/// One way of building a preview for a family of URLs.
///
/// The resolver asks each strategy in turn to [`claim`](Self::claim) a URL.
/// The first claim wins; its key (a post id, a video id, the URL itself) is
/// handed to [`fetch`](Self::fetch). If the fetch fails, the same strategy's
/// [`fallback`](Self::fallback) supplies a placeholder, so every URL ends in
/// a settled preview.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use chatlinks::error::ResolveError;
/// use chatlinks::metadata::Preview;
/// use chatlinks::resolver::PreviewStrategy;
///
/// struct Offline;
///
/// #[async_trait]
/// impl PreviewStrategy for Offline {
///     fn name(&self) -> &'static str {
///         "offline"
///     }
///
///     fn claim(&self, url: &str) -> Option<String> {
///         Some(url.to_string())
///     }
///
///     async fn fetch(&self, url: &str, _key: &str) -> Result<Preview, ResolveError> {
///         Ok(Preview::titled(url))
///     }
///
///     fn fallback(&self, url: &str, _key: &str, _err: &ResolveError) -> Preview {
///         Preview::titled(url).failed()
///     }
/// }
/// ```
#[async_trait]
pub trait PreviewStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the strategy's key for `url`, or `None` to pass.
    fn claim(&self, url: &str) -> Option<String>;

    /// Builds the preview. May touch the network.
    async fn fetch(&self, url: &str, key: &str) -> Result<Preview, ResolveError>;

    /// Placeholder used when [`fetch`](Self::fetch) fails.
    fn fallback(&self, url: &str, key: &str, err: &ResolveError) -> Preview;
}
