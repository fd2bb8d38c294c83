//! Scrapers turning documentation pages into entity details.
//!
//! Resolvers fetch and parse; they never memoize. Memoization is the job of
//! the entity cells driven by [`crate::DocIndex`], which keeps "fetch at most
//! once" in one place.
//!
//! Every resolver shares a [`SiteContext`]: the page source, the markup
//! converter and the site root.

mod class;
mod method;
mod package;

pub use class::ClassResolver;
pub use method::MethodResolver;
pub use package::PackageResolver;

use crate::fetcher::{Page, PageFetcher};
use crate::markup::{MarkdownConverter, MarkupConverter};
use crate::{Error, Result, Settings};
use std::sync::Arc;
use tracing::warn;

/// What every resolver needs to reach and read the site.
pub struct SiteContext {
    fetcher: Arc<dyn PageFetcher>,
    converter: Arc<dyn MarkupConverter>,
    base_url: String,
    ignore_unknown_tags: bool,
}

impl SiteContext {
    /// Creates a context. `base_url` is normalized to end with `/`.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        converter: Arc<dyn MarkupConverter>,
        base_url: impl AsRef<str>,
        ignore_unknown_tags: bool,
    ) -> Self {
        Self {
            fetcher,
            converter,
            base_url: format!("{}/", base_url.as_ref().trim().trim_end_matches('/')),
            ignore_unknown_tags,
        }
    }

    /// Context for `settings`, reading pages through `fetcher` and converting
    /// with the default [`MarkdownConverter`].
    pub fn from_settings(settings: &Settings, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self::new(
            fetcher,
            Arc::new(MarkdownConverter),
            settings.base_url(),
            settings.markup.ignore_unknown_tags,
        )
    }

    /// Site root, always ending with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether unknown tags are rendered instead of rejected.
    pub const fn ignore_unknown_tags(&self) -> bool {
        self.ignore_unknown_tags
    }

    /// Fetches a page.
    pub async fn fetch(&self, url: &str) -> Result<Page> {
        self.fetcher.fetch(url).await
    }

    /// Converts an HTML fragment found on a page served from `page_url`.
    ///
    /// In strict mode an unknown tag does not lose the whole text: the
    /// conversion is logged and repeated leniently.
    pub fn convert(&self, html: &str, page_url: &str) -> Result<String> {
        match self.converter.convert(html, page_url, self.ignore_unknown_tags) {
            Err(Error::UnknownTag(tag)) if !self.ignore_unknown_tags => {
                warn!(tag = %tag, url = page_url, "unknown tag, rendering leniently");
                self.converter.convert(html, page_url, true)
            },
            other => other,
        }
    }
}
