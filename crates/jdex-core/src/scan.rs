//! Discovery of every class on the documentation site.
//!
//! The site's `allclasses-noframe.html` lists each class once as
//! `<li><a href="pkg/Name.html">Name</a></li>`. The same simple name can
//! appear several times (one per package), so the result is a multimap.

use crate::fetcher::Page;
use crate::page::{absolute_url, element_children, is_tag, text_of};
use crate::resolver::SiteContext;
use crate::{Error, Result};
use scraper::Selector;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, LazyLock};
use tracing::{info, instrument, warn};

/// Listing page with every class of the site, relative to the base URL.
pub const CLASS_LISTING_PAGE: &str = "allclasses-noframe.html";

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static LIST_ITEM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());

/// Simple class name to the URLs of every class carrying it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassNameCollection {
    links: BTreeMap<String, BTreeSet<String>>,
}

impl ClassNameCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url` under `name`. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>, url: impl Into<String>) -> bool {
        self.links.entry(name.into()).or_default().insert(url.into())
    }

    /// URLs recorded for `name`.
    pub fn urls(&self, name: &str) -> impl Iterator<Item = &str> {
        self.links
            .get(name)
            .into_iter()
            .flat_map(|urls| urls.iter().map(String::as_str))
    }

    /// Number of distinct simple names.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Number of class URLs across all names.
    pub fn url_count(&self) -> usize {
        self.links.values().map(BTreeSet::len).sum()
    }

    /// Returns `true` when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Every `(name, urls)` pair, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.links.iter().map(|(name, urls)| (name.as_str(), urls))
    }
}

/// Reads the class listing of a site.
pub struct SiteIndexScanner {
    context: Arc<SiteContext>,
}

impl SiteIndexScanner {
    /// Creates a scanner for the site described by `context`.
    pub const fn new(context: Arc<SiteContext>) -> Self {
        Self { context }
    }

    /// URL of the class listing page.
    pub fn listing_url(&self) -> String {
        format!("{}{CLASS_LISTING_PAGE}", self.context.base_url())
    }

    /// Fetches and parses the class listing.
    ///
    /// Fails with [`Error::Index`] when the listing cannot be fetched or has
    /// no class entries.
    #[instrument(skip_all, fields(base_url = %self.context.base_url()))]
    pub async fn scan(&self) -> Result<ClassNameCollection> {
        let url = self.listing_url();
        let page = self.context.fetch(&url).await.map_err(|e| {
            warn!(category = e.category(), "class listing unavailable: {e}");
            Error::Index(format!("failed to fetch class listing '{url}': {e}"))
        })?;

        let collection = parse_class_listing(&page);
        if collection.is_empty() {
            return Err(Error::Index(format!(
                "class listing '{}' contains no class entries",
                page.url()
            )));
        }

        info!(
            names = collection.len(),
            classes = collection.url_count(),
            "scanned class listing"
        );
        Ok(collection)
    }
}

/// Collects `(text, absolute href)` of every list item whose first element
/// child is a link.
fn parse_class_listing(page: &Page) -> ClassNameCollection {
    let document = page.document();
    let mut collection = ClassNameCollection::new();

    for item in document.select(&LIST_ITEM_SELECTOR) {
        let Some(link) = element_children(item).next().filter(|first| is_tag(*first, "a")) else {
            continue;
        };
        let name = text_of(link);
        let url = link
            .value()
            .attr("href")
            .and_then(|href| absolute_url(page.url(), href));

        match url {
            Some(url) if !name.is_empty() => {
                collection.insert(name, url);
            },
            _ => {},
        }
    }

    collection
}
