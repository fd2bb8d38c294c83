use super::SiteContext;
use crate::fetcher::Page;
use crate::model::Package;
use crate::page::{find_anchor, has_class, self_and_following, text_of};
use crate::{Error, Result};
use scraper::Selector;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, instrument};

/// Overview page listing every package, relative to the base URL.
pub const OVERVIEW_PAGE: &str = "overview-summary.html";

const PACKAGE_PAGE: &str = "package-summary.html";
const DESCRIPTION_ANCHOR: &str = "package.description";

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static OVERVIEW_ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.overviewSummary tr").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static TH_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static TD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Package naming and package page scraping.
pub struct PackageResolver {
    context: Arc<SiteContext>,
}

impl PackageResolver {
    /// Creates a resolver for the site described by `context`.
    pub const fn new(context: Arc<SiteContext>) -> Self {
        Self { context }
    }

    /// Fully qualified package name of the class documented at `class_url`.
    ///
    /// `https://site/api/java/util/List.html` gives `java.util`.
    pub fn name_from_url(&self, class_url: &str) -> Result<String> {
        let relative = class_url
            .strip_prefix(self.context.base_url())
            .ok_or_else(|| {
                Error::InvalidLink(format!(
                    "'{class_url}' is outside of '{}'",
                    self.context.base_url()
                ))
            })?;
        let relative = relative
            .split(['#', '?'])
            .next()
            .unwrap_or_default();

        match relative.rsplit_once('/') {
            Some((path, _)) if !path.is_empty() => Ok(path.replace('/', ".")),
            _ => Err(Error::InvalidLink(format!(
                "'{class_url}' has no package path"
            ))),
        }
    }

    /// URL of the summary page of package `name`.
    pub fn package_url(&self, name: &str) -> String {
        format!(
            "{}{}/{PACKAGE_PAGE}",
            self.context.base_url(),
            name.replace('.', "/")
        )
    }

    /// Fetches the prose description of `package`.
    ///
    /// A page without a description anchor documents nothing and yields an
    /// empty string.
    #[instrument(skip_all, fields(package = %package.name()))]
    pub async fn describe(&self, package: &Package) -> Result<String> {
        let page = self.context.fetch(package.url()).await?;
        match extract_description(&page)? {
            Some(html) => self.context.convert(&html, page.url()),
            None => {
                debug!("package has no description anchor");
                Ok(String::new())
            },
        }
    }

    /// Package name to one-line summary, from the overview page.
    #[instrument(skip_all)]
    pub async fn short_descriptions(&self) -> Result<BTreeMap<String, String>> {
        let url = format!("{}{OVERVIEW_PAGE}", self.context.base_url());
        let page = self.context.fetch(&url).await?;
        let summaries = parse_overview(&page);
        debug!(packages = summaries.len(), "parsed package overview");
        Ok(summaries)
    }
}

/// Inner HTML of the first `.block` at or after the description anchor.
fn extract_description(page: &Page) -> Result<Option<String>> {
    let document = page.document();
    let Some(anchor) = find_anchor(&document, DESCRIPTION_ANCHOR) else {
        return Ok(None);
    };

    self_and_following(anchor)
        .find(|element| has_class(*element, "block"))
        .map(|block| Some(block.inner_html()))
        .ok_or_else(|| Error::malformed(page.url(), "package description block not found"))
}

fn parse_overview(page: &Page) -> BTreeMap<String, String> {
    let document = page.document();
    let mut summaries = BTreeMap::new();

    for row in document.select(&OVERVIEW_ROW_SELECTOR) {
        if row.select(&TH_SELECTOR).next().is_some() {
            continue;
        }
        let mut cells = row.select(&TD_SELECTOR);
        let Some(name) = cells
            .next()
            .and_then(|cell| cell.select(&LINK_SELECTOR).next())
            .map(text_of)
        else {
            continue;
        };
        let summary = cells.next().map(text_of).unwrap_or_default();
        if !name.is_empty() {
            summaries.insert(name, summary);
        }
    }

    summaries
}
