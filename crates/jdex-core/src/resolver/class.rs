use super::SiteContext;
use crate::fetcher::Page;
use crate::model::{Class, Declaration};
use crate::page::{collapse_whitespace, following_elements, has_class, is_tag};
use crate::{Error, Result};
use scraper::{ElementRef, Html, Selector};
use std::sync::{Arc, LazyLock};
use tracing::instrument;

/// The list item holding declaration and description on a class page.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static DESCRIPTION_ITEM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".description > ul > li").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static HR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("hr").unwrap());

/// Class construction and class page scraping.
pub struct ClassResolver {
    context: Arc<SiteContext>,
}

impl ClassResolver {
    /// Creates a resolver for the site described by `context`.
    pub const fn new(context: Arc<SiteContext>) -> Self {
        Self { context }
    }

    /// Creates the entity for a discovered class. No network access.
    pub fn build(&self, package: &str, name: &str, url: &str) -> Class {
        Class::new(package, name, url)
    }

    /// Fetches the declaration line of `class`.
    #[instrument(skip_all, fields(class = %class.key()))]
    pub async fn declaration(&self, class: &Class) -> Result<Declaration> {
        let page = self.context.fetch(class.url()).await?;
        let html = extract_declaration(&page)?;
        let text = self.context.convert(&html, page.url())?;
        Ok(Declaration::new(collapse_whitespace(&text)))
    }

    /// Fetches the prose description of `class`; empty when undocumented.
    #[instrument(skip_all, fields(class = %class.key()))]
    pub async fn description(&self, class: &Class) -> Result<String> {
        let page = self.context.fetch(class.url()).await?;
        let html = extract_description(&page)?;
        if html.is_empty() {
            return Ok(String::new());
        }
        self.context.convert(&html, page.url())
    }
}

/// First `<hr>` inside the class description list item.
fn description_rule<'a>(document: &'a Html, page: &Page) -> Result<ElementRef<'a>> {
    let item = document
        .select(&DESCRIPTION_ITEM_SELECTOR)
        .next()
        .ok_or_else(|| Error::malformed(page.url(), "class description list item not found"))?;
    item.select(&HR_SELECTOR)
        .next()
        .ok_or_else(|| Error::malformed(page.url(), "HR not found"))
}

/// Inner HTML of the first `<pre>` after the rule.
fn extract_declaration(page: &Page) -> Result<String> {
    let document = page.document();
    let rule = description_rule(&document, page)?;
    following_elements(rule)
        .find(|element| is_tag(*element, "pre"))
        .map(|pre| pre.inner_html())
        .ok_or_else(|| Error::malformed(page.url(), "declaration <pre> not found"))
}

/// Outer HTML of the first `.block` after the rule and everything after it.
fn extract_description(page: &Page) -> Result<String> {
    let document = page.document();
    let rule = description_rule(&document, page)?;
    Ok(following_elements(rule)
        .skip_while(|element| !has_class(*element, "block"))
        .map(|element| element.html())
        .collect())
}
