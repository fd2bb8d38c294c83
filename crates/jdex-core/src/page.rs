//! DOM navigation helpers shared by the scanner and the resolvers.
//!
//! Javadoc 8 pages are addressed through in-page anchors (`<a name="...">`,
//! or `id` on newer generators) followed by sibling elements, so most lookups
//! are "find the anchor, then walk its element siblings".

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Any element that can act as an in-page anchor.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[name], [id]").unwrap());

/// First element whose `name` or `id` attribute equals `name`.
pub fn find_anchor<'a>(document: &'a Html, name: &str) -> Option<ElementRef<'a>> {
    document.select(&ANCHOR_SELECTOR).find(|element| {
        let value = element.value();
        value.attr("name") == Some(name) || value.attr("id") == Some(name)
    })
}

/// Every element whose `name` or `id` attribute starts with `prefix`, with the
/// matching attribute value.
pub fn anchors_with_prefix<'a>(document: &'a Html, prefix: &str) -> Vec<(String, ElementRef<'a>)> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| {
            let value = element.value();
            [value.attr("name"), value.attr("id")]
                .into_iter()
                .flatten()
                .find(|v| v.starts_with(prefix))
                .map(|v| (v.to_string(), element))
        })
        .collect()
}

/// Element siblings after `element`, in document order.
pub fn following_elements(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}

/// `element` itself followed by its element siblings.
///
/// Mirrors a "search from here onward" walk where the anchor may already be
/// the element looked for.
pub fn self_and_following(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    std::iter::once(element).chain(following_elements(element))
}

/// Element children of `element`.
pub fn element_children(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.children().filter_map(ElementRef::wrap)
}

/// Returns `true` when the tag name equals `tag` (ASCII case-insensitive).
pub fn is_tag(element: ElementRef<'_>, tag: &str) -> bool {
    element.value().name().eq_ignore_ascii_case(tag)
}

/// Returns `true` when `class` is one of the element's classes.
pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Visible text of an element with whitespace runs collapsed.
pub fn text_of(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Resolves `href` against `base`, as a browser would.
pub fn absolute_url(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(String::from)
}

/// Collapses every whitespace run (non-breaking spaces included) to a single
/// space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
