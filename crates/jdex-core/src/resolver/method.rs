use super::SiteContext;
use crate::DocIndex;
use crate::fetcher::Page;
use crate::model::{Class, InheritedGroup, Method, MethodRecord, MethodTable, SupertypeKind};
use crate::page::{
    absolute_url, anchors_with_prefix, collapse_whitespace, element_children, find_anchor,
    following_elements, has_class, is_tag, self_and_following, text_of,
};
use crate::query::erase;
use crate::{Error, Result};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use tracing::{debug, instrument};

const METHOD_SUMMARY_ANCHOR: &str = "method.summary";
const INHERITED_ANCHOR_PREFIX: &str = "methods.inherited.from.class.";

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static ROW_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static COL_FIRST_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".colFirst").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static COL_LAST_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".colLast").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static MEMBER_NAME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".memberNameLink").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static CLASS_DESCRIPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".description").unwrap());

/// One summary row, still as HTML.
struct RawRow {
    name: String,
    url: String,
    return_type: String,
    declaration: String,
    short_description: String,
}

/// What one parse of a class page yields before conversion.
struct RawMethodPage {
    rows: Vec<RawRow>,
    inherited: Vec<InheritedGroup>,
}

/// Method table scraping and the inherited-method walk.
pub struct MethodResolver {
    context: Arc<SiteContext>,
}

impl MethodResolver {
    /// Creates a resolver for the site described by `context`.
    pub const fn new(context: Arc<SiteContext>) -> Self {
        Self { context }
    }

    /// Fetches the class page once and reads both the methods it declares and
    /// its "methods inherited from" markers.
    ///
    /// A page without any method summary but with the class description
    /// structure has no methods. A summary that lists inherited methods only
    /// has no own methods.
    #[instrument(skip_all, fields(class = %class.key()))]
    pub async fn method_table(&self, class: &Class) -> Result<MethodTable> {
        let page = self.context.fetch(class.url()).await?;
        let raw = scrape_method_page(&page)?;

        let mut seen = HashSet::new();
        let mut own = Vec::with_capacity(raw.rows.len());
        for row in raw.rows {
            if !seen.insert(row.url.clone()) {
                continue;
            }
            let record = MethodRecord {
                return_type: collapse_whitespace(&self.context.convert(&row.return_type, page.url())?),
                declaration: collapse_whitespace(&self.context.convert(&row.declaration, page.url())?),
                short_description: self.context.convert(&row.short_description, page.url())?,
                name: row.name,
                url: row.url,
            };
            own.push(Arc::new(Method::new(class.key().clone(), record, false)));
        }

        debug!(
            own = own.len(),
            inherited_groups = raw.inherited.len(),
            "parsed method summary"
        );
        Ok(MethodTable {
            own,
            inherited: raw.inherited,
        })
    }

    /// Own methods of `class` plus the methods its page lists as inherited.
    ///
    /// Each supertype named by a marker is looked up in `index`; from its own
    /// method table (not its inherited ones) the methods the marker links to
    /// are picked and re-homed onto `class` as inherited copies. A listed
    /// name whose link reaches none of those methods falls back to matching
    /// by name. A copy is dropped when a method already collected has the
    /// same name and parameter types, so overloads overridden on `class`
    /// are not inherited a second time. Supertypes outside the index are
    /// skipped.
    #[instrument(skip_all, fields(class = %class.key()))]
    pub async fn methods_for_class(&self, index: &DocIndex, class: &Class) -> Result<Vec<Arc<Method>>> {
        let table = index.method_table(class).await?;
        let mut methods = table.own.clone();

        for group in &table.inherited {
            let Some(supertype) = index.resolve_supertype(&group.supertype) else {
                debug!(supertype = %group.supertype, "supertype not indexed, skipping inherited methods");
                continue;
            };
            if supertype.key() == class.key() {
                continue;
            }

            let supertype_table = index.method_table(&supertype).await?;
            let before = methods.len();
            for method in select_inherited(group, &supertype_table.own) {
                if methods.iter().any(|present| same_signature(present, method)) {
                    continue;
                }
                methods.push(Arc::new(method.inherited_by(class.key().clone())));
            }
            debug!(
                supertype = %supertype.key(),
                inherited = methods.len() - before,
                "attached inherited methods"
            );
        }

        Ok(methods)
    }

    /// Fetches the full prose of `method` from its detail block.
    #[instrument(skip_all, fields(method = %method.name(), class = %method.class()))]
    pub async fn describe(&self, method: &Method) -> Result<String> {
        let page = self.context.fetch(method.url()).await?;
        let html = extract_method_description(&page, method.url())?;
        if html.is_empty() {
            return Ok(String::new());
        }
        self.context.convert(&html, method.url())
    }
}

/// Methods of `candidates` the marker links to, plus name matches for the
/// listed names whose links reach none of them.
fn select_inherited<'a>(
    group: &InheritedGroup,
    candidates: &'a [Arc<Method>],
) -> Vec<&'a Arc<Method>> {
    let linked: Vec<&Arc<Method>> = candidates
        .iter()
        .filter(|method| group.urls.iter().any(|url| url == method.url()))
        .collect();
    let unlinked: Vec<&Arc<Method>> = candidates
        .iter()
        .filter(|method| group.names.iter().any(|name| name == method.name()))
        .filter(|method| !linked.iter().any(|found| found.name() == method.name()))
        .collect();
    linked.into_iter().chain(unlinked).collect()
}

/// Same name and the same erased parameter types, in order.
fn same_signature(a: &Method, b: &Method) -> bool {
    a.name() == b.name()
        && a.parameters().len() == b.parameters().len()
        && a
            .parameters()
            .iter()
            .zip(b.parameters())
            .all(|(x, y)| erase(&x.type_name) == erase(&y.type_name))
}

fn scrape_method_page(page: &Page) -> Result<RawMethodPage> {
    let document = page.document();
    let inherited = parse_inherited_groups(&document, page.url());

    let rows = match find_anchor(&document, METHOD_SUMMARY_ANCHOR) {
        Some(anchor) => match self_and_following(anchor).find(|element| is_tag(*element, "table")) {
            Some(table) => parse_rows(&document, table, page)?,
            None if !inherited.is_empty() => Vec::new(),
            None => return Err(Error::malformed(page.url(), "method summary table not found")),
        },
        None if document.select(&CLASS_DESCRIPTION_SELECTOR).next().is_some() => Vec::new(),
        None => return Err(Error::malformed(page.url(), "method summary anchor not found")),
    };

    Ok(RawMethodPage { rows, inherited })
}

fn parse_rows(document: &Html, table: ElementRef<'_>, page: &Page) -> Result<Vec<RawRow>> {
    let mut rows = Vec::new();

    for row in table.select(&ROW_SELECTOR) {
        let first = row
            .select(&COL_FIRST_SELECTOR)
            .next()
            .ok_or_else(|| Error::malformed(page.url(), "colFirst not found"))?;
        let last = row
            .select(&COL_LAST_SELECTOR)
            .next()
            .ok_or_else(|| Error::malformed(page.url(), "colLast not found"))?;
        if is_tag(first, "th") {
            continue;
        }

        let member = last
            .select(&MEMBER_NAME_SELECTOR)
            .next()
            .ok_or_else(|| Error::malformed(page.url(), "memberNameLink not found"))?;
        let url = member
            .select(&LINK_SELECTOR)
            .next()
            .and_then(|link| link.value().attr("href"))
            .and_then(|href| absolute_url(page.url(), href))
            .ok_or_else(|| Error::malformed(page.url(), "method link not found"))?;
        let name = text_of(member);
        let declaration = declaration_html(document, &url).ok_or_else(|| {
            Error::malformed(page.url(), format!("declaration of '{name}' not found"))
        })?;
        let short_description = element_children(last)
            .filter(|child| has_class(*child, "block"))
            .map(|block| block.inner_html())
            .collect();

        rows.push(RawRow {
            name,
            url,
            return_type: first.inner_html(),
            declaration,
            short_description,
        });
    }

    Ok(rows)
}

/// Signature HTML of the detail block the URL fragment points at:
/// `<a name=fragment/><ul><li><h4/><pre>signature</pre>...`.
fn declaration_html(document: &Html, method_url: &str) -> Option<String> {
    let (_, fragment) = method_url.split_once('#')?;
    let anchor = find_anchor(document, fragment)?;
    let list = following_elements(anchor).next()?;
    let item = element_children(list).next()?;
    element_children(item).nth(1).map(|signature| signature.inner_html())
}

fn parse_inherited_groups(document: &Html, page_url: &str) -> Vec<InheritedGroup> {
    let mut seen = HashSet::new();
    anchors_with_prefix(document, INHERITED_ANCHOR_PREFIX)
        .into_iter()
        .filter_map(|(anchor_name, anchor)| {
            let supertype = anchor_name.strip_prefix(INHERITED_ANCHOR_PREFIX)?.to_string();
            if supertype.is_empty() || !seen.insert(supertype.clone()) {
                return None;
            }
            let kind = following_elements(anchor)
                .find(|element| is_tag(*element, "h3"))
                .map_or(SupertypeKind::Class, |heading| {
                    if text_of(heading).split_whitespace().any(|word| word == "interface") {
                        SupertypeKind::Interface
                    } else {
                        SupertypeKind::Class
                    }
                });
            let links: Vec<ElementRef<'_>> = following_elements(anchor)
                .find(|element| is_tag(*element, "code"))
                .map(|code| code.select(&LINK_SELECTOR).collect())
                .unwrap_or_default();
            let names = links
                .iter()
                .map(|link| text_of(*link))
                .filter(|name| !name.is_empty())
                .collect();
            let urls = links
                .iter()
                .filter_map(|link| link.value().attr("href"))
                .filter_map(|href| absolute_url(page_url, href))
                .collect();
            Some(InheritedGroup {
                supertype,
                kind,
                names,
                urls,
            })
        })
        .collect()
}

/// Everything after heading and signature in each item of the detail list.
fn extract_method_description(page: &Page, method_url: &str) -> Result<String> {
    let (_, fragment) = method_url
        .split_once('#')
        .ok_or_else(|| Error::malformed(method_url, "method URL has no anchor"))?;
    let document = page.document();
    let anchor = find_anchor(&document, fragment)
        .ok_or_else(|| Error::malformed(page.url(), format!("anchor '{fragment}' not found")))?;
    let list = following_elements(anchor)
        .next()
        .ok_or_else(|| Error::malformed(page.url(), format!("detail list after '{fragment}' not found")))?;

    Ok(element_children(list)
        .flat_map(|item| element_children(item).skip(2))
        .map(|element| element.html())
        .collect())
}
