//! The queryable index over one documentation site.
//!
//! [`DocIndex::build`] scans the site once and creates every package and
//! class as a cheap stub. Everything that needs a page fetch afterwards goes
//! through the lazy accessors, which memoize on the entity so a page is read
//! at most once per field, however many tasks ask at the same time.

use crate::lazy::memoize;
use crate::model::{Class, Declaration, Method, MethodTable, Package};
use crate::query::MethodQuery;
use crate::resolver::{ClassResolver, MethodResolver, PackageResolver, SiteContext};
use crate::scan::SiteIndexScanner;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Number of fuzzy suggestions offered for a failed lookup.
pub const DEFAULT_SUGGESTIONS: usize = 5;

/// A class listing entry that could not be indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    /// Simple name from the listing.
    pub name: String,
    /// Link from the listing.
    pub url: String,
    /// Why it was skipped.
    pub reason: String,
}

/// Facts about a finished build.
#[derive(Debug, Clone, Serialize)]
pub struct IndexSummary {
    /// Site root the index was built from.
    pub base_url: String,
    /// Number of indexed classes.
    pub class_count: usize,
    /// Number of indexed packages.
    pub package_count: usize,
    /// Listing entries left out of the index.
    pub skipped: Vec<SkippedEntry>,
    /// When the build finished.
    pub built_at: DateTime<Utc>,
    /// How long the build took.
    pub build_millis: u64,
}

/// Name maps plus the resolvers that fill entities in on demand.
pub struct DocIndex {
    context: Arc<SiteContext>,
    package_resolver: PackageResolver,
    class_resolver: ClassResolver,
    method_resolver: MethodResolver,
    class_map: BTreeMap<String, Vec<Arc<Class>>>,
    package_map: BTreeMap<String, Arc<Package>>,
    summary: IndexSummary,
}

impl DocIndex {
    /// Scans the site and builds the name maps.
    ///
    /// Only the class listing and the package overview are fetched. A
    /// listing entry whose link cannot be mapped onto a package is skipped
    /// and reported in the [`IndexSummary`]; a missing overview only costs
    /// the package short descriptions.
    #[instrument(skip_all, fields(base_url = %context.base_url()))]
    pub async fn build(context: Arc<SiteContext>) -> Result<Self> {
        let started = Instant::now();
        let scanner = SiteIndexScanner::new(Arc::clone(&context));
        let package_resolver = PackageResolver::new(Arc::clone(&context));
        let class_resolver = ClassResolver::new(Arc::clone(&context));
        let method_resolver = MethodResolver::new(Arc::clone(&context));

        let listing = scanner.scan().await?;
        let short_descriptions = match package_resolver.short_descriptions().await {
            Ok(summaries) => summaries,
            Err(e) => {
                warn!(category = e.category(), "package overview unavailable: {e}");
                BTreeMap::new()
            },
        };

        let mut class_map: BTreeMap<String, Vec<Arc<Class>>> = BTreeMap::new();
        let mut classes_by_package: BTreeMap<String, Vec<Arc<Class>>> = BTreeMap::new();
        let mut skipped = Vec::new();

        for (name, urls) in listing.iter() {
            for url in urls {
                match package_resolver.name_from_url(url) {
                    Ok(package) => {
                        let class = Arc::new(class_resolver.build(&package, name, url));
                        class_map
                            .entry(name.to_string())
                            .or_default()
                            .push(Arc::clone(&class));
                        classes_by_package.entry(package).or_default().push(class);
                    },
                    Err(e) => {
                        warn!(class = name, url = %url, "skipping class: {e}");
                        skipped.push(SkippedEntry {
                            name: name.to_string(),
                            url: url.clone(),
                            reason: e.to_string(),
                        });
                    },
                }
            }
        }

        if class_map.is_empty() {
            return Err(Error::Index(format!(
                "no class of '{}' could be indexed",
                context.base_url()
            )));
        }

        for package in short_descriptions.keys() {
            classes_by_package.entry(package.clone()).or_default();
        }

        let package_map: BTreeMap<String, Arc<Package>> = classes_by_package
            .into_iter()
            .map(|(name, classes)| {
                let url = package_resolver.package_url(&name);
                let short = short_descriptions.get(&name).cloned().unwrap_or_default();
                let package = Arc::new(Package::new(name.clone(), url, short, classes));
                (name, package)
            })
            .collect();

        let summary = IndexSummary {
            base_url: context.base_url().to_string(),
            class_count: class_map.values().map(Vec::len).sum(),
            package_count: package_map.len(),
            skipped,
            built_at: Utc::now(),
            build_millis: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        info!(
            classes = summary.class_count,
            packages = summary.package_count,
            skipped = summary.skipped.len(),
            elapsed_ms = summary.build_millis,
            "index built"
        );

        Ok(Self {
            context,
            package_resolver,
            class_resolver,
            method_resolver,
            class_map,
            package_map,
            summary,
        })
    }

    /// Shared site context.
    pub fn context(&self) -> &Arc<SiteContext> {
        &self.context
    }

    /// Facts about the build.
    pub const fn summary(&self) -> &IndexSummary {
        &self.summary
    }

    /// Classes whose simple name is exactly `name`.
    pub fn classes_exact(&self, name: &str) -> Vec<Arc<Class>> {
        self.class_map.get(name).cloned().unwrap_or_default()
    }

    /// Classes matching a simple or partially qualified name.
    ///
    /// Listing names are compared to the trailing `.` segments of `query`
    /// ignoring case, so nested names such as `Map.Entry` match `Entry`,
    /// `Map.Entry` and `java.util.Map.Entry`. The survivors must have a
    /// qualified name ending with `query`.
    pub fn classes_by_suffix(&self, query: &str) -> Vec<Arc<Class>> {
        let query = query.trim();
        if query.rsplit('.').next().is_none_or(str::is_empty) {
            return Vec::new();
        }

        self.class_map
            .iter()
            .filter(|(name, _)| tail_matches(name, query))
            .flat_map(|(_, classes)| classes.iter())
            .filter(|class| class.qualified_name().ends_with(query))
            .cloned()
            .collect()
    }

    /// Package named exactly `name`.
    pub fn package(&self, name: &str) -> Option<Arc<Package>> {
        self.package_map.get(name.trim()).cloned()
    }

    /// Every class, ordered by simple name then package.
    pub fn all_classes(&self) -> impl Iterator<Item = &Arc<Class>> {
        self.class_map.values().flatten()
    }

    /// Every package, ordered by name.
    pub fn all_packages(&self) -> impl Iterator<Item = &Arc<Package>> {
        self.package_map.values()
    }

    /// Class named by an "inherited from" marker.
    ///
    /// An exact qualified match wins; otherwise the suffix match must be
    /// unique.
    pub fn resolve_supertype(&self, qualified_name: &str) -> Option<Arc<Class>> {
        let candidates = self.classes_by_suffix(qualified_name);
        if let Some(exact) = candidates
            .iter()
            .find(|class| class.qualified_name() == qualified_name)
        {
            return Some(Arc::clone(exact));
        }
        match candidates.as_slice() {
            [only] => Some(Arc::clone(only)),
            _ => None,
        }
    }

    /// Simple class names close to `query`, best first.
    pub fn suggest_classes(&self, query: &str, limit: usize) -> Vec<String> {
        let query = query.trim();
        let simple = query.rsplit('.').next().unwrap_or(query);
        suggest(self.class_map.keys().map(String::as_str), simple, limit)
    }

    /// Package names close to `query`, best first.
    pub fn suggest_packages(&self, query: &str, limit: usize) -> Vec<String> {
        suggest(self.package_map.keys().map(String::as_str), query.trim(), limit)
    }

    /// Declaration of `class`, fetched on first use.
    pub async fn declaration<'a>(&self, class: &'a Class) -> Result<&'a Declaration> {
        memoize(&class.declaration, "declaration", &class.qualified_name(), || {
            self.class_resolver.declaration(class)
        })
        .await
    }

    /// Description of `class`, fetched on first use.
    pub async fn class_description<'a>(&self, class: &'a Class) -> Result<&'a str> {
        memoize(&class.description, "description", &class.qualified_name(), || {
            self.class_resolver.description(class)
        })
        .await
        .map(String::as_str)
    }

    /// Description of `package`, fetched on first use.
    pub async fn package_description<'a>(&self, package: &'a Package) -> Result<&'a str> {
        memoize(&package.description, "description", package.name(), || {
            self.package_resolver.describe(package)
        })
        .await
        .map(String::as_str)
    }

    /// Description of `method`, fetched on first use.
    pub async fn method_description<'a>(&self, method: &'a Method) -> Result<&'a str> {
        let owner = format!("{}#{}", method.class(), method.name());
        memoize(&method.description, "description", &owner, || {
            self.method_resolver.describe(method)
        })
        .await
        .map(String::as_str)
    }

    /// Own methods and inheritance markers of `class`, fetched on first use.
    pub async fn method_table<'a>(&self, class: &'a Class) -> Result<&'a MethodTable> {
        memoize(&class.method_table, "method_table", &class.qualified_name(), || {
            self.method_resolver.method_table(class)
        })
        .await
    }

    /// Own and inherited methods of `class`, resolved on first use.
    pub async fn methods_for_class<'a>(&self, class: &'a Class) -> Result<&'a [Arc<Method>]> {
        memoize(&class.methods, "methods", &class.qualified_name(), || {
            self.method_resolver.methods_for_class(self, class)
        })
        .await
        .map(Vec::as_slice)
    }

    /// Methods of `class` matching `query` (`name` or `name(Types)`).
    pub async fn methods(&self, class: &Class, query: &str) -> Result<Vec<Arc<Method>>> {
        let query = MethodQuery::parse(query);
        let methods = self.methods_for_class(class).await?;
        let selected = query.select(methods);
        debug!(class = %class.key(), query = %query, matches = selected.len(), "method lookup");
        Ok(selected)
    }
}

/// Whether the trailing `.` segments of `name` and `query` agree.
fn tail_matches(name: &str, query: &str) -> bool {
    name.rsplit('.')
        .zip(query.rsplit('.'))
        .all(|(ours, theirs)| ours.eq_ignore_ascii_case(theirs))
}

fn suggest<'a>(candidates: impl Iterator<Item = &'a str>, query: &str, limit: usize) -> Vec<String> {
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }
    let matcher = SkimMatcherV2::default();
    let query = query.to_lowercase();

    let mut scored: Vec<(i64, &str)> = candidates
        .collect::<BTreeSet<_>>()
        .into_iter()
        .filter_map(|candidate| {
            matcher
                .fuzzy_match(&candidate.to_lowercase(), &query)
                .map(|score| (score, candidate))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::fetcher::StaticPages;
    use crate::fixtures::{ClassFixture, MethodFixture, SiteFixture};
    use crate::markup::MarkdownConverter;
    use crate::model::ClassKind;
    use std::time::Duration;

    const BASE: &str = "https://docs.example.org/api/";

    fn site() -> SiteFixture {
        SiteFixture::new(BASE)
            .package("a", "Package a.", Some("All about <code>a</code>."))
            .package("empty", "Nothing indexed here.", None)
            .class(
                ClassFixture::new(
                    "a",
                    "Builder",
                    "public final class <span class=\"typeNameLabel\">Builder</span>",
                )
                .method("Builder", "name", "String name"),
            )
            .class(ClassFixture::new("b", "Builder", "public class Builder"))
            .class(
                ClassFixture::new("x", "Foo", "public class Foo")
                    .method("void", "bar", "")
                    .method("void", "bar", "int a")
                    .method("void", "bar", "int a, String b"),
            )
            .class(ClassFixture::new("y", "Foo", "public class Foo").method("int", "size", ""))
            .class(
                ClassFixture::new("a", "Base", "public abstract class Base")
                    .method("void", "reset", "")
                    .method("void", "clear", ""),
            )
            .class(
                ClassFixture::new("b", "Sub", "public class Sub extends Base")
                    .method("void", "run", "")
                    .inherits("a.Base", &["reset"])
                    .inherits("java.lang.Object", &["toString"]),
            )
    }

    async fn index_with(pages: StaticPages) -> (Arc<StaticPages>, DocIndex) {
        let pages = Arc::new(pages);
        let context = SiteContext::new(pages.clone(), Arc::new(MarkdownConverter), BASE, false);
        let index = DocIndex::build(Arc::new(context)).await.unwrap();
        (pages, index)
    }

    async fn index() -> (Arc<StaticPages>, DocIndex) {
        index_with(site().pages().into_iter().collect()).await
    }

    fn class_url(package: &str, name: &str) -> String {
        site().class_url(package, name)
    }

    #[tokio::test]
    async fn test_build_fetches_only_listing_and_overview() {
        let (pages, index) = index().await;

        assert_eq!(pages.total_fetches().await, 2);
        assert_eq!(index.summary().class_count, 6);
        assert_eq!(index.summary().package_count, 5);
        assert!(index.summary().skipped.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_simple_names_are_kept() {
        let (_, index) = index().await;

        let builders = index.classes_exact("Builder");
        let packages: Vec<&str> = builders.iter().map(|c| c.package()).collect();
        assert_eq!(packages, vec!["a", "b"]);
        assert!(index.classes_exact("builder").is_empty());
    }

    #[tokio::test]
    async fn test_suffix_lookup() {
        let (_, index) = index().await;

        let foos = index.classes_by_suffix("y.Foo");
        assert_eq!(foos.len(), 1);
        assert_eq!(foos[0].qualified_name(), "y.Foo");

        assert_eq!(index.classes_by_suffix("Foo").len(), 2);
        assert_eq!(index.classes_by_suffix("foo").len(), 0);
        assert_eq!(index.classes_by_suffix("z.Foo").len(), 0);
        assert!(index.classes_by_suffix("").is_empty());
    }

    #[tokio::test]
    async fn test_nested_classes_match_any_qualified_tail() {
        let pages: StaticPages = SiteFixture::new(BASE)
            .class(ClassFixture::new("java.util", "Map", "public interface Map<K,V>"))
            .class(ClassFixture::new(
                "java.util",
                "Map.Entry",
                "public static interface Map.Entry<K,V>",
            ))
            .pages()
            .into_iter()
            .collect();
        let (_, index) = index_with(pages).await;

        for query in ["Entry", "Map.Entry", "util.Map.Entry", "java.util.Map.Entry"] {
            let found = index.classes_by_suffix(query);
            assert_eq!(found.len(), 1, "{query}");
            assert_eq!(found[0].qualified_name(), "java.util.Map.Entry");
        }
        let maps = index.classes_by_suffix("java.util.Map");
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].name(), "Map");
        assert!(index.classes_by_suffix("Set.Entry").is_empty());
        assert!(index.resolve_supertype("java.util.Map.Entry").is_some());
    }

    #[tokio::test]
    async fn test_packages_include_overview_only_entries() {
        let (_, index) = index().await;

        let a = index.package("a").unwrap();
        assert_eq!(a.short_description(), "Package a.");
        assert_eq!(a.url(), "https://docs.example.org/api/a/package-summary.html");
        let names: Vec<&str> = a.classes().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Base", "Builder"]);

        let empty = index.package("empty").unwrap();
        assert!(empty.classes().is_empty());
        assert_eq!(empty.short_description(), "Nothing indexed here.");

        assert!(index.package("a.b").is_none());
    }

    #[tokio::test]
    async fn test_missing_overview_leaves_short_descriptions_empty() {
        let (_, index) = index_with(site().without_overview().pages().into_iter().collect()).await;

        assert_eq!(index.package("a").unwrap().short_description(), "");
        assert!(index.package("empty").is_none());
    }

    #[tokio::test]
    async fn test_foreign_links_are_skipped() {
        let mut pages: StaticPages = site().pages().into_iter().collect();
        pages.insert(
            format!("{BASE}allclasses-noframe.html"),
            r#"<html><body><ul>
              <li><a href="a/Base.html">Base</a></li>
              <li><a href="https://elsewhere.org/Other.html">Other</a></li>
            </ul></body></html>"#,
        );
        let (_, index) = index_with(pages).await;

        assert_eq!(index.summary().class_count, 1);
        assert_eq!(index.summary().skipped.len(), 1);
        assert_eq!(index.summary().skipped[0].name, "Other");
    }

    #[tokio::test]
    async fn test_declaration_is_fetched_once() -> Result<()> {
        let (pages, index) = index().await;
        let class = &index.classes_by_suffix("a.Builder")[0];

        let first = index.declaration(class).await?.clone();
        let second = index.declaration(class).await?;

        assert_eq!(&first, second);
        assert_eq!(first.as_str(), "public final class Builder");
        assert_eq!(first.kind(), ClassKind::Class);
        assert_eq!(class.cached_declaration(), Some(&first));
        assert_eq!(pages.fetch_count(class.url()).await, 1);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_share_one_fetch() -> Result<()> {
        let (pages, index) =
            index_with(site().pages().into_iter().collect::<StaticPages>().with_latency(Duration::from_millis(50)))
                .await;
        let index = Arc::new(index);
        let class = Arc::clone(&index.classes_by_suffix("x.Foo")[0]);

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let index = Arc::clone(&index);
                let class = Arc::clone(&class);
                tokio::spawn(async move { index.class_description(&class).await.map(ToString::to_string) })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap()?, "The Foo type.");
        }
        assert_eq!(pages.fetch_count(&class_url("x", "Foo")).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_resolution_is_retried() -> Result<()> {
        let (pages, index) = index().await;
        let class = &index.classes_by_suffix("y.Foo")[0];
        pages.fail_next(class.url(), 1).await;

        assert!(matches!(index.declaration(class).await, Err(Error::Timeout(_))));
        assert!(class.cached_declaration().is_none());
        assert_eq!(index.declaration(class).await?.as_str(), "public class Foo");
        assert_eq!(pages.fetch_count(class.url()).await, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_package_descriptions() -> Result<()> {
        let (pages, index) = index().await;

        let a = index.package("a").unwrap();
        assert_eq!(index.package_description(&a).await?, "All about `a`.");
        assert_eq!(index.package_description(&a).await?, "All about `a`.");
        assert_eq!(pages.fetch_count(a.url()).await, 1);

        let b = index.package("b").unwrap();
        assert_eq!(index.package_description(&b).await?, "");
        Ok(())
    }

    #[tokio::test]
    async fn test_overload_filter() -> Result<()> {
        let (_, index) = index().await;
        let class = &index.classes_by_suffix("x.Foo")[0];

        assert_eq!(index.methods(class, "bar").await?.len(), 3);

        let one = index.methods(class, "bar(int)").await?;
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].name_with_parameters(), "bar(int a)");

        let none = index.methods(class, "bar()").await?;
        assert_eq!(none.len(), 1);
        assert!(none[0].parameters().is_empty());

        assert!(index.methods(class, "baz").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_inherited_methods_are_scoped_to_listed_names() -> Result<()> {
        let (pages, index) = index().await;
        let sub = &index.classes_by_suffix("b.Sub")[0];

        let methods = index.methods_for_class(sub).await?;
        let names: Vec<(&str, bool)> = methods.iter().map(|m| (m.name(), m.is_inherited())).collect();
        assert_eq!(names, vec![("run", false), ("reset", true)]);

        let reset = &methods[1];
        assert_eq!(reset.class(), sub.key());
        assert_eq!(reset.url(), format!("{}#reset--", class_url("a", "Base")));

        let base = &index.classes_by_suffix("a.Base")[0];
        let base_table = index.method_table(base).await?;
        assert!(base_table.own.iter().all(|m| !m.is_inherited() && m.class() == base.key()));

        index.methods_for_class(sub).await?;
        assert_eq!(pages.fetch_count(sub.url()).await, 1);
        assert_eq!(pages.fetch_count(base.url()).await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_method_description_is_memoized() -> Result<()> {
        let (pages, index) = index().await;
        let class = &index.classes_by_suffix("y.Foo")[0];
        let size = &index.methods(class, "size").await?[0];

        assert_eq!(index.method_description(size).await?, "Does size thoroughly.");
        assert_eq!(index.method_description(size).await?, "Does size thoroughly.");
        assert_eq!(pages.fetch_count(class.url()).await, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_supertype_prefers_exact_name() {
        let (_, index) = index().await;

        assert_eq!(index.resolve_supertype("a.Base").unwrap().qualified_name(), "a.Base");
        assert!(index.resolve_supertype("Foo").is_none());
        assert!(index.resolve_supertype("java.lang.Object").is_none());
    }

    #[tokio::test]
    async fn test_suggestions() {
        let (_, index) = index().await;

        assert_eq!(index.suggest_classes("Bulder", DEFAULT_SUGGESTIONS), vec!["Builder"]);
        assert_eq!(index.suggest_classes("q.Bse", DEFAULT_SUGGESTIONS), vec!["Base"]);
        assert!(index.suggest_packages("zzz", DEFAULT_SUGGESTIONS).is_empty());
        assert!(index.suggest_classes("", DEFAULT_SUGGESTIONS).is_empty());
    }

    #[tokio::test]
    async fn test_class_with_only_inherited_methods() -> Result<()> {
        let pages: StaticPages = SiteFixture::new(BASE)
            .class(ClassFixture::new("a", "Base", "public class Base").with_method(
                MethodFixture::new("void", "close", "").throws("throws IOException"),
            ))
            .class(ClassFixture::new("a", "Leaf", "public class Leaf extends Base").inherits("a.Base", &["close"]))
            .pages()
            .into_iter()
            .collect();
        let (_, index) = index_with(pages).await;
        let leaf = &index.classes_exact("Leaf")[0];

        let methods = index.methods(leaf, "close").await?;
        assert_eq!(methods.len(), 1);
        assert!(methods[0].is_inherited());
        assert_eq!(methods[0].exceptions(), "throws IOException");
        Ok(())
    }

    #[tokio::test]
    async fn test_overridden_overload_is_not_inherited_again() -> Result<()> {
        let pages: StaticPages = SiteFixture::new(BASE)
            .class(
                ClassFixture::new("a", "Sink", "public abstract class Sink")
                    .method("void", "write", "int b")
                    .method("void", "write", "byte[] b")
                    .method("void", "flush", ""),
            )
            .class(
                ClassFixture::new("b", "Pipe", "public class Pipe extends Sink")
                    .method("void", "write", "int b")
                    .inherits("a.Sink", &["write(byte[] b)", "flush"]),
            )
            .pages()
            .into_iter()
            .collect();
        let (_, index) = index_with(pages).await;
        let pipe = &index.classes_exact("Pipe")[0];

        let all = index.methods_for_class(pipe).await?;
        let names: Vec<(String, bool)> = all
            .iter()
            .map(|m| (m.name_with_parameters(), m.is_inherited()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("write(int b)".to_string(), false),
                ("write(byte[] b)".to_string(), true),
                ("flush()".to_string(), true),
            ]
        );

        let exact = index.methods(pipe, "write(int)").await?;
        assert_eq!(exact.len(), 1);
        assert!(!exact[0].is_inherited());
        assert_eq!(index.methods(pipe, "write").await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_unlinked_names_fall_back_to_name_matching() -> Result<()> {
        let sub = ClassFixture::new("b", "Sub", "public class Sub extends Base")
            .method("void", "reset", "int level")
            .inherits("a.Base", &["reset(boolean hard)", "clear"]);
        let pages: StaticPages = SiteFixture::new(BASE)
            .class(
                ClassFixture::new("a", "Base", "public class Base")
                    .method("void", "reset", "int level")
                    .method("void", "reset", "")
                    .method("void", "clear", ""),
            )
            .class(sub)
            .pages()
            .into_iter()
            .collect();
        let (_, index) = index_with(pages).await;
        let sub = &index.classes_exact("Sub")[0];

        // The reset link matches no anchor on Base: every reset of Base is a
        // candidate, minus the one Sub overrides.
        let resets = index.methods(sub, "reset").await?;
        let mut shown: Vec<String> = resets.iter().map(|m| m.name_with_parameters()).collect();
        shown.sort();
        assert_eq!(shown, vec!["reset()", "reset(int level)"]);
        assert_eq!(index.methods(sub, "reset(int)").await?.len(), 1);
        assert_eq!(index.methods(sub, "clear").await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_methods_inherited_from_nested_type() -> Result<()> {
        let pages: StaticPages = SiteFixture::new(BASE)
            .class(
                ClassFixture::new("java.util", "Map.Entry", "public static interface Map.Entry<K,V>")
                    .method("K", "getKey", "")
                    .method("V", "getValue", ""),
            )
            .class(
                ClassFixture::new("a", "Pair", "public class Pair<K,V> implements Map.Entry<K,V>")
                    .method("V", "getValue", "")
                    .inherits_interface("java.util.Map.Entry", &["getKey"]),
            )
            .pages()
            .into_iter()
            .collect();
        let (_, index) = index_with(pages).await;
        let pair = &index.classes_exact("Pair")[0];

        let keys = index.methods(pair, "getKey").await?;
        assert_eq!(keys.len(), 1);
        assert!(keys[0].is_inherited());
        assert_eq!(keys[0].url(), format!("{BASE}java/util/Map.Entry.html#getKey--"));
        assert_eq!(index.methods(pair, "getValue").await?.len(), 1);
        Ok(())
    }
}
