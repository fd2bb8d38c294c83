//! The front end's entry point: current index plus tagged lookups.
//!
//! A [`Catalog`] owns the index of one site. Lookups read the current index;
//! [`Catalog::reindex`] crawls the site again off to the side and swaps the
//! finished index in, so lookups never see a half-built index and callers
//! holding the previous one keep a consistent view.
//!
//! ```rust,no_run
//! use jdex_core::{Catalog, ClassLookup, Settings};
//!
//! # async fn run() -> jdex_core::Result<()> {
//! let catalog = Catalog::from_settings(&Settings::default()).await?;
//! match catalog.lookup_class("util.List").await {
//!     ClassLookup::Found(view) => println!("{}", view.declaration),
//!     ClassLookup::Ambiguous(names) => println!("did you mean one of {names:?}"),
//!     ClassLookup::NotFound { suggestions } => println!("no such class; try {suggestions:?}"),
//!     ClassLookup::Failed(e) => eprintln!("lookup failed: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

use crate::fetcher::HttpFetcher;
use crate::index::{DEFAULT_SUGGESTIONS, DocIndex, IndexSummary};
use crate::model::Class;
use crate::query::MethodReference;
use crate::resolver::SiteContext;
use crate::views::{ClassView, MethodView, PackageView};
use crate::{Error, Result, Settings};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Outcome of a class lookup.
#[derive(Debug)]
pub enum ClassLookup {
    /// Exactly one class matched.
    Found(ClassView),
    /// Nothing matched.
    NotFound {
        /// Close simple names.
        suggestions: Vec<String>,
    },
    /// Several classes matched; their qualified names.
    Ambiguous(Vec<String>),
    /// The class was found but could not be resolved.
    Failed(Error),
}

/// Outcome of a method lookup.
#[derive(Debug)]
pub enum MethodLookup {
    /// Exactly one method matched.
    Found(MethodView),
    /// Several overloads matched; their `name(params)` forms.
    Overloaded(Vec<String>),
    /// The class part matched nothing.
    ClassNotFound {
        /// Close simple names.
        suggestions: Vec<String>,
    },
    /// The class part matched several classes.
    ClassAmbiguous(Vec<String>),
    /// The class has no method of that name.
    MethodNotFound,
    /// Resolution failed.
    Failed(Error),
}

/// Outcome of a package lookup.
#[derive(Debug)]
pub enum PackageLookup {
    /// The package exists.
    Found(PackageView),
    /// No package of that name.
    NotFound {
        /// Close package names.
        suggestions: Vec<String>,
    },
    /// The package was found but could not be resolved.
    Failed(Error),
}

enum ClassMatch {
    One(Arc<Class>),
    None(Vec<String>),
    Many(Vec<String>),
}

/// Holder of the current index of one site.
pub struct Catalog {
    context: Arc<SiteContext>,
    current: RwLock<Arc<DocIndex>>,
}

impl Catalog {
    /// Builds the first index of the site behind `context`.
    pub async fn open(context: Arc<SiteContext>) -> Result<Self> {
        let index = DocIndex::build(Arc::clone(&context)).await?;
        Ok(Self {
            context,
            current: RwLock::new(Arc::new(index)),
        })
    }

    /// Builds the first index of the configured site over HTTP.
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let fetcher = Arc::new(HttpFetcher::new(settings)?);
        Self::open(Arc::new(SiteContext::from_settings(settings, fetcher))).await
    }

    /// The index lookups currently run against.
    pub async fn current(&self) -> Arc<DocIndex> {
        Arc::clone(&*self.current.read().await)
    }

    /// Facts about the current index.
    pub async fn summary(&self) -> IndexSummary {
        self.current().await.summary().clone()
    }

    /// Crawls the site again and swaps the fresh index in.
    ///
    /// On failure the current index stays in place.
    #[instrument(skip_all)]
    pub async fn reindex(&self) -> Result<IndexSummary> {
        let fresh = DocIndex::build(Arc::clone(&self.context)).await?;
        let summary = fresh.summary().clone();
        *self.current.write().await = Arc::new(fresh);
        info!(classes = summary.class_count, "index replaced");
        Ok(summary)
    }

    /// Looks a class up by simple or partially qualified name.
    #[instrument(skip(self))]
    pub async fn lookup_class(&self, name: &str) -> ClassLookup {
        let index = self.current().await;
        match find_class(&index, name) {
            ClassMatch::One(class) => match ClassView::resolve(&index, &class).await {
                Ok(view) => ClassLookup::Found(view),
                Err(e) => ClassLookup::Failed(e),
            },
            ClassMatch::None(suggestions) => ClassLookup::NotFound { suggestions },
            ClassMatch::Many(names) => ClassLookup::Ambiguous(names),
        }
    }

    /// Looks a method up on a class; `method` is `name` or `name(Types)`.
    #[instrument(skip(self))]
    pub async fn lookup_method(&self, class: &str, method: &str) -> MethodLookup {
        let index = self.current().await;
        let class = match find_class(&index, class) {
            ClassMatch::One(class) => class,
            ClassMatch::None(suggestions) => return MethodLookup::ClassNotFound { suggestions },
            ClassMatch::Many(names) => return MethodLookup::ClassAmbiguous(names),
        };

        let methods = match index.methods(&class, method).await {
            Ok(methods) => methods,
            Err(e) => return MethodLookup::Failed(e),
        };
        match methods.as_slice() {
            [] => MethodLookup::MethodNotFound,
            [only] => match MethodView::resolve(&index, only).await {
                Ok(view) => MethodLookup::Found(view),
                Err(e) => MethodLookup::Failed(e),
            },
            overloads => MethodLookup::Overloaded(
                overloads.iter().map(|m| m.name_with_parameters()).collect(),
            ),
        }
    }

    /// Looks a method up from the `Class#method(Types)` form.
    pub async fn lookup_method_reference(&self, reference: &str) -> MethodLookup {
        match MethodReference::parse(reference) {
            Ok(reference) => self.lookup_method(&reference.class, &reference.method).await,
            Err(e) => MethodLookup::Failed(e),
        }
    }

    /// Looks a package up by its exact name.
    #[instrument(skip(self))]
    pub async fn lookup_package(&self, name: &str) -> PackageLookup {
        let index = self.current().await;
        let Some(package) = index.package(name) else {
            return PackageLookup::NotFound {
                suggestions: index.suggest_packages(name, DEFAULT_SUGGESTIONS),
            };
        };
        match PackageView::resolve(&index, &package).await {
            Ok(view) => PackageLookup::Found(view),
            Err(e) => PackageLookup::Failed(e),
        }
    }
}

/// Suffix lookup; among several matches an exact qualified name wins.
fn find_class(index: &DocIndex, query: &str) -> ClassMatch {
    let query = query.trim();
    let mut candidates = index.classes_by_suffix(query);
    debug!(query, candidates = candidates.len(), "class lookup");

    if candidates.len() > 1 {
        if let Some(position) = candidates.iter().position(|c| c.qualified_name() == query) {
            return ClassMatch::One(candidates.swap_remove(position));
        }
    }
    match candidates.as_slice() {
        [] => ClassMatch::None(index.suggest_classes(query, DEFAULT_SUGGESTIONS)),
        [only] => ClassMatch::One(Arc::clone(only)),
        many => {
            let mut names: Vec<String> = many.iter().map(|c| c.qualified_name()).collect();
            names.sort();
            ClassMatch::Many(names)
        },
    }
}
