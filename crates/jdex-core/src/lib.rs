//! # jdex-core
//!
//! Core functionality for jdex - lazy, concurrent lookups over a scraped
//! Javadoc 8 documentation site.
//!
//! The crate discovers every class and package of a site from its class
//! listing, keeps them as cheap stubs in a name index, and fetches the
//! expensive details (declarations, descriptions, method tables) only when a
//! lookup needs them, at most once per entity.
//!
//! ## Architecture
//!
//! - **Fetching**: [`PageFetcher`] trait with an HTTP implementation and an
//!   in-memory one for fixtures
//! - **Markup**: [`MarkupConverter`] turning HTML fragments into Markdown
//! - **Scanning**: [`scan::SiteIndexScanner`] reading the class listing
//! - **Resolvers**: package, class and method page scrapers in [`resolver`]
//! - **Index**: [`DocIndex`] with exact, suffix and package lookups plus the
//!   memoizing accessors
//! - **Catalog**: [`Catalog`], the swappable current index and the tagged
//!   lookups a front end calls
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jdex_core::{Catalog, MethodLookup, Settings};
//!
//! # async fn run() -> jdex_core::Result<()> {
//! let settings = Settings::load()?;
//! let catalog = Catalog::from_settings(&settings).await?;
//!
//! if let MethodLookup::Found(method) = catalog.lookup_method("List", "add(int, E)").await {
//!     println!("{}\n\n{}", method.declaration, method.description);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Building and configuration return [`Result<T, Error>`]; lookups return
//! tagged outcomes that carry the error when resolution failed:
//!
//! ```rust,no_run
//! use jdex_core::{Catalog, ClassLookup, Error};
//!
//! # async fn show(catalog: &Catalog) {
//! match catalog.lookup_class("Builder").await {
//!     ClassLookup::Found(class) => println!("{}", class.declaration),
//!     ClassLookup::Failed(e) if e.is_fetch_error() => eprintln!("site unreachable: {e}"),
//!     ClassLookup::Failed(Error::MalformedPage { url, .. }) => eprintln!("unexpected layout: {url}"),
//!     other => eprintln!("{other:?}"),
//! }
//! # }
//! ```

/// Front-end lookups over the current index
pub mod catalog;
/// Settings file and defaults
pub mod config;
/// Error types and result aliases
pub mod error;
/// Page fetching over HTTP and from memory
pub mod fetcher;
/// Name maps and memoizing accessors
pub mod index;
/// Run-at-most-once helper behind every lazy field
pub mod lazy;
/// HTML to Markdown conversion
pub mod markup;
/// Packages, classes and methods
pub mod model;
/// DOM navigation helpers shared by the scrapers
pub mod page;
/// Method query and reference parsing
pub mod query;
/// Page scrapers for packages, classes and methods
pub mod resolver;
/// Class listing scanner
pub mod scan;
/// Serializable projections for the front end
pub mod views;

#[cfg(test)]
mod fixtures;

pub use catalog::{Catalog, ClassLookup, MethodLookup, PackageLookup};
pub use config::{DEFAULT_BASE_URL, FetchSettings, MarkupSettings, Settings};
pub use error::{Error, Result};
pub use fetcher::{HttpFetcher, Page, PageFetcher, StaticPages};
pub use index::{DocIndex, IndexSummary, SkippedEntry};
pub use markup::{MarkdownConverter, MarkupConverter};
pub use model::{Class, ClassKey, ClassKind, Declaration, Documented, Method, Package, Parameter};
pub use query::{MethodQuery, MethodReference};
pub use resolver::SiteContext;
pub use views::{ClassIcon, ClassView, MethodIcon, MethodView, PackageView};
