use super::{Class, Documented};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A Java package and the classes documented in it.
#[derive(Debug)]
pub struct Package {
    name: String,
    url: String,
    short_description: String,
    classes: Vec<Arc<Class>>,
    pub(crate) description: OnceCell<String>,
}

impl Package {
    /// Creates a package owning `classes`.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        short_description: impl Into<String>,
        classes: Vec<Arc<Class>>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            short_description: short_description.into(),
            classes,
            description: OnceCell::new(),
        }
    }

    /// Fully qualified package name, e.g. `java.util`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL of the package summary page.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// One-line summary from the overview page, empty when unavailable.
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    /// Classes of this package, sorted by simple name.
    pub fn classes(&self) -> &[Arc<Class>] {
        &self.classes
    }
}

impl Documented for Package {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn cached_description(&self) -> Option<&str> {
        self.description.get().map(String::as_str)
    }
}
