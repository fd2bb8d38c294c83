//! Documented entities: packages, classes and methods.
//!
//! Entities are created cheaply (name + URL) while the index is built and
//! carry one [`tokio::sync::OnceCell`] per lazy field. Resolution lives in
//! [`crate::resolver`]; the model only stores what has been resolved and
//! derives display properties from it.
//!
//! Ownership runs one way: a [`Package`] owns its classes, a [`Class`] refers
//! back to its package by name, and a [`Method`] refers to the class whose API
//! it belongs to through a [`ClassKey`].

mod class;
mod method;
mod package;

pub use class::{Class, ClassKey, ClassKind, Declaration};
pub use method::{InheritedGroup, Method, MethodRecord, MethodTable, Parameter, SupertypeKind};
pub(crate) use method::split_top_level;
pub use package::Package;

/// Capability shared by every documented entity.
pub trait Documented {
    /// Simple name for classes and methods, fully qualified for packages.
    fn name(&self) -> &str;

    /// Page (or page anchor) documenting the entity.
    fn url(&self) -> &str;

    /// The description, if it has been resolved already.
    ///
    /// Never triggers a fetch; use the index accessors for that.
    fn cached_description(&self) -> Option<&str>;
}
