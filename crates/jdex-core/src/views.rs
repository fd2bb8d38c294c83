//! Read-only projections handed to the front end.
//!
//! Building a view resolves the lazy fields it shows, so a view is always
//! complete; the entity keeps the resolved values for the next lookup.

use crate::index::DocIndex;
use crate::model::{Class, ClassKind, Method, Package, Parameter};
use crate::Result;
use serde::Serialize;

/// Icon category of a class, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassIcon {
    /// Declared `abstract`.
    Abstract,
    /// Interface or annotation type.
    Interface,
    /// Enum type.
    Enum,
    /// Declared `final`.
    Final,
    /// Anything else.
    Class,
}

impl ClassIcon {
    /// Picks the icon: abstract, then interface, then enum, then final.
    pub fn for_class(kind: ClassKind, is_abstract: bool, is_final: bool) -> Self {
        if is_abstract {
            Self::Abstract
        } else if kind == ClassKind::Interface {
            Self::Interface
        } else if kind == ClassKind::Enum {
            Self::Enum
        } else if is_final {
            Self::Final
        } else {
            Self::Class
        }
    }
}

/// Icon category of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodIcon {
    /// Declared `abstract`.
    Abstract,
    /// Has a body.
    Plain,
}

/// A resolved class.
#[derive(Debug, Clone, Serialize)]
pub struct ClassView {
    /// Simple name as listed, e.g. `Map.Entry`.
    pub name: String,
    /// Package name.
    pub package: String,
    /// `package.Name`.
    pub qualified_name: String,
    /// Class page URL.
    pub url: String,
    /// Class, interface, enum or annotation type.
    pub kind: ClassKind,
    /// Icon category.
    pub icon: ClassIcon,
    /// Declaration block as Markdown.
    pub declaration: String,
    /// Declaration up to, not including, the hierarchy clause.
    pub name_with_modifiers: String,
    /// `extends ... implements ...`, empty when there is none.
    pub hierarchy: String,
    /// Class description as Markdown.
    pub description: String,
}

impl ClassView {
    /// Resolves declaration and description of `class`.
    pub async fn resolve(index: &DocIndex, class: &Class) -> Result<Self> {
        let declaration = index.declaration(class).await?;
        let description = index.class_description(class).await?;
        let kind = declaration.kind();

        Ok(Self {
            name: class.name().to_string(),
            package: class.package().to_string(),
            qualified_name: class.qualified_name(),
            url: class.url().to_string(),
            kind,
            icon: ClassIcon::for_class(
                kind,
                declaration.has_modifier("abstract"),
                declaration.has_modifier("final"),
            ),
            declaration: declaration.as_str().to_string(),
            name_with_modifiers: declaration.name_with_modifiers().to_string(),
            hierarchy: declaration.extends_implements().to_string(),
            description: description.to_string(),
        })
    }
}

/// A resolved method.
#[derive(Debug, Clone, Serialize)]
pub struct MethodView {
    /// Method name.
    pub name: String,
    /// Qualified name of the class the method was looked up on.
    pub class: String,
    /// Detail anchor URL, on the supertype page for inherited methods.
    pub url: String,
    /// Icon category.
    pub icon: MethodIcon,
    /// Modifiers and return type from the summary table.
    pub return_type: String,
    /// Full signature, `throws` clause included.
    pub declaration: String,
    /// Signature without the `throws` clause.
    pub signature: String,
    /// `throws ...`, empty when nothing is declared.
    pub exceptions: String,
    /// Declared parameters in order.
    pub parameters: Vec<Parameter>,
    /// Whether the method is documented on a supertype.
    pub inherited: bool,
    /// First sentence from the summary table.
    pub short_description: String,
    /// Full prose of the detail block as Markdown.
    pub description: String,
}

impl MethodView {
    /// Resolves the description of `method`.
    pub async fn resolve(index: &DocIndex, method: &Method) -> Result<Self> {
        let description = index.method_description(method).await?;

        Ok(Self {
            name: method.name().to_string(),
            class: method.class().qualified_name(),
            url: method.url().to_string(),
            icon: if method.is_abstract() {
                MethodIcon::Abstract
            } else {
                MethodIcon::Plain
            },
            return_type: method.return_type().to_string(),
            declaration: method.declaration().to_string(),
            signature: method.declaration_without_exceptions().to_string(),
            exceptions: method.exceptions().to_string(),
            parameters: method.parameters().to_vec(),
            inherited: method.is_inherited(),
            short_description: method.short_description().to_string(),
            description: description.to_string(),
        })
    }
}

/// A resolved package.
#[derive(Debug, Clone, Serialize)]
pub struct PackageView {
    /// Dotted package name.
    pub name: String,
    /// `package-summary.html` URL.
    pub url: String,
    /// First sentence from the package overview, possibly empty.
    pub short_description: String,
    /// Package description as Markdown.
    pub description: String,
    /// Simple names of the indexed classes.
    pub classes: Vec<String>,
}

impl PackageView {
    /// Resolves the description of `package`.
    pub async fn resolve(index: &DocIndex, package: &Package) -> Result<Self> {
        let description = index.package_description(package).await?;

        Ok(Self {
            name: package.name().to_string(),
            url: package.url().to_string(),
            short_description: package.short_description().to_string(),
            description: description.to_string(),
            classes: package.classes().iter().map(|c| c.name().to_string()).collect(),
        })
    }
}
