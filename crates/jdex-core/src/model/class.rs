use super::{Documented, Method, MethodTable};
use crate::markup::strip_formatting;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};
use tokio::sync::OnceCell;

/// Identity of a class: owning package plus simple name.
///
/// Two classes with the same simple name in different packages are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassKey {
    /// Fully qualified package name.
    pub package: String,
    /// Simple class name.
    pub name: String,
}

impl ClassKey {
    /// Creates a key.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// `package.Name`, or just `Name` for the unnamed package.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// What sort of type a declaration introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    /// `interface` or `@interface`.
    Interface,
    /// `class`.
    Class,
    /// `enum`.
    Enum,
    /// Nothing recognizable in the declaration.
    Unknown,
}

impl ClassKind {
    /// Lowercase keyword form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::Class => "class",
            Self::Enum => "enum",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole-word `extends` / `implements`.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static HIERARCHY_KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:extends|implements)\b").unwrap());

/// A class declaration line, e.g.
/// `public abstract class Foo<T> extends Bar implements Baz`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Declaration(String);

impl Declaration {
    /// Wraps converted declaration text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The full declaration.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Byte offset of the first `extends`/`implements` outside type
    /// parameters (`Foo<T extends Bar>` does not count).
    fn hierarchy_start(&self) -> Option<usize> {
        HIERARCHY_KEYWORD_RE
            .find_iter(&self.0)
            .map(|m| m.start())
            .find(|&start| angle_depth(&self.0[..start]) == 0)
    }

    /// Declaration up to, not including, the hierarchy clause.
    pub fn name_with_modifiers(&self) -> &str {
        match self.hierarchy_start() {
            Some(start) => self.0[..start].trim_end(),
            None => self.0.trim(),
        }
    }

    /// The `extends ... implements ...` clause, empty when there is none.
    pub fn extends_implements(&self) -> &str {
        self.hierarchy_start()
            .map_or("", |start| self.0[start..].trim())
    }

    /// Kind of type, matched on the declaration head in priority order
    /// interface, class, enum.
    pub fn kind(&self) -> ClassKind {
        let head = strip_formatting(self.name_with_modifiers());
        let has = |word: &str| head.split_whitespace().any(|token| token == word);

        if has("interface") || has("@interface") {
            ClassKind::Interface
        } else if has("class") {
            ClassKind::Class
        } else if has("enum") {
            ClassKind::Enum
        } else {
            ClassKind::Unknown
        }
    }

    /// Returns `true` when `modifier` appears as a word of the declaration head.
    pub fn has_modifier(&self, modifier: &str) -> bool {
        strip_formatting(self.name_with_modifiers())
            .split_whitespace()
            .any(|token| token == modifier)
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn angle_depth(text: &str) -> i32 {
    text.chars().fold(0, |depth, c| match c {
        '<' => depth + 1,
        '>' => depth - 1,
        _ => depth,
    })
}

/// A documented class, interface or enum.
///
/// Equality and hashing use the [`ClassKey`] only.
#[derive(Debug)]
pub struct Class {
    key: ClassKey,
    url: String,
    pub(crate) declaration: OnceCell<Declaration>,
    pub(crate) description: OnceCell<String>,
    pub(crate) method_table: OnceCell<MethodTable>,
    pub(crate) methods: OnceCell<Vec<Arc<Method>>>,
}

impl Class {
    /// Creates an unresolved class entity. No network access.
    pub fn new(package: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: ClassKey::new(package, name),
            url: url.into(),
            declaration: OnceCell::new(),
            description: OnceCell::new(),
            method_table: OnceCell::new(),
            methods: OnceCell::new(),
        }
    }

    /// Simple name.
    pub fn name(&self) -> &str {
        &self.key.name
    }

    /// Name of the owning package.
    pub fn package(&self) -> &str {
        &self.key.package
    }

    /// Identity of this class.
    pub const fn key(&self) -> &ClassKey {
        &self.key
    }

    /// `package.Name`.
    pub fn qualified_name(&self) -> String {
        self.key.qualified_name()
    }

    /// URL of the class page.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The declaration, if it has been resolved already.
    pub fn cached_declaration(&self) -> Option<&Declaration> {
        self.declaration.get()
    }

    /// Every method (own and inherited), if they have been resolved already.
    pub fn cached_methods(&self) -> Option<&[Arc<Method>]> {
        self.methods.get().map(Vec::as_slice)
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Class {}

impl Hash for Class {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Documented for Class {
    fn name(&self) -> &str {
        &self.key.name
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn cached_description(&self) -> Option<&str> {
        self.description.get().map(String::as_str)
    }
}
