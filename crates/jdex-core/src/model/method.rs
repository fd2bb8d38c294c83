use super::{ClassKey, Documented};
use crate::markup::strip_formatting;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use tokio::sync::OnceCell;

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Type as written, e.g. `List<? extends E>` or `int...`.
    pub type_name: String,
    /// Parameter name.
    pub name: String,
}

impl Parameter {
    /// Creates a parameter.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// Scraped, not yet attached, method data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodRecord {
    /// Method name.
    pub name: String,
    /// Absolute URL including the in-page anchor.
    pub url: String,
    /// Converted return type cell (modifiers included, e.g. `static int`).
    pub return_type: String,
    /// Full converted signature, `throws` clause included.
    pub declaration: String,
    /// First sentence of the documentation.
    pub short_description: String,
}

/// A documented method.
#[derive(Debug)]
pub struct Method {
    name: String,
    url: String,
    class: ClassKey,
    return_type: String,
    declaration: String,
    short_description: String,
    inherited: bool,
    parameters: Vec<Parameter>,
    pub(crate) description: OnceCell<String>,
}

/// Whole-word `throws`.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static THROWS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bthrows\b").unwrap());

impl Method {
    /// Attaches `record` to `class`. Parameters are parsed from the
    /// declaration here, once.
    pub fn new(class: ClassKey, record: MethodRecord, inherited: bool) -> Self {
        let parameters = parse_parameters(&record.declaration);
        Self {
            name: record.name,
            url: record.url,
            class,
            return_type: record.return_type,
            declaration: record.declaration,
            short_description: record.short_description,
            inherited,
            parameters,
            description: OnceCell::new(),
        }
    }

    /// Copy of this method exposed through `class` as an inherited member.
    ///
    /// URL and declaration keep pointing at the documenting supertype; the
    /// copy starts with an unresolved description of its own.
    pub fn inherited_by(&self, class: ClassKey) -> Self {
        Self {
            name: self.name.clone(),
            url: self.url.clone(),
            class,
            return_type: self.return_type.clone(),
            declaration: self.declaration.clone(),
            short_description: self.short_description.clone(),
            inherited: true,
            parameters: self.parameters.clone(),
            description: OnceCell::new(),
        }
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL of the method's detail anchor.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The class whose API surface this method is part of.
    pub const fn class(&self) -> &ClassKey {
        &self.class
    }

    /// Return type cell text.
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    /// Full signature, `throws` clause included.
    pub fn declaration(&self) -> &str {
        &self.declaration
    }

    /// First sentence of the documentation, possibly empty.
    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    /// Whether the method is documented on a supertype.
    pub const fn is_inherited(&self) -> bool {
        self.inherited
    }

    /// Declared parameters in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Start of the first `throws` outside any parentheses (link targets
    /// and the parameter list are skipped).
    fn throws_start(&self) -> Option<usize> {
        THROWS_RE
            .find_iter(&self.declaration)
            .map(|m| m.start())
            .find(|&start| paren_depth(&self.declaration[..start]) == 0)
    }

    /// Declaration with the `throws` clause removed.
    pub fn declaration_without_exceptions(&self) -> &str {
        self.throws_start()
            .map_or(self.declaration.as_str(), |start| self.declaration[..start].trim_end())
    }

    /// The `throws ...` clause, empty when nothing is declared.
    pub fn exceptions(&self) -> &str {
        self.throws_start()
            .map_or("", |start| self.declaration[start..].trim())
    }

    /// `name(Type a, Other b)`.
    pub fn name_with_parameters(&self) -> String {
        let parameters = self
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.type_name, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({parameters})", self.name)
    }

    /// Returns `true` when `abstract` is one of the declaration's modifiers.
    pub fn is_abstract(&self) -> bool {
        let plain = strip_formatting(&self.declaration);
        let head = parameter_list_start(&plain).map_or(plain.as_str(), |open| &plain[..open]);
        head.split_whitespace().any(|token| token == "abstract")
    }
}

impl Documented for Method {
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

/// Parses the parameter list out of a (possibly formatted) declaration.
///
/// The list is the text inside the outermost parentheses, split on commas
/// that are not nested in `<>` or `()`. In every segment the last word is the
/// parameter name and the rest is the type.
pub fn parse_parameters(declaration: &str) -> Vec<Parameter> {
    let plain = strip_formatting(declaration).replace('\u{a0}', " ");
    let Some(inner) = outermost_parentheses(&plain) else {
        return Vec::new();
    };

    split_top_level(inner)
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let words: Vec<&str> = segment.split_whitespace().collect();
            match words.split_last() {
                Some((name, type_words)) if !type_words.is_empty() => {
                    Parameter::new(type_words.join(" "), *name)
                },
                _ => Parameter::new(segment, ""),
            }
        })
        .collect()
}

fn paren_depth(text: &str) -> i32 {
    text.chars().fold(0, |depth, c| match c {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    })
}

fn outermost_parentheses(text: &str) -> Option<&str> {
    let open = parameter_list_start(text)?;
    let end = matching_parenthesis(text, open).unwrap_or(text.len());
    Some(&text[open + 1..end])
}

/// Offset of the `(` opening the parameter list. Argument lists of
/// annotations such as `@Contract("_ -> new")` in front of it are skipped.
fn parameter_list_start(text: &str) -> Option<usize> {
    let mut from = 0;
    loop {
        let open = from + text[from..].find('(')?;
        if !follows_annotation(&text[..open]) {
            return Some(open);
        }
        from = matching_parenthesis(text, open)? + 1;
    }
}

fn matching_parenthesis(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            },
            _ => {},
        }
    }
    None
}

/// Whether `head` ends with an annotation name like `@Deprecated`.
fn follows_annotation(head: &str) -> bool {
    let head = head.trim_end();
    let rest = head.trim_end_matches(|c: char| c.is_alphanumeric() || matches!(c, '_' | '$' | '.'));
    rest.len() < head.len() && rest.ends_with('@')
}

pub(crate) fn split_top_level(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (index, c) in text.char_indices() {
        match c {
            '<' | '(' => depth += 1,
            '>' | ')' => depth -= 1,
            ',' if depth == 0 => {
                segments.push(&text[start..index]);
                start = index + 1;
            },
            _ => {},
        }
    }
    segments.push(&text[start..]);
    segments
}

/// Whether an inherited-methods marker names a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupertypeKind {
    /// "Methods inherited from class ..."
    Class,
    /// "Methods inherited from interface ..."
    Interface,
}

/// One "methods inherited from" marker on a class page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritedGroup {
    /// Fully qualified supertype name as written in the anchor.
    pub supertype: String,
    /// Class or interface, per the marker heading.
    pub kind: SupertypeKind,
    /// Names of the methods the page lists as inherited.
    pub names: Vec<String>,
    /// Absolute link targets of the listed names, pointing into the
    /// supertype's detail anchors.
    pub urls: Vec<String>,
}

/// Everything the method summary of one class page yields.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    /// Methods declared on the page itself.
    pub own: Vec<Arc<Method>>,
    /// Inheritance markers, in page order.
    pub inherited: Vec<InheritedGroup>,
}
