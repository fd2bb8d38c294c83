//! Parsing of user supplied method references.
//!
//! ```rust
//! use jdex_core::query::{MethodQuery, MethodReference};
//!
//! let reference = MethodReference::parse("java.util.List#add(int, E)")?;
//! assert_eq!(reference.class, "java.util.List");
//!
//! let query = MethodQuery::parse(&reference.method);
//! assert_eq!(query.name(), "add");
//! assert_eq!(query.parameters(), Some(&["int".to_string(), "E".to_string()][..]));
//! # Ok::<(), jdex_core::Error>(())
//! ```

use crate::model::{Method, Parameter, split_top_level};
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// `name` or `name(Type, Type)`.
///
/// Without parentheses every method of that name matches. With parentheses
/// (even empty ones) the parameter types narrow the overloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodQuery {
    name: String,
    parameters: Option<Vec<String>>,
}

impl MethodQuery {
    /// Splits `input` into name and optional parameter types.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.split_once('(') {
            Some((name, rest)) => {
                let inner = rest.trim_end();
                let inner = inner.strip_suffix(')').unwrap_or(inner);
                let parameters = split_top_level(inner)
                    .into_iter()
                    .map(str::trim)
                    .filter(|token| !token.is_empty())
                    .map(ToString::to_string)
                    .collect();
                Self {
                    name: name.trim().to_string(),
                    parameters: Some(parameters),
                }
            },
            None => Self {
                name: input.to_string(),
                parameters: None,
            },
        }
    }

    /// Method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter types, when the query had parentheses.
    pub fn parameters(&self) -> Option<&[String]> {
        self.parameters.as_deref()
    }

    /// Picks the methods this query refers to.
    ///
    /// Candidates are the methods with the queried name. A parameter list
    /// that singles out exactly one candidate returns that candidate alone;
    /// otherwise every candidate is returned so the caller can present the
    /// overloads.
    pub fn select(&self, methods: &[Arc<Method>]) -> Vec<Arc<Method>> {
        let by_name: Vec<Arc<Method>> = methods
            .iter()
            .filter(|method| method.name() == self.name)
            .cloned()
            .collect();
        let Some(tokens) = &self.parameters else {
            return by_name;
        };

        let matching: Vec<Arc<Method>> = by_name
            .iter()
            .filter(|method| parameters_match(tokens, method.parameters()))
            .cloned()
            .collect();
        if matching.len() == 1 { matching } else { by_name }
    }
}

impl fmt::Display for MethodQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameters {
            Some(parameters) => write!(f, "{}({})", self.name, parameters.join(", ")),
            None => f.write_str(&self.name),
        }
    }
}

/// Order-insensitive multiset comparison of query types and declared types.
fn parameters_match(tokens: &[String], parameters: &[Parameter]) -> bool {
    if tokens.len() != parameters.len() {
        return false;
    }
    let mut wanted: Vec<String> = tokens.iter().map(|token| erase(token)).collect();
    let mut declared: Vec<String> = parameters.iter().map(|p| erase(&p.type_name)).collect();
    wanted.sort_unstable();
    declared.sort_unstable();
    wanted == declared
}

/// `List<E>` and `List` compare equal; whitespace is insignificant.
pub(crate) fn erase(type_name: &str) -> String {
    let compact: String = type_name.chars().filter(|c| !c.is_whitespace()).collect();
    match compact.split_once('<') {
        Some((raw, rest)) => {
            let array_suffix = rest.rsplit_once('>').map_or("", |(_, suffix)| suffix);
            format!("{raw}{array_suffix}")
        },
        None => compact,
    }
}

/// `package.Class#method(Types)` as typed into the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodReference {
    /// Class part, simple or partially qualified.
    pub class: String,
    /// Method part, with optional parameter list.
    pub method: String,
}

impl MethodReference {
    /// Splits at the first `#`.
    pub fn parse(input: &str) -> Result<Self> {
        let (class, method) = input
            .trim()
            .split_once('#')
            .ok_or_else(|| Error::InvalidLink(format!("'{input}' is not of the form Class#method")))?;
        let (class, method) = (class.trim(), method.trim());
        if class.is_empty() || method.is_empty() {
            return Err(Error::InvalidLink(format!(
                "'{input}' needs both a class and a method"
            )));
        }
        Ok(Self {
            class: class.to_string(),
            method: method.to_string(),
        })
    }
}
