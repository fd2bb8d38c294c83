//! Class, method and package lookups

use jdex_core::{Catalog, ClassLookup, MethodLookup, PackageLookup};

use super::Answer;
use crate::error::ErrorCategory;
use crate::output::Report;

/// Look a class up by simple or partially qualified name
pub async fn class(catalog: &Catalog, name: &str) -> Answer {
    class_answer(name, catalog.lookup_class(name).await)
}

/// Look a method up from its `Class#name(Types)` reference
pub async fn method(catalog: &Catalog, reference: &str) -> Answer {
    method_answer(reference, catalog.lookup_method_reference(reference).await)
}

/// Look a package up by its exact name
pub async fn package(catalog: &Catalog, name: &str) -> Answer {
    package_answer(name, catalog.lookup_package(name).await)
}

fn class_answer(query: &str, lookup: ClassLookup) -> Answer {
    match lookup {
        ClassLookup::Found(view) => Answer::Found(Report::Class(view)),
        ClassLookup::NotFound { suggestions } => not_found("class", query, suggestions),
        ClassLookup::Ambiguous(candidates) => ambiguous(query, candidates),
        ClassLookup::Failed(err) => Answer::Failed(err),
    }
}

fn method_answer(query: &str, lookup: MethodLookup) -> Answer {
    match lookup {
        MethodLookup::Found(view) => Answer::Found(Report::Method(view)),
        MethodLookup::Overloaded(overloads) => Answer::Miss(
            Report::Overloaded {
                query: query.to_string(),
                overloads,
            },
            ErrorCategory::Ambiguous,
        ),
        MethodLookup::ClassNotFound { suggestions } => not_found("class", query, suggestions),
        MethodLookup::ClassAmbiguous(candidates) => ambiguous(query, candidates),
        MethodLookup::MethodNotFound => not_found("method", query, Vec::new()),
        MethodLookup::Failed(err) => Answer::Failed(err),
    }
}

fn package_answer(query: &str, lookup: PackageLookup) -> Answer {
    match lookup {
        PackageLookup::Found(view) => Answer::Found(Report::Package(view)),
        PackageLookup::NotFound { suggestions } => not_found("package", query, suggestions),
        PackageLookup::Failed(err) => Answer::Failed(err),
    }
}

fn not_found(kind: &'static str, query: &str, suggestions: Vec<String>) -> Answer {
    Answer::Miss(
        Report::NotFound {
            kind,
            query: query.to_string(),
            suggestions,
        },
        ErrorCategory::NotFound,
    )
}

fn ambiguous(query: &str, candidates: Vec<String>) -> Answer {
    Answer::Miss(
        Report::Ambiguous {
            query: query.to_string(),
            candidates,
        },
        ErrorCategory::Ambiguous,
    )
}
