//! Text output formatting

use super::Report;
use colored::Colorize;
use jdex_core::{ClassIcon, ClassView, IndexSummary, MethodIcon, MethodView, PackageView};
use std::fmt::Write as _;

pub struct TextFormatter;

impl TextFormatter {
    /// Render a report in the colorized layout
    pub fn render(report: &Report) -> String {
        match report {
            Report::Class(view) => Self::class(view),
            Report::Method(view) => Self::method(view),
            Report::Package(view) => Self::package(view),
            Report::Summary(summary) => Self::summary(summary),
            Report::NotFound {
                kind,
                query,
                suggestions,
            } => {
                let mut out = format!("No {kind} matches '{query}'.");
                if !suggestions.is_empty() {
                    let _ = write!(out, "\nDid you mean: {}?", suggestions.join(", "));
                }
                out
            },
            Report::Ambiguous { query, candidates } => {
                list(&format!("'{query}' matches several classes:"), candidates)
            },
            Report::Overloaded { query, overloads } => {
                list(&format!("'{query}' has several overloads:"), overloads)
            },
            Report::Failed { category, message } => {
                format!("{} {message}", format!("[{category}]").red())
            },
        }
    }

    fn class(view: &ClassView) -> String {
        let mut out = format!(
            "{} {}\n{}\n{}",
            class_label(view.icon).cyan(),
            view.qualified_name.bold(),
            view.declaration,
            view.url.bright_black()
        );
        push_description(&mut out, &view.description);
        out
    }

    fn method(view: &MethodView) -> String {
        let label = match (view.icon, view.inherited) {
            (MethodIcon::Abstract, _) => "abstract method",
            (MethodIcon::Plain, true) => "inherited method",
            (MethodIcon::Plain, false) => "method",
        };
        let mut out = format!(
            "{} {}#{}\n{}\n{}",
            label.cyan(),
            view.class.bold(),
            view.name.bold(),
            view.declaration,
            view.url.bright_black()
        );
        let description = if view.description.is_empty() {
            &view.short_description
        } else {
            &view.description
        };
        push_description(&mut out, description);
        out
    }

    fn package(view: &PackageView) -> String {
        let mut out = format!("{} {}", "package".cyan(), view.name.bold());
        if !view.short_description.is_empty() {
            let _ = write!(out, "\n{}", view.short_description);
        }
        let _ = write!(out, "\n{}", view.url.bright_black());
        push_description(&mut out, &view.description);
        if !view.classes.is_empty() {
            let _ = write!(out, "\n\n{}", list("Classes:", &view.classes));
        }
        out
    }

    fn summary(summary: &IndexSummary) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "jdex index");
        let _ = writeln!(out, "==========");
        let _ = writeln!(out, "Site: {}", summary.base_url);
        let _ = writeln!(out, "Classes: {}", summary.class_count);
        let _ = writeln!(out, "Packages: {}", summary.package_count);
        let _ = write!(
            out,
            "Built: {} ({} ms)",
            summary.built_at.to_rfc3339(),
            summary.build_millis
        );
        if !summary.skipped.is_empty() {
            let _ = write!(out, "\nSkipped {} listing entries:", summary.skipped.len());
            for entry in &summary.skipped {
                let _ = write!(out, "\n  {} ({}): {}", entry.name, entry.url, entry.reason);
            }
        }
        out
    }
}

const fn class_label(icon: ClassIcon) -> &'static str {
    match icon {
        ClassIcon::Abstract => "abstract class",
        ClassIcon::Interface => "interface",
        ClassIcon::Enum => "enum",
        ClassIcon::Final => "final class",
        ClassIcon::Class => "class",
    }
}

fn push_description(out: &mut String, description: &str) {
    if !description.is_empty() {
        let _ = write!(out, "\n\n{description}");
    }
}

fn list(heading: &str, items: &[String]) -> String {
    let mut out = heading.to_string();
    for item in items {
        let _ = write!(out, "\n  {item}");
    }
    out
}
