//! JSON output formatting

use super::Report;
use anyhow::Result;
use serde_json::json;

pub struct JsonFormatter;

impl JsonFormatter {
    /// Render a report as a pretty-printed JSON object with a `status` field
    pub fn render(report: &Report) -> Result<String> {
        let value = match report {
            Report::Class(view) => json!({ "status": "found", "class": view }),
            Report::Method(view) => json!({ "status": "found", "method": view }),
            Report::Package(view) => json!({ "status": "found", "package": view }),
            Report::Summary(summary) => json!({ "status": "stats", "summary": summary }),
            Report::NotFound {
                kind,
                query,
                suggestions,
            } => json!({
                "status": "not_found",
                "kind": kind,
                "query": query,
                "suggestions": suggestions,
            }),
            Report::Ambiguous { query, candidates } => json!({
                "status": "ambiguous",
                "query": query,
                "candidates": candidates,
            }),
            Report::Overloaded { query, overloads } => json!({
                "status": "overloaded",
                "query": query,
                "overloads": overloads,
            }),
            Report::Failed { category, message } => json!({
                "status": "failed",
                "category": category,
                "error": message,
            }),
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
