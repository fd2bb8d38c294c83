//! Index statistics command implementation

use jdex_core::Catalog;

use super::Answer;
use crate::output::Report;

/// Execute the stats command
pub async fn execute(catalog: &Catalog) -> Answer {
    Answer::Found(Report::Summary(catalog.summary().await))
}
