//! Per-entity lazy fields.
//!
//! Each lazy field owns a [`OnceCell`]; [`memoize`] runs the field's fetch at
//! most once per cell. Concurrent callers of the same empty cell wait on the
//! single in-flight initialization, unrelated cells never contend, and a
//! failed initialization leaves the cell empty so the next caller retries.

use crate::Result;
use std::future::Future;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Returns the memoized value of `cell`, running `init` if it is still empty.
///
/// `field` and `owner` only feed the log lines.
pub async fn memoize<'a, T, F, Fut>(
    cell: &'a OnceCell<T>,
    field: &'static str,
    owner: &str,
    init: F,
) -> Result<&'a T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if let Some(value) = cell.get() {
        return Ok(value);
    }

    cell.get_or_try_init(|| async {
        debug!(field, owner, "resolving lazy field");
        let resolved = init().await;
        if let Err(e) = &resolved {
            warn!(field, owner, category = e.category(), "lazy resolution failed: {e}");
        }
        resolved
    })
    .await
}
