//! Remove all seeded data, dependents before the rows they reference.

use serde::Serialize;

use super::report::{SeedEvent, SeedReporter};
use crate::error::BootstrapError;
use crate::repositories;
use crate::DbPool;

/// Every table touched by seeding or referencing seeded rows, in a delete
/// order that never orphans a foreign key.
pub const SEEDED_TABLES_IN_DELETE_ORDER: [&str; 7] = [
    "measurements",
    "patients",
    "faqs",
    "recommendations",
    "accounts",
    "tags",
    "roles",
];

/// Per-table result of a cleanup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// Tables emptied, with the number of rows removed.
    pub cleared: Vec<(&'static str, u64)>,
    /// Tables whose delete failed, with the error text.
    pub failed: Vec<(&'static str, String)>,
}

impl CleanupReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub(super) async fn run(
    pool: &DbPool,
    reporter: &dyn SeedReporter,
) -> Result<CleanupReport, BootstrapError> {
    let mut conn = pool.acquire().await?;
    let mut report = CleanupReport::default();

    for table in SEEDED_TABLES_IN_DELETE_ORDER {
        match repositories::delete_all(&mut conn, table).await {
            Ok(rows) => {
                reporter.report(SeedEvent::TableCleared { table, rows });
                report.cleared.push((table, rows));
            }
            Err(e) => {
                let error = e.to_string();
                reporter.report(SeedEvent::TableCleanupFailed {
                    table,
                    error: error.clone(),
                });
                report.failed.push((table, error));
            }
        }
    }

    Ok(report)
}
