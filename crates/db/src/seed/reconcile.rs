//! Reconcile: converge an already-seeded store on the current catalog.
//!
//! Tags, recommendations and FAQs are handled independently, each on its own
//! pooled connection. An empty category gets its fresh insert in a short
//! transaction. A populated one has missing catalog entries topped up by
//! natural key, rows lacking newer attributes patched in place, and NULL
//! `is_active` flags normalised to active. Every failure is reported and
//! skipped; if a category cannot even be counted it is left alone.

use std::fmt;

use muac_core::bands::MuacThresholds;
use muac_core::dialect::Dialect;
use muac_core::reference::{recommendation_catalog, tag_catalog, FAQ_CATALOG};
use serde::Serialize;
use sqlx::pool::PoolConnection;
use sqlx::{Any, Connection, Transaction};

use super::fresh;
use super::report::{SeedEvent, SeedReporter};
use super::Category;
use crate::repositories::{FaqRepo, RecommendationRepo, TagRepo};
use crate::DbPool;

/// Per-category result of a reconcile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryReconcile {
    pub inserted: u64,
    pub patched: u64,
    pub activated: u64,
    pub warnings: usize,
    /// The category could not be read and was not touched.
    pub skipped: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub tags: CategoryReconcile,
    pub recommendations: CategoryReconcile,
    pub faqs: CategoryReconcile,
}

impl ReconcileReport {
    pub fn warnings(&self) -> usize {
        self.tags.warnings + self.recommendations.warnings + self.faqs.warnings
    }
}

pub(super) async fn run(
    pool: &DbPool,
    thresholds: &MuacThresholds,
    reporter: &dyn SeedReporter,
) -> ReconcileReport {
    ReconcileReport {
        tags: reconcile_tags(pool, reporter).await,
        recommendations: reconcile_recommendations(pool, thresholds, reporter).await,
        faqs: reconcile_faqs(pool, reporter).await,
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

async fn reconcile_tags(pool: &DbPool, reporter: &dyn SeedReporter) -> CategoryReconcile {
    let mut run = CategoryRun::new(Category::Tags, reporter);
    let Some((mut conn, dialect)) = run.open(pool).await else {
        return run.finish();
    };
    let existing = match TagRepo::count(&mut conn).await {
        Ok(existing) => existing,
        Err(e) => {
            run.skip(e);
            return run.finish();
        }
    };

    if existing == 0 {
        let inserted = match conn.begin().await {
            Ok(mut tx) => {
                let result = fresh::insert_tags(&mut tx, dialect).await;
                settle(tx, result).await
            }
            Err(e) => Err(e),
        };
        run.inserted(inserted);
        return run.finish();
    }

    for tag in tag_catalog() {
        match TagRepo::exists_by_code(&mut conn, tag.code).await {
            Ok(true) => run.patched(TagRepo::patch_missing_attributes(&mut conn, &tag).await),
            Ok(false) => run.inserted(TagRepo::insert(&mut conn, dialect, &tag).await.map(|_| 1)),
            Err(e) => run.warn(e),
        }
    }
    run.activated(TagRepo::activate_indeterminate(&mut conn).await);
    run.finish()
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

async fn reconcile_recommendations(
    pool: &DbPool,
    thresholds: &MuacThresholds,
    reporter: &dyn SeedReporter,
) -> CategoryReconcile {
    let mut run = CategoryRun::new(Category::Recommendations, reporter);
    let Some((mut conn, dialect)) = run.open(pool).await else {
        return run.finish();
    };
    let existing = match RecommendationRepo::count(&mut conn).await {
        Ok(existing) => existing,
        Err(e) => {
            run.skip(e);
            return run.finish();
        }
    };

    if existing == 0 {
        let inserted = match conn.begin().await {
            Ok(mut tx) => {
                let result = fresh::insert_recommendations(&mut tx, dialect, thresholds).await;
                settle(tx, result).await
            }
            Err(e) => Err(e),
        };
        run.inserted(inserted);
        return run.finish();
    }

    for rec in recommendation_catalog(thresholds) {
        match RecommendationRepo::exists_for_band(&mut conn, rec.band_code).await {
            Ok(true) => {
                run.patched(RecommendationRepo::patch_missing_bounds(&mut conn, &rec).await);
                run.patched(RecommendationRepo::patch_missing_follow_up(&mut conn, &rec).await);
            }
            Ok(false) => run.inserted(
                RecommendationRepo::insert(&mut conn, dialect, &rec)
                    .await
                    .map(|_| 1),
            ),
            Err(e) => run.warn(e),
        }
    }
    run.activated(RecommendationRepo::activate_indeterminate(&mut conn).await);
    run.finish()
}

// ---------------------------------------------------------------------------
// FAQs
// ---------------------------------------------------------------------------

async fn reconcile_faqs(pool: &DbPool, reporter: &dyn SeedReporter) -> CategoryReconcile {
    let mut run = CategoryRun::new(Category::Faqs, reporter);
    let Some((mut conn, dialect)) = run.open(pool).await else {
        return run.finish();
    };
    let existing = match FaqRepo::count(&mut conn).await {
        Ok(existing) => existing,
        Err(e) => {
            run.skip(e);
            return run.finish();
        }
    };

    if existing == 0 {
        let inserted = match conn.begin().await {
            Ok(mut tx) => {
                let result = fresh::insert_faqs(&mut tx, dialect).await;
                settle(tx, result).await
            }
            Err(e) => Err(e),
        };
        run.inserted(inserted);
        return run.finish();
    }

    for faq in FAQ_CATALOG {
        match FaqRepo::exists(&mut conn, faq).await {
            Ok(true) => run.patched(FaqRepo::patch_missing_sort_order(&mut conn, faq).await),
            Ok(false) => run.inserted(FaqRepo::insert(&mut conn, dialect, faq).await.map(|_| 1)),
            Err(e) => run.warn(e),
        }
    }
    run.activated(FaqRepo::activate_indeterminate(&mut conn).await);
    run.finish()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Commit on success, roll back on failure.
async fn settle(
    tx: Transaction<'_, Any>,
    result: Result<u64, sqlx::Error>,
) -> Result<u64, sqlx::Error> {
    match result {
        Ok(rows) => {
            tx.commit().await?;
            Ok(rows)
        }
        Err(e) => {
            tx.rollback().await?;
            Err(e)
        }
    }
}

/// Accumulates one category's counters and reports as it goes.
struct CategoryRun<'r> {
    category: Category,
    reporter: &'r dyn SeedReporter,
    outcome: CategoryReconcile,
}

impl<'r> CategoryRun<'r> {
    fn new(category: Category, reporter: &'r dyn SeedReporter) -> Self {
        Self {
            category,
            reporter,
            outcome: CategoryReconcile::default(),
        }
    }

    /// Acquire a connection for this category. `None` means the category
    /// is unreachable and has been marked skipped.
    async fn open(&mut self, pool: &DbPool) -> Option<(PoolConnection<Any>, Dialect)> {
        let conn = match pool.acquire().await {
            Ok(conn) => conn,
            Err(e) => {
                self.skip(e);
                return None;
            }
        };
        match crate::dialect_of(&conn) {
            Ok(dialect) => Some((conn, dialect)),
            Err(e) => {
                self.skip(e);
                None
            }
        }
    }

    /// Mark the category unreadable; nothing else will be attempted.
    fn skip(&mut self, error: impl fmt::Display) {
        self.outcome.skipped = true;
        self.warn(error);
    }

    fn warn(&mut self, error: impl fmt::Display) {
        self.outcome.warnings += 1;
        self.reporter.report(SeedEvent::CategoryWarning {
            category: self.category,
            error: error.to_string(),
        });
    }

    fn inserted(&mut self, result: Result<u64, sqlx::Error>) {
        match result {
            Ok(rows) => self.outcome.inserted += rows,
            Err(e) => self.warn(e),
        }
    }

    fn patched(&mut self, result: Result<u64, sqlx::Error>) {
        match result {
            Ok(rows) => self.outcome.patched += rows,
            Err(e) => self.warn(e),
        }
    }

    fn activated(&mut self, result: Result<u64, sqlx::Error>) {
        match result {
            Ok(rows) => self.outcome.activated += rows,
            Err(e) => self.warn(e),
        }
    }

    fn finish(self) -> CategoryReconcile {
        let category = self.category;
        let CategoryReconcile {
            inserted,
            patched,
            activated,
            ..
        } = self.outcome;

        if inserted > 0 {
            self.reporter.report(SeedEvent::CategoryInserted {
                category,
                rows: inserted,
            });
        }
        if patched > 0 {
            self.reporter.report(SeedEvent::CategoryPatched {
                category,
                rows: patched,
            });
        }
        if activated > 0 {
            self.reporter.report(SeedEvent::CategoryActivated {
                category,
                rows: activated,
            });
        }
        self.outcome
    }
}
