//! Reference-data seed orchestrator.
//!
//! Each invocation counts existing roles. An empty `roles` table selects the
//! fresh path: every baseline category is inserted in one all-or-nothing
//! transaction. Otherwise the reconcile path tops up and patches tags,
//! recommendations and FAQs, each independently and best-effort.
//!
//! Assumes a single seeding invocation per store at a time; two racing fresh
//! seeds will collide on natural-key uniqueness.

mod cleanup;
mod fresh;
mod reconcile;
mod report;
mod status;
mod validate;

use std::fmt;
use std::sync::Arc;

use muac_core::bands::MuacThresholds;
use muac_core::password::{AdminCredentials, GeneratedPassword};
use serde::Serialize;

use crate::error::BootstrapError;
use crate::repositories::RoleRepo;
use crate::DbPool;

pub use cleanup::{CleanupReport, SEEDED_TABLES_IN_DELETE_ORDER};
pub use fresh::FreshSeedCounts;
pub use reconcile::{CategoryReconcile, ReconcileReport};
pub use report::{RecordingReporter, SeedEvent, SeedReporter, TracingReporter};
pub use status::{get_seeding_status, CategoryCounts, SeedingStatus};
pub use validate::validate_seed_data;

// ---------------------------------------------------------------------------
// Stages and categories
// ---------------------------------------------------------------------------

/// A step of the fresh-seed transaction, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedStage {
    Roles,
    Tags,
    Recommendations,
    AdminAccount,
    Faqs,
}

impl fmt::Display for SeedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SeedStage::Roles => "roles",
            SeedStage::Tags => "tags",
            SeedStage::Recommendations => "recommendations",
            SeedStage::AdminAccount => "admin_account",
            SeedStage::Faqs => "faqs",
        })
    }
}

/// A reference-data category handled by reconcile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Tags,
    Recommendations,
    Faqs,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Tags => "tags",
            Category::Recommendations => "recommendations",
            Category::Faqs => "faqs",
        })
    }
}

// ---------------------------------------------------------------------------
// Seeder
// ---------------------------------------------------------------------------

/// Externally supplied inputs to seeding.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub thresholds: MuacThresholds,
    pub admin: AdminCredentials,
}

/// What [`Seeder::seed_database`] did.
#[derive(Debug)]
pub enum SeedOutcome {
    Fresh {
        counts: FreshSeedCounts,
        /// Present when no admin password was supplied. Shown once; only
        /// its hash is stored.
        generated_admin_password: Option<GeneratedPassword>,
    },
    Reconciled(ReconcileReport),
}

/// Runs seeding and cleanup, reporting progress to an injected reporter.
#[derive(Clone)]
pub struct Seeder {
    config: SeedConfig,
    reporter: Arc<dyn SeedReporter>,
}

impl Seeder {
    /// A seeder that reports through `tracing`.
    pub fn new(config: SeedConfig) -> Self {
        Self {
            config,
            reporter: Arc::new(TracingReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn SeedReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Ensure baseline reference data exists and is current.
    ///
    /// Fresh-seed failures are fatal and leave nothing behind. Reconcile
    /// failures are reported as warnings and never returned.
    pub async fn seed_database(&self, pool: &DbPool) -> Result<SeedOutcome, BootstrapError> {
        self.config.thresholds.validate()?;

        let existing_roles = {
            let mut conn = pool.acquire().await?;
            RoleRepo::count(&mut conn).await?
        };

        if existing_roles == 0 {
            self.reporter.report(SeedEvent::FreshSeedStarted);
            let (counts, generated_admin_password) =
                fresh::run(pool, &self.config, self.reporter.as_ref()).await?;
            Ok(SeedOutcome::Fresh {
                counts,
                generated_admin_password,
            })
        } else {
            self.reporter
                .report(SeedEvent::ReconcileStarted { existing_roles });
            let report =
                reconcile::run(pool, &self.config.thresholds, self.reporter.as_ref()).await;
            Ok(SeedOutcome::Reconciled(report))
        }
    }

    /// Delete every seeded row, dependents first. Per-table failures are
    /// reported and recorded, never fatal.
    pub async fn clean_seed_data(&self, pool: &DbPool) -> Result<CleanupReport, BootstrapError> {
        cleanup::run(pool, self.reporter.as_ref()).await
    }
}
