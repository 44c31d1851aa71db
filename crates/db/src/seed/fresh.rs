//! Fresh seed: bulk-insert every baseline category in one transaction.

use muac_core::bands::MuacThresholds;
use muac_core::dialect::Dialect;
use muac_core::password::{GeneratedPassword, PreparedAdmin};
use muac_core::reference::{recommendation_catalog, tag_catalog, FAQ_CATALOG};
use muac_core::roles::{BASELINE_ROLES, ROLE_ADMIN};
use serde::Serialize;
use sqlx::AnyConnection;

use super::report::{SeedEvent, SeedReporter};
use super::{SeedConfig, SeedStage};
use crate::error::{BootstrapError, TransactionAction};
use crate::repositories::{AccountRepo, FaqRepo, RecommendationRepo, RoleRepo, TagRepo};
use crate::DbPool;

/// Rows inserted per category by a fresh seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FreshSeedCounts {
    pub roles: u64,
    pub tags: u64,
    pub recommendations: u64,
    pub accounts: u64,
    pub faqs: u64,
}

pub(super) async fn run(
    pool: &DbPool,
    config: &SeedConfig,
    reporter: &dyn SeedReporter,
) -> Result<(FreshSeedCounts, Option<GeneratedPassword>), BootstrapError> {
    // Hash before opening the transaction so a credential problem never
    // leaves one half-open.
    let admin = config.admin.prepare()?;

    let mut tx = pool
        .begin()
        .await
        .map_err(BootstrapError::transaction(TransactionAction::Begin))?;
    let dialect = crate::dialect_of(&tx)?;

    match insert_all(&mut tx, dialect, config, &admin, reporter).await {
        Ok(counts) => {
            tx.commit()
                .await
                .map_err(BootstrapError::transaction(TransactionAction::Commit))?;
            reporter.report(SeedEvent::FreshSeedCommitted);
            Ok((counts, admin.generated_password))
        }
        Err((stage, source)) => {
            reporter.report(SeedEvent::FreshSeedRolledBack {
                stage,
                error: source.to_string(),
            });
            // Dropping `tx` discards it even if the explicit rollback fails.
            if let Err(e) = tx.rollback().await {
                tracing::warn!(%stage, error = %e, "Rollback after failed seed stage failed");
            }
            Err(BootstrapError::Seed { stage, source })
        }
    }
}

/// Run every stage in order, stopping at the first failure.
async fn insert_all(
    conn: &mut AnyConnection,
    dialect: Dialect,
    config: &SeedConfig,
    admin: &PreparedAdmin,
    reporter: &dyn SeedReporter,
) -> Result<FreshSeedCounts, (SeedStage, sqlx::Error)> {
    let mut counts = FreshSeedCounts::default();

    for role in &BASELINE_ROLES {
        RoleRepo::insert(conn, dialect, role)
            .await
            .map_err(|e| (SeedStage::Roles, e))?;
        counts.roles += 1;
    }
    reporter.report(SeedEvent::StageCompleted {
        stage: SeedStage::Roles,
        rows: counts.roles,
    });

    counts.tags = insert_tags(conn, dialect)
        .await
        .map_err(|e| (SeedStage::Tags, e))?;
    reporter.report(SeedEvent::StageCompleted {
        stage: SeedStage::Tags,
        rows: counts.tags,
    });

    counts.recommendations = insert_recommendations(conn, dialect, &config.thresholds)
        .await
        .map_err(|e| (SeedStage::Recommendations, e))?;
    reporter.report(SeedEvent::StageCompleted {
        stage: SeedStage::Recommendations,
        rows: counts.recommendations,
    });

    AccountRepo::insert_with_role(conn, dialect, admin, ROLE_ADMIN)
        .await
        .map_err(|e| (SeedStage::AdminAccount, e))?;
    counts.accounts = 1;
    reporter.report(SeedEvent::StageCompleted {
        stage: SeedStage::AdminAccount,
        rows: counts.accounts,
    });

    counts.faqs = insert_faqs(conn, dialect)
        .await
        .map_err(|e| (SeedStage::Faqs, e))?;
    reporter.report(SeedEvent::StageCompleted {
        stage: SeedStage::Faqs,
        rows: counts.faqs,
    });

    Ok(counts)
}

// The per-category inserts below are shared with the reconcile path, which
// runs them when a category is found empty.

pub(super) async fn insert_tags(
    conn: &mut AnyConnection,
    dialect: Dialect,
) -> Result<u64, sqlx::Error> {
    let mut rows = 0;
    for tag in tag_catalog() {
        TagRepo::insert(conn, dialect, &tag).await?;
        rows += 1;
    }
    Ok(rows)
}

pub(super) async fn insert_recommendations(
    conn: &mut AnyConnection,
    dialect: Dialect,
    thresholds: &MuacThresholds,
) -> Result<u64, sqlx::Error> {
    let mut rows = 0;
    for rec in recommendation_catalog(thresholds) {
        RecommendationRepo::insert(conn, dialect, &rec).await?;
        rows += 1;
    }
    Ok(rows)
}

pub(super) async fn insert_faqs(
    conn: &mut AnyConnection,
    dialect: Dialect,
) -> Result<u64, sqlx::Error> {
    let mut rows = 0;
    for faq in FAQ_CATALOG {
        FaqRepo::insert(conn, dialect, faq).await?;
        rows += 1;
    }
    Ok(rows)
}
