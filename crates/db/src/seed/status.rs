//! Read-only seeding status.

use muac_core::bands::Band;
use muac_core::roles::ROLE_ADMIN;
use serde::Serialize;

use crate::error::BootstrapError;
use crate::repositories::{AccountRepo, FaqRepo, RecommendationRepo, RoleRepo, TagRepo};
use crate::DbPool;

/// Row counts per reference category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub roles: i64,
    pub tags: i64,
    pub recommendations: i64,
    pub faqs: i64,
    pub accounts: i64,
}

/// Snapshot of how far seeding has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedingStatus {
    /// At least one role exists.
    pub is_seeded: bool,
    pub counts: CategoryCounts,
    /// Every numeric band has both its tag and its recommendation.
    pub muac_ready: bool,
    /// An account is linked to the administrator role.
    pub has_admin: bool,
}

pub async fn get_seeding_status(pool: &DbPool) -> Result<SeedingStatus, BootstrapError> {
    let mut conn = pool.acquire().await?;

    let counts = CategoryCounts {
        roles: RoleRepo::count(&mut conn).await?,
        tags: TagRepo::count(&mut conn).await?,
        recommendations: RecommendationRepo::count(&mut conn).await?,
        faqs: FaqRepo::count(&mut conn).await?,
        accounts: AccountRepo::count(&mut conn).await?,
    };

    let mut muac_ready = true;
    for band in Band::NUMERIC {
        if !TagRepo::exists_by_code(&mut conn, band.code()).await?
            || !RecommendationRepo::exists_for_band(&mut conn, band.code()).await?
        {
            muac_ready = false;
            break;
        }
    }

    let has_admin = AccountRepo::count_with_role(&mut conn, ROLE_ADMIN).await? > 0;

    Ok(SeedingStatus {
        is_seeded: counts.roles > 0,
        counts,
        muac_ready,
        has_admin,
    })
}
