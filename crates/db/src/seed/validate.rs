//! Post-seed integrity check.

use muac_core::bands::Band;
use muac_core::roles::{BASELINE_ROLES, ROLE_ADMIN};

use crate::error::{BootstrapError, MissingSeedItem};
use crate::repositories::{AccountRepo, RecommendationRepo, RoleRepo, TagRepo};
use crate::DbPool;

/// Confirm the baseline exists.
///
/// Checks roles, then a tag per numeric band, then a recommendation per
/// numeric band, then an administrator account, and fails on the first
/// missing item.
pub async fn validate_seed_data(pool: &DbPool) -> Result<(), BootstrapError> {
    let mut conn = pool.acquire().await?;

    for role in &BASELINE_ROLES {
        if !RoleRepo::exists_by_name(&mut conn, role.name).await? {
            return Err(BootstrapError::Validation(MissingSeedItem::Role(
                role.name.to_string(),
            )));
        }
    }

    for band in Band::NUMERIC {
        if !TagRepo::exists_by_code(&mut conn, band.code()).await? {
            return Err(BootstrapError::Validation(MissingSeedItem::Tag(
                band.code().to_string(),
            )));
        }
    }

    for band in Band::NUMERIC {
        if !RecommendationRepo::exists_for_band(&mut conn, band.code()).await? {
            return Err(BootstrapError::Validation(
                MissingSeedItem::Recommendation(band.code().to_string()),
            ));
        }
    }

    if AccountRepo::count_with_role(&mut conn, ROLE_ADMIN).await? == 0 {
        return Err(BootstrapError::Validation(MissingSeedItem::AdminAccount));
    }

    Ok(())
}
