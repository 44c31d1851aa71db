//! Repository for the `recommendations` table.
//!
//! One recommendation per band, keyed by `band_code`. The MUAC bounds and
//! `follow_up_days` columns arrived in later releases; either bound may be
//! legitimately NULL (an open end), so bounds only count as missing when a
//! numeric band has neither.

use muac_core::dialect::Dialect;
use muac_core::reference::RecommendationSpec;
use muac_core::types::new_record_id;
use sqlx::AnyConnection;

pub const TABLE: &str = "recommendations";

/// Provides per-band recommendation operations.
pub struct RecommendationRepo;

impl RecommendationRepo {
    pub async fn count(conn: &mut AnyConnection) -> Result<i64, sqlx::Error> {
        super::count_rows(conn, TABLE).await
    }

    pub async fn insert(
        conn: &mut AnyConnection,
        dialect: Dialect,
        rec: &RecommendationSpec,
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO recommendations \
                (id, band_code, title, guidance, min_muac_cm, max_muac_cm, follow_up_days, is_active) \
             VALUES ({}, $2, $3, $4, $5, $6, $7, $8)",
            dialect.id_placeholder(1)
        );
        sqlx::query(&query)
            .bind(new_record_id())
            .bind(rec.band_code)
            .bind(rec.title)
            .bind(rec.guidance)
            .bind(rec.min_muac_cm)
            .bind(rec.max_muac_cm)
            .bind(rec.follow_up_days)
            .bind(true)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    pub async fn exists_for_band(
        conn: &mut AnyConnection,
        band_code: &str,
    ) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM recommendations WHERE band_code = $1",
        )
        .bind(band_code)
        .fetch_one(&mut *conn)
        .await?;
        Ok(count > 0)
    }

    /// Set `follow_up_days` where it is missing.
    pub async fn patch_missing_follow_up(
        conn: &mut AnyConnection,
        rec: &RecommendationSpec,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE recommendations \
             SET follow_up_days = $1, updated_at = CURRENT_TIMESTAMP \
             WHERE band_code = $2 AND follow_up_days IS NULL",
        )
        .bind(rec.follow_up_days)
        .bind(rec.band_code)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Set both bounds where a bounded band has neither.
    ///
    /// An entry with two open ends (follow-up) is never patched.
    pub async fn patch_missing_bounds(
        conn: &mut AnyConnection,
        rec: &RecommendationSpec,
    ) -> Result<u64, sqlx::Error> {
        if rec.min_muac_cm.is_none() && rec.max_muac_cm.is_none() {
            return Ok(0);
        }
        let result = sqlx::query(
            "UPDATE recommendations \
             SET min_muac_cm = $1, max_muac_cm = $2, updated_at = CURRENT_TIMESTAMP \
             WHERE band_code = $3 AND min_muac_cm IS NULL AND max_muac_cm IS NULL",
        )
        .bind(rec.min_muac_cm)
        .bind(rec.max_muac_cm)
        .bind(rec.band_code)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn activate_indeterminate(conn: &mut AnyConnection) -> Result<u64, sqlx::Error> {
        super::activate_indeterminate(conn, TABLE).await
    }
}
