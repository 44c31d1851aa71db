//! Repository for the `tags` table (MUAC classification bands).
//!
//! Tags are keyed by their band `code`. `color` and `priority` were added
//! after the first release and may be NULL in older stores.

use muac_core::dialect::Dialect;
use muac_core::reference::TagSpec;
use muac_core::types::new_record_id;
use sqlx::AnyConnection;

pub const TABLE: &str = "tags";

/// Provides classification-tag operations.
pub struct TagRepo;

impl TagRepo {
    pub async fn count(conn: &mut AnyConnection) -> Result<i64, sqlx::Error> {
        super::count_rows(conn, TABLE).await
    }

    pub async fn insert(
        conn: &mut AnyConnection,
        dialect: Dialect,
        tag: &TagSpec,
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (id, code, name, description, color, priority, is_active) \
             VALUES ({}, $2, $3, $4, $5, $6, $7)",
            dialect.id_placeholder(1)
        );
        sqlx::query(&query)
            .bind(new_record_id())
            .bind(tag.code)
            .bind(tag.name)
            .bind(tag.description)
            .bind(tag.color)
            .bind(tag.priority)
            .bind(true)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    pub async fn exists_by_code(conn: &mut AnyConnection, code: &str) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tags WHERE code = $1")
            .bind(code)
            .fetch_one(&mut *conn)
            .await?;
        Ok(count > 0)
    }

    /// Fill in `color`/`priority` on the tag with `tag.code` when either is
    /// missing. Existing values are left alone.
    pub async fn patch_missing_attributes(
        conn: &mut AnyConnection,
        tag: &TagSpec,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tags \
             SET color = COALESCE(color, $1), \
                 priority = COALESCE(priority, $2), \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE code = $3 AND (color IS NULL OR priority IS NULL)",
        )
        .bind(tag.color)
        .bind(tag.priority)
        .bind(tag.code)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn activate_indeterminate(conn: &mut AnyConnection) -> Result<u64, sqlx::Error> {
        super::activate_indeterminate(conn, TABLE).await
    }
}
