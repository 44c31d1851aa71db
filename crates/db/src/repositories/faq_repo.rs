//! Repository for the `faqs` table. Natural key: `(category, question)`.

use muac_core::dialect::Dialect;
use muac_core::reference::FaqSpec;
use muac_core::types::new_record_id;
use sqlx::AnyConnection;

pub const TABLE: &str = "faqs";

/// Provides FAQ knowledge-base operations.
pub struct FaqRepo;

impl FaqRepo {
    pub async fn count(conn: &mut AnyConnection) -> Result<i64, sqlx::Error> {
        super::count_rows(conn, TABLE).await
    }

    pub async fn insert(
        conn: &mut AnyConnection,
        dialect: Dialect,
        faq: &FaqSpec,
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO faqs (id, category, question, answer, sort_order, is_active) \
             VALUES ({}, $2, $3, $4, $5, $6)",
            dialect.id_placeholder(1)
        );
        sqlx::query(&query)
            .bind(new_record_id())
            .bind(faq.category)
            .bind(faq.question)
            .bind(faq.answer)
            .bind(faq.sort_order)
            .bind(true)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    pub async fn exists(conn: &mut AnyConnection, faq: &FaqSpec) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM faqs WHERE category = $1 AND question = $2",
        )
        .bind(faq.category)
        .bind(faq.question)
        .fetch_one(&mut *conn)
        .await?;
        Ok(count > 0)
    }

    /// Set `sort_order` on the matching entry when it is missing.
    pub async fn patch_missing_sort_order(
        conn: &mut AnyConnection,
        faq: &FaqSpec,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE faqs SET sort_order = $1, updated_at = CURRENT_TIMESTAMP \
             WHERE category = $2 AND question = $3 AND sort_order IS NULL",
        )
        .bind(faq.sort_order)
        .bind(faq.category)
        .bind(faq.question)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn activate_indeterminate(conn: &mut AnyConnection) -> Result<u64, sqlx::Error> {
        super::activate_indeterminate(conn, TABLE).await
    }
}
