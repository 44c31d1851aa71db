//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&mut AnyConnection` as the first argument, so the same call works on a
//! pooled connection or inside a transaction.

pub mod account_repo;
pub mod faq_repo;
pub mod recommendation_repo;
pub mod role_repo;
pub mod tag_repo;

pub use account_repo::AccountRepo;
pub use faq_repo::FaqRepo;
pub use recommendation_repo::RecommendationRepo;
pub use role_repo::RoleRepo;
pub use tag_repo::TagRepo;

use sqlx::AnyConnection;

// Table names are compile-time constants, never user input, so they are
// interpolated directly.

/// Count all rows in `table`.
pub async fn count_rows(conn: &mut AnyConnection, table: &'static str) -> Result<i64, sqlx::Error> {
    let query = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar::<_, i64>(&query)
        .fetch_one(&mut *conn)
        .await
}

/// Delete every row in `table`, returning the number removed.
pub async fn delete_all(conn: &mut AnyConnection, table: &'static str) -> Result<u64, sqlx::Error> {
    let query = format!("DELETE FROM {table}");
    let result = sqlx::query(&query).execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

/// Mark rows whose `is_active` flag was left NULL as active.
pub async fn activate_indeterminate(
    conn: &mut AnyConnection,
    table: &'static str,
) -> Result<u64, sqlx::Error> {
    let query = format!(
        "UPDATE {table} SET is_active = $1, updated_at = CURRENT_TIMESTAMP \
         WHERE is_active IS NULL"
    );
    let result = sqlx::query(&query)
        .bind(true)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}
