//! Repository for the `roles` table.

use muac_core::dialect::Dialect;
use muac_core::roles::RoleSpec;
use muac_core::types::new_record_id;
use sqlx::AnyConnection;

pub const TABLE: &str = "roles";

/// Provides baseline-role operations.
pub struct RoleRepo;

impl RoleRepo {
    pub async fn count(conn: &mut AnyConnection) -> Result<i64, sqlx::Error> {
        super::count_rows(conn, TABLE).await
    }

    /// Insert a role with a fresh identifier.
    pub async fn insert(
        conn: &mut AnyConnection,
        dialect: Dialect,
        role: &RoleSpec,
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO roles (id, name, description) VALUES ({}, $2, $3)",
            dialect.id_placeholder(1)
        );
        sqlx::query(&query)
            .bind(new_record_id())
            .bind(role.name)
            .bind(role.description)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Whether a role with this name (case-sensitive) exists.
    pub async fn exists_by_name(conn: &mut AnyConnection, name: &str) -> Result<bool, sqlx::Error> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM roles WHERE name = $1")
            .bind(name)
            .fetch_one(&mut *conn)
            .await?;
        Ok(count > 0)
    }
}
