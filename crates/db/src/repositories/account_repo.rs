//! Repository for the `accounts` table.

use muac_core::dialect::Dialect;
use muac_core::password::PreparedAdmin;
use muac_core::types::new_record_id;
use sqlx::AnyConnection;

pub const TABLE: &str = "accounts";

/// Provides account operations needed by seeding.
pub struct AccountRepo;

impl AccountRepo {
    pub async fn count(conn: &mut AnyConnection) -> Result<i64, sqlx::Error> {
        super::count_rows(conn, TABLE).await
    }

    /// Insert an account linked to the role named `role_name`.
    ///
    /// The role is resolved inside the statement; a missing role leaves
    /// `role_id` NULL and the insert fails on the NOT NULL constraint.
    pub async fn insert_with_role(
        conn: &mut AnyConnection,
        dialect: Dialect,
        account: &PreparedAdmin,
        role_name: &str,
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts \
                (id, role_id, username, email, full_name, password_hash, \
                 must_change_password, is_active) \
             VALUES ({}, (SELECT id FROM roles WHERE name = $2), $3, $4, $5, $6, $7, $8)",
            dialect.id_placeholder(1)
        );
        sqlx::query(&query)
            .bind(new_record_id())
            .bind(role_name)
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.full_name)
            .bind(&account.password_hash)
            .bind(account.generated_password.is_some())
            .bind(true)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Number of accounts linked to the role named `role_name`.
    pub async fn count_with_role(
        conn: &mut AnyConnection,
        role_name: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM accounts a \
             JOIN roles r ON r.id = a.role_id \
             WHERE r.name = $1",
        )
        .bind(role_name)
        .fetch_one(&mut *conn)
        .await
    }
}
