//! Bootstrap configuration loaded from environment variables.

use std::path::PathBuf;

use muac_core::bands::{
    MuacThresholds, DEFAULT_MODERATE_CM, DEFAULT_NORMAL_CM, DEFAULT_SEVERE_CM,
};
use muac_core::dialect::Dialect;
use muac_core::error::CoreError;
use muac_core::password::AdminCredentials;

use crate::seed::SeedConfig;

/// Default location of the portable declaration script.
pub const DEFAULT_SCHEMA_PATH: &str = "db/schema.sql";

/// Default pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Everything needed to create the schema and seed reference data.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub dialect: Dialect,
    pub schema_path: PathBuf,
    pub seed: SeedConfig,
}

impl BootstrapConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Default                          |
    /// |----------------------|----------------------------------|
    /// | `DATABASE_URL`       | required                         |
    /// | `DB_DIALECT`         | inferred from `DATABASE_URL`     |
    /// | `DB_MAX_CONNECTIONS` | `5`                              |
    /// | `SCHEMA_PATH`        | `db/schema.sql`                  |
    /// | `MUAC_SEVERE_CM`     | `11.5`                           |
    /// | `MUAC_MODERATE_CM`   | `12.5`                           |
    /// | `MUAC_NORMAL_CM`     | `12.5`                           |
    /// | `ADMIN_USERNAME`     | `admin`                          |
    /// | `ADMIN_EMAIL`        | `admin@localhost`                |
    /// | `ADMIN_FULL_NAME`    | `System Administrator`           |
    /// | `ADMIN_PASSWORD`     | unset: generated on fresh seed   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let dialect = match lookup("DB_DIALECT") {
            Some(name) => name.parse()?,
            None => Dialect::from_url(&database_url)?,
        };

        let max_connections =
            parse_or("DB_MAX_CONNECTIONS", &lookup, DEFAULT_MAX_CONNECTIONS)?;

        let schema_path = lookup("SCHEMA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_PATH));

        let thresholds = MuacThresholds::new(
            parse_or("MUAC_SEVERE_CM", &lookup, DEFAULT_SEVERE_CM)?,
            parse_or("MUAC_MODERATE_CM", &lookup, DEFAULT_MODERATE_CM)?,
            parse_or("MUAC_NORMAL_CM", &lookup, DEFAULT_NORMAL_CM)?,
        )?;

        let admin = AdminCredentials {
            username: lookup("ADMIN_USERNAME").unwrap_or_else(|| "admin".into()),
            email: lookup("ADMIN_EMAIL").unwrap_or_else(|| "admin@localhost".into()),
            full_name: lookup("ADMIN_FULL_NAME")
                .unwrap_or_else(|| "System Administrator".into()),
            password: lookup("ADMIN_PASSWORD").filter(|v| !v.is_empty()),
        };

        Ok(Self {
            database_url,
            max_connections,
            dialect,
            schema_path,
            seed: SeedConfig { thresholds, admin },
        })
    }
}

fn parse_or<T, F>(var: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            }),
        },
    }
}
