//! `muac-seed`: operator CLI for schema bootstrap and reference data.
//!
//! Configuration comes from the same environment variables as the API
//! server (see [`BootstrapConfig::from_env`]).

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use muac_db::config::BootstrapConfig;
use muac_db::schema::ensure_schema;
use muac_db::seed::{get_seeding_status, validate_seed_data, SeedOutcome, Seeder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "muac-seed")]
#[command(version, about = "Schema bootstrap and reference-data seeding for the MUAC store")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Create the schema if missing, then seed or reconcile (default)
    Seed,

    /// Print seeding status as JSON
    Status,

    /// Check that the baseline reference data exists
    Validate,

    /// Delete all seeded data
    Clean {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

impl Cli {
    /// The command to run, refusing an unconfirmed `clean`.
    fn resolve(&self) -> Result<Commands, String> {
        match self.command.unwrap_or(Commands::Seed) {
            Commands::Clean { yes: false } => {
                Err("clean deletes all seeded data; re-run with --yes".into())
            }
            command => Ok(command),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muac_seed=info,muac_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match Cli::parse().resolve() {
        Ok(command) => command,
        Err(message) => bail!("{message}"),
    };

    let config = BootstrapConfig::from_env().context("Invalid configuration")?;
    let pool = muac_db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("Failed to connect to database")?;

    match command {
        Commands::Seed => {
            ensure_schema(&pool, &config.schema_path, config.dialect).await?;
            let seeder = Seeder::new(config.seed);
            match seeder.seed_database(&pool).await? {
                SeedOutcome::Fresh {
                    counts,
                    generated_admin_password,
                } => {
                    tracing::info!(?counts, "Fresh seed complete");
                    if let Some(password) = generated_admin_password {
                        println!(
                            "Generated password for '{}': {}",
                            seeder.config().admin.username,
                            password.expose()
                        );
                        println!("It is shown only once and must be changed at first login.");
                    }
                }
                SeedOutcome::Reconciled(report) => {
                    tracing::info!(warnings = report.warnings(), "Reconcile complete");
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }
        }
        Commands::Status => {
            let status = get_seeding_status(&pool).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Validate => {
            validate_seed_data(&pool).await?;
            println!("Reference data is complete.");
        }
        Commands::Clean { .. } => {
            let report = Seeder::new(config.seed).clean_seed_data(&pool).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.is_complete() {
                bail!("{} table(s) could not be cleared", report.failed.len());
            }
        }
    }

    pool.close().await;
    Ok(())
}
