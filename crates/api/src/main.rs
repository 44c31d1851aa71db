use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use muac_db::config::BootstrapConfig;
use muac_db::schema::ensure_schema;
use muac_db::seed::Seeder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use muac_api::config::ServerConfig;
use muac_api::router::build_app_router;
use muac_api::startup::announce_seed_outcome;
use muac_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muac_api=debug,muac_db=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    let bootstrap = BootstrapConfig::from_env().context("Invalid bootstrap configuration")?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        dialect = %bootstrap.dialect,
        "Loaded configuration"
    );

    // --- Database ---
    let pool = muac_db::create_pool(&bootstrap.database_url, bootstrap.max_connections)
        .await
        .context("Failed to connect to database")?;
    muac_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database connection pool created");

    // --- Schema and reference data ---
    ensure_schema(&pool, &bootstrap.schema_path, bootstrap.dialect)
        .await
        .context("Schema bootstrap failed")?;

    let seeder = Seeder::new(bootstrap.seed);
    let outcome = seeder.seed_database(&pool).await.context("Seeding failed")?;
    announce_seed_outcome(&outcome, &seeder.config().admin.username, &mut std::io::stderr())
        .context("Failed to report seed outcome")?;

    // --- Router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
