use axum_helpers::server::{create_production_app, health_router};
use chrono::Utc;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{self as pg, DatabaseConnection};
use domain_tasks::{InMemoryTaskRepository, PgTaskRepository, SlackNotifier, TaskService};
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, TaskStoreBackend};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let notifier = SlackNotifier::from_env()?;
    if !notifier.is_enabled() {
        warn!("SLACK_WEBHOOK_URL not set, task update notifications are disabled");
    }

    let (tasks, db) = match (config.store, config.database.clone()) {
        (TaskStoreBackend::Postgres, Some(db_config)) => {
            let db = connect_postgres(db_config, config.run_migrations).await?;
            let service = TaskService::new(PgTaskRepository::new(db.clone()), notifier);
            (service, Some(db))
        }
        (TaskStoreBackend::Postgres, None) => {
            eyre::bail!("TASK_STORE=postgres requires DATABASE_URL");
        }
        (TaskStoreBackend::Memory, _) => {
            info!("Using in-memory task store; data is lost on restart");
            let repository = InMemoryTaskRepository::seeded(Utc::now());
            (TaskService::new(repository, notifier), None)
        }
    };

    let state = AppState::new(config, tasks, db);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&state)).await?;

    // - /health: liveness check with app name/version
    // - /ready: readiness check, pings postgres when it backs the store
    // - /scim/v2: provisioning stubs
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()))
        .merge(api::scim_router(&state));

    info!(
        store = %state.config.store,
        "Starting taskboard API with production-ready shutdown (30s timeout)"
    );

    let server = state.config.server.clone();
    let db = state.db.clone();

    create_production_app(
        app,
        &server,
        Duration::from_secs(30),
        async move {
            if let Some(db) = db {
                info!("Shutting down: closing database connections");
                match db.close().await {
                    Ok(_) => info!("PostgreSQL connection closed successfully"),
                    Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
                }
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Taskboard API shutdown complete");
    Ok(())
}

async fn connect_postgres(
    db_config: pg::PostgresConfig,
    run_migrations: bool,
) -> eyre::Result<DatabaseConnection> {
    let db = pg::connect_from_config_with_retry(db_config, None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if run_migrations {
        pg::run_migrations::<migration::Migrator>(&db, "taskboard_api")
            .await
            .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;
    }

    Ok(db)
}
