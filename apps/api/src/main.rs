//! Rolegate API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use rolegate_core::AppError;
use rolegate_infrastructure::PostgresRoleStore;
use tracing::info;

use crate::api_config::{StartupMode, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match StartupMode::load()? {
        StartupMode::Migrate { database_url } => {
            api_services::connect_and_migrate(&database_url).await?;
            info!("database migrations applied successfully");
            return Ok(());
        }
        StartupMode::Serve(config) => config,
    };
    let pool = api_services::connect_and_migrate(&config.database_url).await?;

    if let Some(user_id) = &config.bootstrap_admin {
        api_services::bootstrap_admin(&PostgresRoleStore::new(pool.clone()), user_id).await?;
    }

    let app_state = api_services::build_app_state(pool, &config)?;
    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(
        %address,
        bulk_limit = config.bulk_policy.limit(),
        resource_query_url = %config.resource_query.base_url,
        "rolegate-api listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
