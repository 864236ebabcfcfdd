//! Contract service entry-point: loads settings, prepares storage and runs
//! the HTTP server.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context as _, Result};
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contract_service::inbound::http::health::HealthState;
use contract_service::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use contract_service::settings::ServerSettings;

use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load server settings")?;
    let mut config = ServerConfig::new(settings.bind_addr());

    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            run_migrations(database_url)
                .await
                .wrap_err("failed to apply database migrations")?;
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url)
                .with_max_size(settings.pool_max_size())
                .with_connection_timeout(settings.pool_connection_timeout()),
        )
        .await
        .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new(config.contract_store()));
    let server = create_server(health_state.clone(), config)?;
    server.await?;

    health_state.mark_unhealthy();
    info!("contract service stopped");
    Ok(())
}
