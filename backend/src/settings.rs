//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CONTRACTS_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence order.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Runtime settings for the contract service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTRACTS")]
pub struct ServerSettings {
    /// PostgreSQL connection string. Without one the service keeps
    /// contracts in memory.
    pub database_url: Option<String>,
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<SocketAddr>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection before failing the request.
    pub pool_connection_timeout_secs: Option<u64>,
    /// Leave the schema alone at startup instead of applying embedded
    /// migrations.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl ServerSettings {
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(default_bind_addr)
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn pool_connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.pool_connection_timeout_secs
                .unwrap_or(DEFAULT_POOL_CONNECTION_TIMEOUT_SECS),
        )
    }

    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}
