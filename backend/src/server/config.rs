//! HTTP server configuration object.

use std::net::SocketAddr;

use contract_service::inbound::http::health::ContractStore;
use contract_service::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Persist contracts in PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Store the server will wire contracts onto.
    pub fn contract_store(&self) -> ContractStore {
        if self.db_pool.is_some() {
            ContractStore::Postgres
        } else {
            ContractStore::InMemory
        }
    }
}
