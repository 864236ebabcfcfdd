//! PostgreSQL persistence adapters using Diesel.
//!
//! Row structs (`models`) and table definitions (`schema`) stay private to
//! this module; only the repository, the pool and the migration runner are
//! exported.
//!
//! ```no_run
//! use contract_service::outbound::persistence::{
//!     DbPool, DieselContractRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://contracts@localhost/contracts";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let _repository = DieselContractRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_contract_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contract_repository::DieselContractRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
