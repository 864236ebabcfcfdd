//! Port for contract persistence.
//!
//! [`ContractRepository`] is the single gateway for reading and writing
//! contract records. Adapters own connection handling: each call acquires
//! whatever scope it needs and releases it before returning, on success and
//! failure alike.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Contract, ContractId, NewContract};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contract repository adapters.
    pub enum ContractRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "contract repository connection failed: {message}",
        /// A statement failed while executing.
        Query { message: String } =>
            "contract repository query failed: {message}",
        /// The store refused the write, e.g. a constraint violation.
        Rejected { message: String } =>
            "contract repository rejected the write: {message}",
        /// No contract exists with the given identifier.
        NotFound { id: ContractId } =>
            "contract {id} not found",
    }
}

impl ContractRepositoryError {
    /// True for failures of the store itself rather than a missing record.
    pub fn is_storage(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}

/// Durable storage for contracts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// Insert a contract and return it with its assigned identifier.
    async fn add_contract(&self, contract: &NewContract) -> Result<Contract, ContractRepositoryError>;

    /// Fetch a contract by identifier.
    ///
    /// Returns [`ContractRepositoryError::NotFound`] when no row matches.
    async fn get_contract(&self, id: ContractId) -> Result<Contract, ContractRepositoryError>;

    /// Replace the stored fields of an existing contract.
    ///
    /// The identifier selects the row and is never rewritten. Returns
    /// [`ContractRepositoryError::NotFound`] when no row matches.
    async fn update_contract(&self, contract: &Contract) -> Result<Contract, ContractRepositoryError>;

    /// Remove a contract.
    ///
    /// Returns [`ContractRepositoryError::NotFound`] when no row matches.
    async fn delete_contract(&self, id: ContractId) -> Result<(), ContractRepositoryError>;
}

/// In-memory repository used when no database is configured and in tests.
///
/// Identifiers start at 1 and increase monotonically; deleted identifiers
/// are never reused.
#[derive(Debug, Default)]
pub struct FixtureContractRepository {
    state: Mutex<FixtureState>,
}

#[derive(Debug, Default)]
struct FixtureState {
    last_id: i64,
    rows: BTreeMap<ContractId, Contract>,
}

impl FixtureContractRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut FixtureState) -> T) -> T {
        let mut guard = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

#[async_trait]
impl ContractRepository for FixtureContractRepository {
    async fn add_contract(&self, contract: &NewContract) -> Result<Contract, ContractRepositoryError> {
        Ok(self.with_state(|state| {
            state.last_id += 1;
            let stored = contract.clone().into_contract(ContractId::new(state.last_id));
            state.rows.insert(stored.id, stored.clone());
            stored
        }))
    }

    async fn get_contract(&self, id: ContractId) -> Result<Contract, ContractRepositoryError> {
        self.with_state(|state| state.rows.get(&id).cloned())
            .ok_or_else(|| ContractRepositoryError::not_found(id))
    }

    async fn update_contract(&self, contract: &Contract) -> Result<Contract, ContractRepositoryError> {
        self.with_state(|state| {
            let slot = state
                .rows
                .get_mut(&contract.id)
                .ok_or_else(|| ContractRepositoryError::not_found(contract.id))?;
            *slot = contract.clone();
            Ok(slot.clone())
        })
    }

    async fn delete_contract(&self, id: ContractId) -> Result<(), ContractRepositoryError> {
        self.with_state(|state| state.rows.remove(&id))
            .map(|_| ())
            .ok_or_else(|| ContractRepositoryError::not_found(id))
    }
}
