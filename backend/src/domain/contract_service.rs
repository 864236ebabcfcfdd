//! Contract domain service.
//!
//! Implements the [`ContractCommand`] and [`ContractQuery`] driving ports on
//! top of an injected repository, validator and mapper.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    ContractCommand, ContractQuery, ContractRepository, ContractRepositoryError,
    CreateContractRequest, CreateContractResponse, GetContractRequest,
};
use crate::domain::{
    Contract, ContractMapper, ContractRules, ContractShapeMapper, ContractValidator, Error,
};

/// Contract service implementing the driving ports.
///
/// The create flow runs validate, map, persist. Validation failures are
/// returned before the repository is touched; the repository is called at
/// most once per request and its failures are never retried.
#[derive(Clone)]
pub struct ContractService<R, V = ContractRules, M = ContractShapeMapper> {
    repository: Arc<R>,
    validator: V,
    mapper: M,
}

impl<R> ContractService<R> {
    /// Create a service with the default rules and mapper.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_policies(repository, ContractRules, ContractShapeMapper)
    }
}

impl<R, V, M> ContractService<R, V, M> {
    /// Create a service with custom validation and mapping.
    pub fn with_policies(repository: Arc<R>, validator: V, mapper: M) -> Self {
        Self {
            repository,
            validator,
            mapper,
        }
    }

    fn map_repository_error(error: ContractRepositoryError) -> Error {
        match error {
            ContractRepositoryError::NotFound { id } => {
                Error::not_found(format!("contract {id} not found"))
            }
            ContractRepositoryError::Connection { message } => {
                Error::internal(format!("contract repository unavailable: {message}"))
            }
            ContractRepositoryError::Query { message } => {
                Error::internal(format!("contract repository error: {message}"))
            }
            ContractRepositoryError::Rejected { message } => {
                Error::internal(format!("contract repository rejected write: {message}"))
            }
        }
    }
}

#[async_trait]
impl<R, V, M> ContractCommand for ContractService<R, V, M>
where
    R: ContractRepository,
    V: ContractValidator,
    M: ContractMapper,
{
    async fn create_contract(
        &self,
        request: CreateContractRequest,
    ) -> Result<CreateContractResponse, Error> {
        let outcome = self.validator.validate(&request.contract);
        if !outcome.is_valid() {
            debug!(
                violations = outcome.violations().len(),
                "contract rejected by validation"
            );
            return Err(Error::validation(&outcome));
        }

        let record = self.mapper.to_record(request.contract);
        let contract = self
            .repository
            .add_contract(&record)
            .await
            .map_err(Self::map_repository_error)?;

        info!(contract_id = %contract.id, "contract created");
        Ok(CreateContractResponse { contract })
    }
}

#[async_trait]
impl<R, V, M> ContractQuery for ContractService<R, V, M>
where
    R: ContractRepository,
    V: Send + Sync,
    M: Send + Sync,
{
    async fn get_contract(&self, request: GetContractRequest) -> Result<Contract, Error> {
        self.repository
            .get_contract(request.id)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[cfg(test)]
#[path = "contract_service_tests.rs"]
mod tests;
