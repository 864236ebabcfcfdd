//! Driving port for contract writes.
//!
//! HTTP handlers call [`ContractCommand`] to register new contracts. The
//! implementation validates the transfer object, maps it to a record and
//! persists it, in that order, stopping at the first failing step.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Contract, ContractDto, Error};

/// Request to create a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractRequest {
    /// Client-supplied contract fields.
    pub contract: ContractDto,
}

/// Response from creating a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractResponse {
    /// The stored contract, including its assigned identifier.
    pub contract: Contract,
}

/// Driving port for contract creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractCommand: Send + Sync {
    /// Validate and persist a new contract.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::ErrorCode::InvalidRequest`] when a business rule
    ///   fails; details list every violation and nothing is stored.
    /// - [`crate::domain::ErrorCode::InternalError`] when storage fails.
    async fn create_contract(
        &self,
        request: CreateContractRequest,
    ) -> Result<CreateContractResponse, Error>;
}
