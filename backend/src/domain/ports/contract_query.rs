//! Driving port for contract reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Contract, ContractId, Error};

/// Request to fetch one contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetContractRequest {
    pub id: ContractId,
}

/// Read-side port consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractQuery: Send + Sync {
    /// Fetch a stored contract.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] when the identifier is unknown,
    /// [`crate::domain::ErrorCode::InternalError`] when storage fails.
    async fn get_contract(&self, request: GetContractRequest) -> Result<Contract, Error>;
}
