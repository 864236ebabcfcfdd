//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ContractCommand, ContractQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub contracts: Arc<dyn ContractCommand>,
    pub contracts_query: Arc<dyn ContractQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        contracts: Arc<dyn ContractCommand>,
        contracts_query: Arc<dyn ContractQuery>,
    ) -> Self {
        Self {
            contracts,
            contracts_query,
        }
    }

    /// Construct state from one service implementing both ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use contract_service::domain::ContractService;
    /// use contract_service::domain::ports::FixtureContractRepository;
    /// use contract_service::inbound::http::state::HttpState;
    ///
    /// let service = ContractService::new(Arc::new(FixtureContractRepository::new()));
    /// let _state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: ContractCommand + ContractQuery + 'static,
    {
        Self::new(service.clone(), service)
    }
}
