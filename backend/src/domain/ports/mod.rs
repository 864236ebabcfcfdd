//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`ContractCommand`], [`ContractQuery`]) are called by
//! inbound adapters; the driven port ([`ContractRepository`]) is implemented
//! by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod contract_command;
mod contract_query;
mod contract_repository;

#[cfg(test)]
pub use contract_command::MockContractCommand;
pub use contract_command::{ContractCommand, CreateContractRequest, CreateContractResponse};
#[cfg(test)]
pub use contract_query::MockContractQuery;
pub use contract_query::{ContractQuery, GetContractRequest};
#[cfg(test)]
pub use contract_repository::MockContractRepository;
pub use contract_repository::{
    ContractRepository, ContractRepositoryError, FixtureContractRepository,
};
