//! Contract domain: records, business rules and the driving/driven ports.
//!
//! Nothing in this module knows about HTTP or SQL. Inbound adapters call the
//! [`ports::ContractCommand`] and [`ports::ContractQuery`] ports, outbound
//! adapters implement [`ports::ContractRepository`].
//!
//! Public surface:
//! - [`Contract`], [`NewContract`], [`ContractId`], [`ContractDto`]: record
//!   and transfer shapes.
//! - [`ContractValidator`] / [`ContractRules`]: business rules.
//! - [`ContractMapper`] / [`ContractShapeMapper`]: shape conversion.
//! - [`ContractService`]: the create/read flows.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.
//! - [`TraceId`]: request correlation.

pub mod contract;
pub mod contract_mapper;
pub mod contract_service;
pub mod contract_validation;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::contract::{Contract, ContractDto, ContractId, NewContract};
pub use self::contract_mapper::{ContractMapper, ContractShapeMapper};
pub use self::contract_service::ContractService;
pub use self::contract_validation::{
    ContractRules, ContractValidator, FieldViolation, ValidationOutcome,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
