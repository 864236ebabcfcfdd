//! Contract service library.
//!
//! Layout follows a hexagonal split: [`domain`] holds records, rules and
//! ports; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! implements the repository port on PostgreSQL. [`middleware`] carries
//! request tracing and the fault boundary.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{FaultInterceptor, Trace};

#[cfg(test)]
pub(crate) mod test_support;
