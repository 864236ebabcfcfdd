//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters translate between domain records and storage representations
//! and contain no business rules.

pub mod persistence;
