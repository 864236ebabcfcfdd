//! Contract record and transfer shapes.
//!
//! [`Contract`] is the persisted record, [`NewContract`] the same record
//! before storage assigns its identifier, and [`ContractDto`] the
//! client-facing transfer object. None of these types validate on
//! construction: [`crate::domain::ContractValidator`] runs on the DTO before
//! anything reaches storage, and the database enforces the date ordering as
//! a last line of defence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage-assigned contract identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContractId(i64);

impl ContractId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for ContractId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ContractId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored contract.
///
/// ## Invariants
/// - `id` never changes once assigned.
/// - `start_date < end_date` for every record that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: ContractId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// A contract awaiting insertion; storage assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContract {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl NewContract {
    /// Attach the identifier storage assigned on insert.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use contract_service::domain::{ContractId, NewContract};
    ///
    /// let draft = NewContract {
    ///     name: "Acme".to_owned(),
    ///     start_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    ///     end_date: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
    /// };
    /// let stored = draft.into_contract(ContractId::new(1));
    /// assert_eq!(stored.id.as_i64(), 1);
    /// ```
    #[must_use]
    pub fn into_contract(self, id: ContractId) -> Contract {
        Contract {
            id,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Client-facing contract shape. Carries no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDto {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}
