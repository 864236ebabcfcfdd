//! Business rules applied to a [`ContractDto`] before persistence.
//!
//! Validation never fails: an invalid DTO yields a non-empty
//! [`ValidationOutcome`]. Every rule is evaluated so clients see all
//! violations at once.

use serde::{Deserialize, Serialize};

use super::ContractDto;

pub(crate) const NAME_FIELD: &str = "name";
pub(crate) const START_DATE_FIELD: &str = "startDate";
pub(crate) const NAME_REQUIRED: &str = "Name is required.";
pub(crate) const DATES_OUT_OF_ORDER: &str = "StartDate must be before EndDate.";

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    /// Build a violation for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Ordered violations; empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationOutcome {
    violations: Vec<FieldViolation>,
}

impl ValidationOutcome {
    /// True when no rule was violated.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Record a violation, preserving insertion order.
    pub fn push(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }

    /// Violations in the order they were recorded.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl FromIterator<FieldViolation> for ValidationOutcome {
    fn from_iter<I: IntoIterator<Item = FieldViolation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

/// The name rule on its own, for callers that cannot build a full DTO.
///
/// ```
/// use contract_service::domain::contract_validation::name_violation;
///
/// assert!(name_violation("").is_some());
/// assert!(name_violation("  ").is_none());
/// ```
pub fn name_violation(name: &str) -> Option<FieldViolation> {
    name.is_empty()
        .then(|| FieldViolation::new(NAME_FIELD, NAME_REQUIRED))
}

/// Checks a transfer object against business rules.
#[cfg_attr(test, mockall::automock)]
pub trait ContractValidator: Send + Sync {
    /// Evaluate every rule against `dto`.
    fn validate(&self, dto: &ContractDto) -> ValidationOutcome;
}

/// Default contract rules.
///
/// - `name` must be non-empty. Whitespace-only names are accepted.
/// - `start_date` must be strictly before `end_date`.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use contract_service::domain::{ContractDto, ContractRules, ContractValidator};
///
/// let dto = ContractDto {
///     name: String::new(),
///     start_date: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
///     end_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
/// };
/// assert_eq!(ContractRules.validate(&dto).violations().len(), 2);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ContractRules;

impl ContractValidator for ContractRules {
    fn validate(&self, dto: &ContractDto) -> ValidationOutcome {
        let mut outcome: ValidationOutcome = name_violation(&dto.name).into_iter().collect();
        if dto.start_date >= dto.end_date {
            outcome.push(FieldViolation::new(START_DATE_FIELD, DATES_OUT_OF_ORDER));
        }
        outcome
    }
}
