//! Internal Diesel row structs for the `contracts` table.
//!
//! These never leave the persistence layer; the repository converts them to
//! domain records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Contract, ContractId, NewContract};

use super::schema::contracts;

/// Row read back from `contracts`, by the DSL or by raw SQL.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = contracts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContractRow {
    pub id: i64,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<ContractRow> for Contract {
    fn from(row: ContractRow) -> Self {
        Self {
            id: ContractId::new(row.id),
            name: row.name,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

/// Insertable row; `id` is assigned by the sequence.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contracts)]
pub(crate) struct NewContractRow<'a> {
    pub name: &'a str,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl<'a> From<&'a NewContract> for NewContractRow<'a> {
    fn from(contract: &'a NewContract) -> Self {
        Self {
            name: &contract.name,
            start_date: contract.start_date,
            end_date: contract.end_date,
        }
    }
}

/// Changeset for replacing every mutable column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = contracts)]
pub(crate) struct ContractChangeset<'a> {
    pub name: &'a str,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl<'a> From<&'a Contract> for ContractChangeset<'a> {
    fn from(contract: &'a Contract) -> Self {
        Self {
            name: &contract.name,
            start_date: contract.start_date,
            end_date: contract.end_date,
        }
    }
}
