//! PostgreSQL-backed `ContractRepository` using Diesel.
//!
//! Writes go through the query DSL inside a transaction; the by-id read is a
//! parameterised raw statement mapped with `QueryableByName`. Each method
//! checks out one pooled connection and drops it before returning.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use tracing::debug;

use crate::domain::ports::{ContractRepository, ContractRepositoryError};
use crate::domain::{Contract, ContractId, NewContract};

use super::models::{ContractChangeset, ContractRow, NewContractRow};
use super::pool::{DbPool, PoolError};
use super::schema::contracts;

const SELECT_CONTRACT_BY_ID_SQL: &str =
    "SELECT id, name, start_date, end_date FROM contracts WHERE id = $1";

/// Diesel-backed implementation of the [`ContractRepository`] port.
#[derive(Clone)]
pub struct DieselContractRepository {
    pool: DbPool,
}

impl DieselContractRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContractRepositoryError {
    debug!(%error, "contract repository checkout failed");
    ContractRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> ContractRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ContractRepositoryError::connection("database connection closed")
        }
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::ForeignKeyViolation,
            info,
        ) => ContractRepositoryError::rejected(
            info.constraint_name()
                .map_or_else(|| info.message().to_owned(), |name| format!("constraint {name}")),
        ),
        DieselError::DatabaseError(_, _) => ContractRepositoryError::query("database error"),
        DieselError::QueryBuilderError(_) => ContractRepositoryError::query("database query error"),
        DieselError::DeserializationError(_) => {
            ContractRepositoryError::query("unreadable contract row")
        }
        _ => ContractRepositoryError::query("database error"),
    }
}

#[async_trait]
impl ContractRepository for DieselContractRepository {
    async fn add_contract(&self, contract: &NewContract) -> Result<Contract, ContractRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewContractRow::from(contract);

        let stored: ContractRow = conn
            .transaction(|conn| {
                async move {
                    diesel::insert_into(contracts::table)
                        .values(&row)
                        .returning(ContractRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(stored.into())
    }

    async fn get_contract(&self, id: ContractId) -> Result<Contract, ContractRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContractRow> = diesel::sql_query(SELECT_CONTRACT_BY_ID_SQL)
            .bind::<BigInt, _>(id.as_i64())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Contract::from)
            .ok_or_else(|| ContractRepositoryError::not_found(id))
    }

    async fn update_contract(&self, contract: &Contract) -> Result<Contract, ContractRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = contract.id;
        let changes = ContractChangeset::from(contract);

        let updated: Option<ContractRow> = conn
            .transaction(|conn| {
                async move {
                    diesel::update(contracts::table.find(id.as_i64()))
                        .set(&changes)
                        .returning(ContractRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        updated
            .map(Contract::from)
            .ok_or_else(|| ContractRepositoryError::not_found(id))
    }

    async fn delete_contract(&self, id: ContractId) -> Result<(), ContractRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(contracts::table.find(id.as_i64()))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(ContractRepositoryError::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("statement failed".to_owned()))
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ClosedConnection), "connection")]
    #[case(database_error(DatabaseErrorKind::CheckViolation), "rejected")]
    #[case(database_error(DatabaseErrorKind::UniqueViolation), "rejected")]
    #[case(database_error(DatabaseErrorKind::NotNullViolation), "rejected")]
    #[case(database_error(DatabaseErrorKind::SerializationFailure), "query")]
    #[case(DieselError::NotFound, "query")]
    #[case(DieselError::RollbackTransaction, "query")]
    fn diesel_errors_map_to_port_variants(#[case] error: DieselError, #[case] expected: &str) {
        let mapped = map_diesel_error(error);
        let variant = match &mapped {
            ContractRepositoryError::Connection { .. } => "connection",
            ContractRepositoryError::Rejected { .. } => "rejected",
            ContractRepositoryError::Query { .. } => "query",
            ContractRepositoryError::NotFound { .. } => "not_found",
        };
        assert_eq!(variant, expected);
        assert!(mapped.is_storage());
    }

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let mapped = map_pool_error(PoolError::checkout("timed out waiting for connection"));

        assert_eq!(
            mapped,
            ContractRepositoryError::connection("timed out waiting for connection")
        );
    }
}
