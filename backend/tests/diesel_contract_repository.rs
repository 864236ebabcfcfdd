//! Integration tests for `DieselContractRepository` against embedded PostgreSQL.
//!
//! Each test bootstraps its own cluster, creates a fresh database, applies the
//! embedded migrations through `run_migrations` and exercises the repository
//! port. Suites skip when no cluster can be started unless
//! `REQUIRE_TEST_CLUSTER` is set.
//!
//! # Runtime Strategy
//!
//! The cluster bootstrap and the `postgres` client are blocking and must run
//! outside Tokio, so the context owns a runtime and blocks on it per
//! repository call.

use chrono::{DateTime, TimeZone, Utc};
use contract_service::domain::ports::{ContractRepository, ContractRepositoryError};
use contract_service::domain::{Contract, ContractId, NewContract};
use contract_service::outbound::persistence::{
    DbPool, DieselContractRepository, PoolConfig, run_migrations,
};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use support::{format_postgres_error, handle_cluster_setup_failure};

// -----------------------------------------------------------------------------
// Fixtures
// -----------------------------------------------------------------------------

fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

#[fixture]
fn acme() -> NewContract {
    NewContract {
        name: "Acme".to_owned(),
        start_date: utc(2025, 1, 1),
        end_date: utc(2025, 6, 1),
    }
}

// -----------------------------------------------------------------------------
// Test Context
// -----------------------------------------------------------------------------

// Field order is drop order: the pool closes before its runtime and the
// cluster stops last.
struct TestContext {
    repository: DieselContractRepository,
    runtime: Runtime,
    database_url: String,
    _cluster: TestCluster,
}

impl TestContext {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn execute(&self, sql: &str) {
        let mut client = Client::connect(&self.database_url, NoTls)
            .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)));
        client
            .batch_execute(sql)
            .unwrap_or_else(|err| panic!("execute: {}", format_postgres_error(&err)));
    }
}

fn create_database(admin_url: &str, name: &str) -> Result<(), String> {
    let mut client =
        Client::connect(admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))
}

fn setup_test_context() -> Result<TestContext, String> {
    let cluster = pg_embed::test_cluster()?;
    let database_name = format!("contracts_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    create_database(&admin_url, &database_name)?;
    let database_url = cluster.connection().database_url(&database_name);

    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    runtime
        .block_on(run_migrations(&database_url))
        .map_err(|err| err.to_string())?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        repository: DieselContractRepository::new(pool),
        runtime,
        database_url,
        _cluster: cluster,
    })
}

#[fixture]
fn diesel_world() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[rstest]
fn add_assigns_increasing_ids_and_get_reads_back(
    diesel_world: Option<TestContext>,
    acme: NewContract,
) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: add_assigns_increasing_ids_and_get_reads_back skipped");
        return;
    };

    let first = ctx
        .block_on(ctx.repository.add_contract(&acme))
        .expect("first insert");
    let second = ctx
        .block_on(ctx.repository.add_contract(&acme))
        .expect("second insert");
    let fetched = ctx
        .block_on(ctx.repository.get_contract(first.id))
        .expect("fetch");

    assert!(first.id.as_i64() >= 1);
    assert!(second.id > first.id);
    assert_eq!(fetched, acme.clone().into_contract(first.id));
}

#[rstest]
fn update_replaces_fields_but_keeps_the_id(diesel_world: Option<TestContext>, acme: NewContract) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: update_replaces_fields_but_keeps_the_id skipped");
        return;
    };

    let stored = ctx
        .block_on(ctx.repository.add_contract(&acme))
        .expect("insert");
    let renamed = Contract {
        name: "Acme Renewed".to_owned(),
        end_date: utc(2026, 1, 1),
        ..stored.clone()
    };

    let updated = ctx
        .block_on(ctx.repository.update_contract(&renamed))
        .expect("update");
    let fetched = ctx
        .block_on(ctx.repository.get_contract(stored.id))
        .expect("fetch");

    assert_eq!(updated, renamed);
    assert_eq!(fetched, renamed);
}

#[rstest]
fn delete_removes_the_row(diesel_world: Option<TestContext>, acme: NewContract) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: delete_removes_the_row skipped");
        return;
    };

    let stored = ctx
        .block_on(ctx.repository.add_contract(&acme))
        .expect("insert");
    ctx.block_on(ctx.repository.delete_contract(stored.id))
        .expect("delete");

    let result = ctx.block_on(ctx.repository.get_contract(stored.id));
    assert_eq!(result, Err(ContractRepositoryError::not_found(stored.id)));
}

#[rstest]
fn missing_rows_report_not_found(diesel_world: Option<TestContext>, acme: NewContract) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: missing_rows_report_not_found skipped");
        return;
    };
    let missing = ContractId::new(9_999);

    let fetched = ctx.block_on(ctx.repository.get_contract(missing));
    let updated = ctx.block_on(ctx.repository.update_contract(&acme.into_contract(missing)));
    let deleted = ctx.block_on(ctx.repository.delete_contract(missing));

    assert_eq!(fetched, Err(ContractRepositoryError::not_found(missing)));
    assert_eq!(updated, Err(ContractRepositoryError::not_found(missing)));
    assert_eq!(deleted, Err(ContractRepositoryError::not_found(missing)));
}

#[rstest]
fn reversed_dates_are_rejected_by_the_store(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: reversed_dates_are_rejected_by_the_store skipped");
        return;
    };
    let reversed = NewContract {
        name: "Backwards".to_owned(),
        start_date: utc(2025, 6, 1),
        end_date: utc(2025, 1, 1),
    };

    let result = ctx.block_on(ctx.repository.add_contract(&reversed));

    assert!(
        matches!(result, Err(ContractRepositoryError::Rejected { .. })),
        "expected Rejected, got {result:?}"
    );
}

#[rstest]
fn missing_table_surfaces_as_a_query_error(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: missing_table_surfaces_as_a_query_error skipped");
        return;
    };
    ctx.execute("DROP TABLE contracts;");

    let result = ctx.block_on(ctx.repository.get_contract(ContractId::new(1)));

    assert!(
        matches!(result, Err(ContractRepositoryError::Query { .. })),
        "expected Query, got {result:?}"
    );
}

#[rstest]
fn migrations_are_idempotent(diesel_world: Option<TestContext>) {
    let Some(ctx) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: migrations_are_idempotent skipped");
        return;
    };

    let applied = ctx
        .block_on(run_migrations(&ctx.database_url))
        .expect("second migration run");

    assert_eq!(applied, 0);
}
