//! Orchestration probes for the contract service.
//!
//! Readiness reports which contract store the server was wired onto, so a
//! deployment that lost its `CONTRACTS_DATABASE_URL` and fell back to memory
//! is visible from the probe alone.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Where contracts are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContractStore {
    Postgres,
    InMemory,
}

/// Readiness probe body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReadinessBody {
    pub ready: bool,
    pub store: ContractStore,
}

/// Probe flags shared by the bootstrap and the handlers.
///
/// The server is live from construction and ready once the store is wired
/// and migrations have run. Shutdown clears liveness.
pub struct HealthState {
    store: ContractStore,
    ready: AtomicBool,
    live: AtomicBool,
}

impl HealthState {
    pub fn new(store: ContractStore) -> Self {
        Self {
            store,
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }

    pub fn store(&self) -> ContractStore {
        self.store
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn probe(ok: bool) -> actix_web::HttpResponseBuilder {
    let mut builder = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    builder.insert_header((header::CACHE_CONTROL, "no-store"));
    builder
}

/// Readiness: 200 once contracts can be served, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Contract store wired", body = ReadinessBody),
        (status = 503, description = "Still starting", body = ReadinessBody)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let body = ReadinessBody {
        ready: state.is_ready(),
        store: state.store(),
    };
    probe(body.ready).json(body)
}

/// Liveness: 200 until shutdown begins.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Serving"),
        (status = 503, description = "Shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe(state.is_alive()).finish()
}
