//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use contract_service::domain::ContractService;
use contract_service::domain::ports::FixtureContractRepository;
use contract_service::inbound::http::contracts::{create_contract, get_contract};
use contract_service::inbound::http::error::json_error_handler;
use contract_service::inbound::http::health::{HealthState, live, ready};
use contract_service::inbound::http::state::HttpState;
use contract_service::outbound::persistence::DieselContractRepository;
use contract_service::{FaultInterceptor, Trace};
#[cfg(debug_assertions)]
use contract_service::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the contract service onto PostgreSQL when a pool is configured,
/// otherwise onto the in-memory repository.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            let repository = Arc::new(DieselContractRepository::new(pool.clone()));
            HttpState::from_service(Arc::new(ContractService::new(repository)))
        }
        None => {
            warn!("no database configured; contracts are kept in memory");
            let repository = Arc::new(FixtureContractRepository::new());
            HttpState::from_service(Arc::new(ContractService::new(repository)))
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(create_contract)
        .service(get_contract);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(FaultInterceptor)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "contract service listening");
    health_state.mark_ready();
    Ok(server)
}
