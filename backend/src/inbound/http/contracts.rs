//! Contract HTTP handlers.
//!
//! ```text
//! POST /api/v1/contracts
//! GET  /api/v1/contracts/{id}
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::contract_validation::name_violation;
use crate::domain::ports::{CreateContractRequest, GetContractRequest};
use crate::domain::{Contract, ContractDto, ContractId, Error, ValidationOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, InternalErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_date};

/// Request payload for creating a contract.
///
/// A missing `name` is read as the empty string and then rejected by the
/// business rules, so clients get the same message either way.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractRequestBody {
    #[serde(default)]
    #[schema(example = "Acme")]
    pub name: String,
    #[serde(default)]
    #[schema(format = "date-time", example = "2025-01-01")]
    pub start_date: Option<String>,
    #[serde(default)]
    #[schema(format = "date-time", example = "2025-06-01")]
    pub end_date: Option<String>,
}

/// Contract representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractResponseBody {
    pub id: i64,
    pub name: String,
    #[schema(format = "date-time")]
    pub start_date: String,
    #[schema(format = "date-time")]
    pub end_date: String,
}

fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl From<Contract> for ContractResponseBody {
    fn from(value: Contract) -> Self {
        Self {
            id: value.id.as_i64(),
            name: value.name,
            start_date: format_timestamp(value.start_date),
            end_date: format_timestamp(value.end_date),
        }
    }
}

fn parse_contract_body(body: ContractRequestBody) -> Result<ContractDto, Error> {
    let mut dates = ValidationOutcome::default();
    let start_date = require_date(
        body.start_date.as_deref(),
        FieldName::new("startDate"),
        &mut dates,
    );
    let end_date = require_date(
        body.end_date.as_deref(),
        FieldName::new("endDate"),
        &mut dates,
    );

    match (start_date, end_date) {
        (Some(start_date), Some(end_date)) if dates.is_valid() => Ok(ContractDto {
            name: body.name,
            start_date,
            end_date,
        }),
        // The rules need both dates, so the name rule is applied here to
        // keep it in the same response as the date failures.
        _ => {
            let outcome: ValidationOutcome = name_violation(&body.name)
                .into_iter()
                .chain(dates.violations().iter().cloned())
                .collect();
            Err(Error::validation(&outcome))
        }
    }
}

/// Create a contract.
///
/// The body is validated against the contract rules before anything is
/// stored; every violation is reported in `details`.
#[utoipa::path(
    post,
    path = "/api/v1/contracts",
    request_body = ContractRequestBody,
    responses(
        (status = 200, description = "Contract created", body = ContractResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = InternalErrorSchema)
    ),
    tags = ["contracts"],
    operation_id = "createContract"
)]
#[post("/contracts")]
pub async fn create_contract(
    state: web::Data<HttpState>,
    payload: web::Json<ContractRequestBody>,
) -> ApiResult<web::Json<ContractResponseBody>> {
    let contract = parse_contract_body(payload.into_inner())?;
    let response = state
        .contracts
        .create_contract(CreateContractRequest { contract })
        .await?;
    Ok(web::Json(ContractResponseBody::from(response.contract)))
}

/// Fetch a contract by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/contracts/{id}",
    params(("id" = i64, Path, description = "Contract identifier")),
    responses(
        (status = 200, description = "Contract", body = ContractResponseBody),
        (status = 404, description = "Unknown contract", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = InternalErrorSchema)
    ),
    tags = ["contracts"],
    operation_id = "getContract"
)]
#[get("/contracts/{id}")]
pub async fn get_contract(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ContractResponseBody>> {
    let id = ContractId::new(path.into_inner());
    let contract = state
        .contracts_query
        .get_contract(GetContractRequest { id })
        .await?;
    Ok(web::Json(ContractResponseBody::from(contract)))
}

#[cfg(test)]
#[path = "contracts_tests.rs"]
mod tests;
