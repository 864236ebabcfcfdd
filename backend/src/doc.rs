//! OpenAPI documentation for the contract API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::OpenApi;

use crate::inbound::http::contracts::{ContractRequestBody, ContractResponseBody};
use crate::inbound::http::health::{ContractStore, ReadinessBody};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, FieldViolationSchema, InternalErrorSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contract service API",
        description = "Create and read contracts; health probes for orchestration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::contracts::create_contract,
        crate::inbound::http::contracts::get_contract,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ContractRequestBody,
        ContractResponseBody,
        ContractStore,
        ReadinessBody,
        ErrorSchema,
        ErrorCodeSchema,
        FieldViolationSchema,
        InternalErrorSchema,
    )),
    tags(
        (name = "contracts", description = "Contract records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces `::` with `.` in schema names.
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn object_fields(schema: &RefOr<Schema>) -> Vec<String> {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/contracts")]
    #[case("/api/v1/contracts/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get(ERROR_SCHEMA_NAME).expect("Error schema"));

        for field in ["code", "message", "details", "traceId"] {
            assert!(fields.iter().any(|name| name == field), "missing {field}");
        }
    }

    #[test]
    fn request_body_uses_camel_case_dates() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = object_fields(schemas.get("ContractRequestBody").expect("request schema"));

        assert!(fields.iter().any(|name| name == "startDate"));
        assert!(fields.iter().any(|name| name == "endDate"));
    }
}
