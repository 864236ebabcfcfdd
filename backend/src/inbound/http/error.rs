//! HTTP adapter mapping for domain errors.
//!
//! Client errors are rendered as the serialised domain [`Error`]; internal
//! errors never leak their message and use the generic fault body instead.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::{Value, json};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned to clients for every unhandled failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Generic body for 500 responses.
///
/// # Examples
/// ```
/// use contract_service::inbound::http::error::internal_error_body;
///
/// assert_eq!(internal_error_body().to_string(), r#"{"error":"Internal server error"}"#);
/// ```
pub fn internal_error_body() -> Value {
    json!({ "error": INTERNAL_ERROR_MESSAGE })
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        if status.is_server_error() {
            builder.json(internal_error_body())
        } else {
            builder.json(self)
        }
    }
}

/// `JsonConfig` error handler turning body extraction failures into
/// `invalid_request` responses.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json.".to_owned(),
        other => other.to_string(),
    };
    Error::invalid_request("Request body is not valid JSON.")
        .with_details(json!([{ "field": "body", "message": message }]))
        .into()
}
