//! Last-resort fault boundary.
//!
//! [`FaultInterceptor`] turns every unhandled failure into the same generic
//! 500 response and logs what actually went wrong. Unhandled means a 5xx
//! response, an `Err` from the inner service, or a panic while polling the
//! handler. Client errors (4xx) and successful responses pass through
//! untouched.
//!
//! A 5xx response is rewritten in place. After an inner `Err` or a panic the
//! request is gone, so the middleware returns [`UnhandledFault`] and Actix
//! renders its generic body.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse, ResponseError};
use futures_util::FutureExt as _;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::{TRACE_ID_HEADER, TraceId};
use crate::inbound::http::error::internal_error_body;

/// Middleware replacing unhandled failures with `{"error": "Internal server error"}`.
///
/// Register it inside [`crate::Trace`] so logged faults carry the trace id:
///
/// ```
/// use actix_web::App;
/// use contract_service::{FaultInterceptor, Trace};
///
/// let app = App::new().wrap(FaultInterceptor).wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FaultInterceptor;

impl<S, B> Transform<S, ServiceRequest> for FaultInterceptor
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = FaultInterceptorMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(FaultInterceptorMiddleware { service }))
    }
}

/// Service wrapper produced by [`FaultInterceptor`].
pub struct FaultInterceptorMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for FaultInterceptorMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Only owned strings survive past the inner call: routing needs the
        // request to be uniquely held.
        let route = RouteLabel {
            method: req.method().to_string(),
            path: req.path().to_owned(),
        };
        let fut = self.service.call(req);
        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(res)) if res.status().is_server_error() => {
                    let (request, response) = res.into_parts();
                    let cause = response.error().map_or_else(
                        || format!("handler responded with status {}", response.status()),
                        ToString::to_string,
                    );
                    route.log("server error response", &cause);
                    Ok(ServiceResponse::new(
                        request,
                        UnhandledFault::current().error_response(),
                    ))
                }
                Ok(Ok(res)) => Ok(res.map_into_boxed_body()),
                Ok(Err(err)) => {
                    route.log("inner service failed", &err.to_string());
                    Err(generic_fault())
                }
                Err(panic) => {
                    route.log("handler panicked", &panic_message(panic.as_ref()));
                    Err(generic_fault())
                }
            }
        })
    }
}

/// The generic 500, carrying the trace id of the failed request.
///
/// Returned as an `Err` when the request itself is lost, so Actix renders
/// it through [`ResponseError`].
#[derive(Debug, Default, thiserror::Error)]
#[error("Internal server error")]
pub struct UnhandledFault {
    trace_id: Option<TraceId>,
}

impl UnhandledFault {
    /// Fault for the request currently in scope.
    pub fn current() -> Self {
        Self {
            trace_id: TraceId::current(),
        }
    }
}

impl ResponseError for UnhandledFault {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::InternalServerError();
        if let Some(id) = self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.to_string()));
        }
        builder.json(internal_error_body())
    }
}

fn generic_fault() -> Error {
    Error::from(UnhandledFault::current())
}

struct RouteLabel {
    method: String,
    path: String,
}

impl RouteLabel {
    fn log(&self, kind: &str, cause: &str) {
        let trace_id = TraceId::current().map(|id| id.to_string());
        error!(
            trace_id = trace_id.as_deref(),
            method = %self.method,
            path = %self.path,
            kind,
            cause,
            "unhandled request failure"
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned())
}
