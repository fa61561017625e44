//! HTTP routes: inquiry submission, liveness checks, and the JSON envelope.

use std::any::Any;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use super::rate_limit::{RateLimiter, limit_by_ip};
use crate::inquiry::processor::{FAILURE_MESSAGE, SUCCESS_MESSAGE};
use crate::inquiry::{InquiryOutcome, InquiryProcessor, InquirySubmission};

pub const NOT_FOUND_MESSAGE: &str = "Endpoint not found";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Status line reported by `GET /`.
pub const RUNNING_STATUS: &str = "Piano Corner Studio Contact Server is running";

/// `{success, message?, error?}` body used by every non-liveness response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    status: StatusCode,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            status: StatusCode::OK,
        }
    }

    pub fn failure(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            status,
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<InquiryOutcome> for ApiResponse {
    fn from(outcome: InquiryOutcome) -> Self {
        match outcome {
            InquiryOutcome::Sent => ApiResponse::success(SUCCESS_MESSAGE),
            InquiryOutcome::Rejected(e) => ApiResponse::failure(StatusCode::BAD_REQUEST, e.to_string()),
            InquiryOutcome::Failed => {
                ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, FAILURE_MESSAGE)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct Liveness {
    status: &'static str,
    timestamp: String,
}

impl Liveness {
    fn now(status: &'static str) -> Json<Self> {
        Json(Self {
            status,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

/// Build the full application router.
///
/// The rate limit covers `/contact` only; liveness checks stay unlimited.
pub fn app_routes(processor: Arc<InquiryProcessor>, limiter: Arc<RateLimiter>) -> Router {
    let contact = Router::new()
        .route("/contact", post(submit_inquiry).fallback(not_found))
        .route_layer(middleware::from_fn_with_state(limiter, limit_by_ip))
        .with_state(processor);

    Router::new()
        .route("/", get(health))
        .route("/ping", get(ping))
        .merge(contact)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

// ── Liveness ────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Liveness::now(RUNNING_STATUS)
}

async fn ping() -> impl IntoResponse {
    Liveness::now("pong")
}

// ── Inquiry ─────────────────────────────────────────────────────────────

async fn submit_inquiry(
    State(processor): State<Arc<InquiryProcessor>>,
    payload: Result<Json<InquirySubmission>, JsonRejection>,
) -> ApiResponse {
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Unreadable inquiry body");
            return ApiResponse::failure(StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE);
        }
    };

    processor.process(submission).await.into()
}

// ── Fallbacks ───────────────────────────────────────────────────────────

async fn not_found() -> ApiResponse {
    ApiResponse::failure(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Request handler panicked");

    ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
}
