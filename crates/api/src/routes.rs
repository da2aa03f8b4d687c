use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, CONTENT_TYPE,
        },
        HeaderValue, Method, Response, StatusCode,
    },
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use meshi_core::domain::contract::{self, ValidationError};
use meshi_core::domain::recommendation::{RecommendationOutcome, RecommendationRequest};
use meshi_core::llm::ModelInvoker;
use meshi_core::pipeline;

const INTERNAL_ERROR_BODY: &str = r#"{"error":"Internal server error"}"#;

// Request bodies are only read for POST; anything larger is not a valid request.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub invoker: Arc<dyn ModelInvoker>,
    pub started_at: Instant,
}

pub fn router(state: AppState) -> Router {
    with_layers(
        Router::new()
            .route("/", any(recommend))
            .route("/recommend", any(recommend))
            .route("/healthz", get(healthz))
            .route("/health", get(health))
            .with_state(state),
    )
}

/// Panic guard, CORS origin header on every response, request tracing.
fn with_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    timestamp: DateTime<Utc>,
    uptime_secs: u64,
    version: &'static str,
}

async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        timestamp: Utc::now(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn recommend(State(state): State<AppState>, method: Method, body: Body) -> Response<Body> {
    if method == Method::OPTIONS {
        return preflight_response();
    }
    if method != Method::POST {
        return error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    let parsed = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => contract::parse_request_body(&bytes),
        Err(_) => Err(ValidationError::InvalidJsonBody),
    };
    let request = match parsed {
        Ok(request) => request,
        Err(e) => {
            tracing::info!(error = %e, "rejected recommendation request");
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    tracing::info!(
        latitude = %request.latitude,
        longitude = %request.longitude,
        date = %request.date,
        "processing recommendation request"
    );

    let outcome = run_pipeline(&state, request).await;
    tracing::info!(source = ?outcome.source, "recommendations ready");

    json_response(StatusCode::OK, &outcome.payload)
}

/// Runs the pipeline on its own task so that a panic inside it degrades to the fallback
/// recommendations instead of a 500.
async fn run_pipeline(state: &AppState, request: RecommendationRequest) -> RecommendationOutcome {
    let invoker = Arc::clone(&state.invoker);
    let task_request = request.clone();
    let task =
        tokio::spawn(async move { pipeline::recommend(invoker.as_ref(), &task_request).await });

    match task.await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %err, date = %request.date, "recommendation task failed; serving fallback recommendations");
            pipeline::fallback_outcome(&request)
        }
    }
}

fn preflight_response() -> Response<Body> {
    (
        StatusCode::NO_CONTENT,
        [
            (ACCESS_CONTROL_ALLOW_METHODS, "POST"),
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (ACCESS_CONTROL_MAX_AGE, "3600"),
        ],
    )
        .into_response()
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn error_response(status: StatusCode, message: &str) -> Response<Body> {
    json_response(status, &ErrorBody { error: message })
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Body> {
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, [(CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response body");
            internal_error_response()
        }
    }
}

fn internal_error_response() -> Response<Body> {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(CONTENT_TYPE, "application/json")],
        INTERNAL_ERROR_BODY,
    )
        .into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(detail, "request handler panicked");
    internal_error_response()
}
