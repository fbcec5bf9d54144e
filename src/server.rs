//! HTTP surface for the planner.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::fallback::FallbackRouteProvider;
use crate::traits::RouteProvider;
use crate::trip::{TripPlan, TripRequest, plan_trip};

pub struct AppState<P> {
    pub provider: FallbackRouteProvider<P>,
}

pub enum ApiError {
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}

pub fn router<P>(state: Arc<AppState<P>>) -> Router
where
    P: RouteProvider + Send + Sync + 'static,
{
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/trips/plan", post(plan_handler::<P>))
        .layer(cors_layer)
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn plan_handler<P>(
    State(state): State<Arc<AppState<P>>>,
    Json(body): Json<Value>,
) -> Result<Json<TripPlan>, ApiError>
where
    P: RouteProvider + Send + Sync + 'static,
{
    let request = TripRequest::from_value(body);

    // Route backends use blocking HTTP clients.
    let plan = tokio::task::spawn_blocking(move || plan_trip(&request, &state.provider))
        .await
        .map_err(|err| {
            error!(error = %err, "planning task failed");
            ApiError::InternalServerError("trip planning failed".to_string())
        })?;

    Ok(Json(plan))
}
