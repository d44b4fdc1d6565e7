//! JSON API served under `/api`

use std::sync::Arc;

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;

use crate::TravelAiError;
use crate::models::{TravelPlan, TravelRequest};
use crate::planner::TripPlanner;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<TripPlanner>,
}

impl AppState {
    pub fn new(planner: TripPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}

/// Error returned by API handlers
pub struct ApiError {
    status: StatusCode,
    body: serde_json::Value,
}

impl ApiError {
    fn invalid(loc: &[&str], message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: json!({ "detail": [{ "loc": loc, "msg": message.into() }] }),
        }
    }
}

impl From<TravelAiError> for ApiError {
    fn from(err: TravelAiError) -> Self {
        match &err {
            TravelAiError::Validation { field, message } => {
                Self::invalid(&["body", field.as_str()], message.as_str())
            }
            _ => {
                tracing::error!("Travel planning failed: {err}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: json!({ "detail": err.to_string() }),
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                Self::invalid(&["body"], rejection.body_text())
            }
            _ => Self {
                status: rejection.status(),
                body: json!({ "detail": rejection.body_text() }),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_configured: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/plan", post(create_plan))
        .route("/health", get(health))
        .with_state(state)
}

async fn create_plan(
    State(state): State<AppState>,
    payload: Result<Json<TravelRequest>, JsonRejection>,
) -> Result<Json<TravelPlan>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        "Planning {}-day {} trip to {}",
        request.duration_days,
        request.travel_type,
        request.destination
    );
    let plan = state.planner.plan(&request).await?;
    Ok(Json(plan))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
        model_configured: state.planner.is_configured(),
    })
}
