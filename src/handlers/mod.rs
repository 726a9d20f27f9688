use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

pub mod facilities;
pub mod form;
pub mod predict;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(form::form_page))
        .route("/health", get(health_check))
        .route("/v1/predict", post(predict::predict_handler))
        .route("/v1/facilities", get(facilities::nearby_handler))
}

/// Builds the full application with the per-session state layer attached.
/// `main` adds the outermost CORS and trace layers on top of this.
pub fn app(state: AppState) -> Router {
    let session_store = tower_sessions::MemoryStore::default();
    let session_layer = tower_sessions::SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_same_site(tower_sessions::cookie::SameSite::Lax);

    router().layer(session_layer).with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub enum ServiceError {
    /// Precondition failure: a prediction was requested with no symptoms
    /// checked. The classifier is never invoked in this case.
    NoSymptomsSelected,
    /// The external facility query failed; rendered as a degraded section,
    /// never a crash.
    LookupUnavailable(String),
    InternalError(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ServiceError::NoSymptomsSelected => (
                StatusCode::BAD_REQUEST,
                "Please select at least one symptom to get a prediction.".to_string(),
            ),
            ServiceError::LookupUnavailable(e) => (StatusCode::BAD_GATEWAY, e),
            ServiceError::InternalError(e) => (StatusCode::INTERNAL_SERVER_ERROR, e),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}
