use crate::handlers::ServiceError;
use crate::services::facilities::Facility;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct FacilityQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize)]
pub struct FacilitiesResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub facilities: Vec<Facility>,
}

/// Looks up medical facilities near the submitted coordinate.
///
/// Zero matches is a successful lookup with `status = "empty"`; only a
/// failed external query becomes an error response.
pub async fn nearby_handler(
    State(state): State<AppState>,
    Query(params): Query<FacilityQuery>,
) -> Result<Json<FacilitiesResponse>, ServiceError> {
    let facilities = state
        .facilities
        .nearby(params.lat, params.lon)
        .await
        .map_err(|e| {
            tracing::error!("Facility lookup failed: {}", e);
            ServiceError::LookupUnavailable("Facility lookup unavailable".to_string())
        })?;

    let response = if facilities.is_empty() {
        FacilitiesResponse {
            status: "empty",
            message: Some("No nearby medical centers found.".to_string()),
            facilities,
        }
    } else {
        FacilitiesResponse {
            status: "ok",
            message: None,
            facilities,
        }
    };

    Ok(Json(response))
}
