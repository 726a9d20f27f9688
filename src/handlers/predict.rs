use crate::handlers::ServiceError;
use crate::services::ranking::{self, Prediction};
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session key under which the last prediction outcome is kept, so that
/// re-rendering the page does not erase previously displayed results.
pub const LAST_PREDICTION_KEY: &str = "last_prediction";

#[derive(Deserialize)]
pub struct PredictRequest {
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateView {
    pub disease: String,
    pub probability: f64,
    pub doctor: String,
    pub tests: String,
    pub advice: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub confident: bool,
    pub message: String,
    pub candidates: Vec<CandidateView>,
}

impl From<Prediction> for PredictResponse {
    fn from(prediction: Prediction) -> Self {
        let message = match prediction.candidates.first() {
            Some(top) if prediction.confident => format!(
                "Most likely condition: {} ({:.2}%)",
                top.disease,
                top.probability * 100.0
            ),
            _ => "Symptoms overlap across multiple conditions. The prediction is uncertain. \
                  Please consult a doctor for proper diagnosis."
                .to_string(),
        };

        PredictResponse {
            confident: prediction.confident,
            message,
            candidates: prediction
                .candidates
                .into_iter()
                .map(|c| CandidateView {
                    disease: c.disease,
                    probability: c.probability,
                    doctor: c.guidance.doctor,
                    tests: c.guidance.tests,
                    advice: c.guidance.advice,
                })
                .collect(),
        }
    }
}

pub async fn predict_handler(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ServiceError> {
    let features = state.schema.feature_vector(&request.symptoms);

    // Precondition: an all-zero vector never reaches the classifier.
    if features.iter().all(|&bit| bit == 0) {
        return Err(ServiceError::NoSymptomsSelected);
    }

    let distribution = state.classifier.predict_proba(&features).map_err(|e| {
        tracing::error!("Prediction failed: {}", e);
        ServiceError::InternalError("Prediction failed".to_string())
    })?;

    let prediction = ranking::rank(distribution, &state.recommendations);
    if !prediction.confident {
        tracing::warn!("Low-confidence prediction, surfacing uncertainty warning");
    }

    let response = PredictResponse::from(prediction);

    // Keeping the outcome in the session is best-effort; losing it only
    // costs result restoration on the next page render.
    if let Err(e) = session.insert(LAST_PREDICTION_KEY, response.clone()).await {
        tracing::warn!("Failed to persist prediction in session: {}", e);
    }

    Ok(Json(response))
}
