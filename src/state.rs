use crate::services::classifier::Classifier;
use crate::services::facilities::FacilityFinder;
use crate::services::recommendations::RecommendationBook;
use crate::services::schema::SymptomSchema;
use std::sync::Arc;

/// Shared application state, immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub schema: Arc<SymptomSchema>,
    pub classifier: Arc<Classifier>,
    pub recommendations: Arc<RecommendationBook>,
    pub facilities: Arc<FacilityFinder>,
}
