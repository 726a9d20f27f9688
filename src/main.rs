use axum::http;
use dotenv::dotenv;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use triage_api::handlers;
use triage_api::services::classifier::Classifier;
use triage_api::services::facilities::FacilityFinder;
use triage_api::services::recommendations::RecommendationBook;
use triage_api::services::schema::SymptomSchema;
use triage_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load Config
    let bind = std::env::var("TRIAGE_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let schema_path = PathBuf::from(
        std::env::var("TRIAGE_SCHEMA_PATH").unwrap_or_else(|_| "data/symptom_schema.csv".to_string()),
    );
    let model_path = PathBuf::from(
        std::env::var("TRIAGE_MODEL_PATH").unwrap_or_else(|_| "data/disease_model.json".to_string()),
    );
    let label_column =
        std::env::var("TRIAGE_LABEL_COLUMN").unwrap_or_else(|_| "Disease".to_string());
    let overpass_url = std::env::var("OVERPASS_URL")
        .unwrap_or_else(|_| "https://overpass-api.de/api/interpreter".to_string());

    // Load Symptom Schema (fatal if unreadable or the label column is absent)
    let schema = SymptomSchema::load(&schema_path, &label_column)?;
    tracing::info!(
        "Loaded {} symptoms from {}",
        schema.symptoms().len(),
        schema_path.display()
    );

    // Load Classifier artifact (fatal if missing or malformed)
    let classifier = Classifier::load(&model_path)?;
    if classifier.features() != schema.symptoms() {
        anyhow::bail!(
            "model artifact at {} expects features {:?} but the symptom schema provides {:?}",
            model_path.display(),
            classifier.features(),
            schema.symptoms()
        );
    }
    tracing::info!(
        "Loaded classifier with {} disease classes from {}",
        classifier.classes().len(),
        model_path.display()
    );

    // Create AppState
    let app_state = AppState {
        schema: Arc::new(schema),
        classifier: Arc::new(classifier),
        recommendations: Arc::new(RecommendationBook::builtin()),
        facilities: Arc::new(FacilityFinder::new(overpass_url)),
    };

    // Setup CORS
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([http::Method::GET, http::Method::POST])
        .allow_headers([http::header::CONTENT_TYPE, http::header::ACCEPT]);

    let app = handlers::app(app_state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors);

    // Start Server
    let addr: SocketAddr = bind.parse()?;
    tracing::info!("Symptom triage API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
