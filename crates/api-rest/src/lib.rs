//! # API REST
//!
//! REST API implementation for Swasthya.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `swasthya-core` for every data operation.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    ErrorRes, HealthRes, HealthService, JsonDocument, ObservationRes, PatientRes, SaveEhrReq,
    StatusRes, SurveyEntry,
};
use swasthya_core::{CoreError, EhrSubmission, RecordService};

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<RecordService>,
}

impl AppState {
    pub fn new(records: RecordService) -> Self {
        Self {
            records: Arc::new(records),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorRes>);

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        save_ehr,
        load_ehr,
        save_survey,
        load_survey,
        vaccination_reminders,
        sync_ayushman,
        clear_all,
    ),
    components(schemas(
        HealthRes,
        StatusRes,
        ErrorRes,
        SaveEhrReq,
        PatientRes,
        ObservationRes,
        SurveyEntry,
        JsonDocument,
    ))
)]
pub struct ApiDoc;

/// Builds the full REST router, Swagger UI included.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/save_ehr", post(save_ehr))
        .route("/load_ehr", get(load_ehr))
        .route("/save_survey", post(save_survey))
        .route("/load_survey", get(load_survey))
        .route("/vaccination_reminders", get(vaccination_reminders))
        .route("/sync_ayushman", get(sync_ayushman))
        .route("/clear_all", get(clear_all))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/save_ehr",
    request_body = SaveEhrReq,
    responses(
        (status = 200, description = "Observation merged into the patient record", body = StatusRes),
        (status = 400, description = "abha_number missing", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Save one EHR observation
///
/// Appends the observation to the patient with the same `abha_number`, or creates that patient
/// if it is new. The server's current date is used when `date` is absent.
///
/// # Errors
/// Returns `400 Bad Request` if `abha_number` is missing or blank, and
/// `500 Internal Server Error` if the EHR store cannot be read or written.
#[axum::debug_handler]
async fn save_ehr(
    State(state): State<AppState>,
    Json(req): Json<SaveEhrReq>,
) -> Result<Json<StatusRes>, ApiError> {
    state
        .records
        .save_ehr(build_submission(req))
        .map_err(|e| api_error("Save EHR", e))?;
    Ok(Json(StatusRes::new("EHR saved successfully")))
}

#[utoipa::path(
    get,
    path = "/load_ehr",
    responses(
        (status = 200, description = "All patient records", body = [PatientRes]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List every patient record with its full observation history
///
/// The patient store is returned exactly as stored.
#[axum::debug_handler]
async fn load_ehr(State(state): State<AppState>) -> Result<Json<Vec<JsonDocument>>, ApiError> {
    let records = state
        .records
        .load_ehr_documents()
        .map_err(|e| api_error("Load EHR", e))?;
    Ok(Json(records.into_iter().map(JsonDocument).collect()))
}

#[utoipa::path(
    post,
    path = "/save_survey",
    request_body = SurveyEntry,
    responses(
        (status = 200, description = "Survey stored", body = StatusRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Save one survey submission as its own entry
#[axum::debug_handler]
async fn save_survey(
    State(state): State<AppState>,
    Json(entry): Json<SurveyEntry>,
) -> Result<Json<StatusRes>, ApiError> {
    state
        .records
        .save_survey(entry.0)
        .map_err(|e| api_error("Save survey", e))?;
    Ok(Json(StatusRes::new("Survey saved successfully")))
}

#[utoipa::path(
    get,
    path = "/load_survey",
    responses(
        (status = 200, description = "All survey entries", body = [JsonDocument]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn load_survey(State(state): State<AppState>) -> Result<Json<Vec<JsonDocument>>, ApiError> {
    let surveys = state
        .records
        .load_survey()
        .map_err(|e| api_error("Load survey", e))?;
    Ok(Json(surveys.into_iter().map(JsonDocument).collect()))
}

#[utoipa::path(
    get,
    path = "/vaccination_reminders",
    responses(
        (status = 200, description = "Seeded vaccination reminders", body = [JsonDocument]),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn vaccination_reminders(
    State(state): State<AppState>,
) -> Result<Json<Vec<JsonDocument>>, ApiError> {
    let reminders = state
        .records
        .vaccination_reminders()
        .map_err(|e| api_error("Vaccination reminders", e))?;
    Ok(Json(reminders.into_iter().map(JsonDocument).collect()))
}

#[utoipa::path(
    get,
    path = "/sync_ayushman",
    responses(
        (status = 200, description = "Registry payload, or {\"error\": \"Unable to connect. Offline mode\"}", body = JsonDocument)
    )
)]
/// Pull data from the Ayushman Bharat registry
///
/// Always answers 200: registry failures are reported in the body, never as a server error.
#[axum::debug_handler]
async fn sync_ayushman(State(state): State<AppState>) -> Json<JsonDocument> {
    Json(JsonDocument(state.records.sync_registry().await))
}

#[utoipa::path(
    get,
    path = "/clear_all",
    responses(
        (status = 200, description = "Every store truncated to an empty array", body = StatusRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn clear_all(State(state): State<AppState>) -> Result<Json<StatusRes>, ApiError> {
    state
        .records
        .clear_all()
        .map_err(|e| api_error("Clear all", e))?;
    Ok(Json(StatusRes::new("All local data cleared")))
}

fn api_error(context: &str, e: CoreError) -> ApiError {
    match e {
        CoreError::MissingIdentifier => (
            StatusCode::BAD_REQUEST,
            Json(ErrorRes::new(e.to_string())),
        ),
        e => {
            tracing::error!("{} error: {:?}", context, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes::new("Internal error")),
            )
        }
    }
}

// Helper functions
fn build_submission(req: SaveEhrReq) -> EhrSubmission {
    EhrSubmission {
        identifier: req.abha_number,
        name: req.name,
        gender: req.gender,
        problem_name: req.problem_name,
        problem_description: req.problem_description,
        vitals_bp: req.vitals_bp,
        vitals_temp: req.vitals_temp,
        date: req.date,
    }
}
