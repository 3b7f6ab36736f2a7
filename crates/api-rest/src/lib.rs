//! # API REST
//!
//! REST API implementation for CareDesk.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `caredesk-core` for everything else.

#![warn(rust_2018_idioms)]

mod convert;

use api_shared::{
    CreateNoteReq, CreateNoteRes, CreatePatientReq, CreatePatientRes, EmergencyProfileRes,
    ErrorRes, HealthService, ListNotesRes, ListPatientsRes, NoteRes, PatientRes, PingRes,
    QrQuery, StepsQuery, StepsRes, UpdateEmergencyReq, UpdateEmergencyRes, VitalsQuery,
    VitalsSeriesRes, VitalsSummary, VitalsSummaryRes,
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use caredesk_core::config::{data_file_from_env_value, step_minutes_from_env_value};
use caredesk_core::constants::APP_VERSION;
use caredesk_core::services::lookup_steps;
use caredesk_core::{
    CoreConfig, CoreError, DashboardService, JsonFileStore, NewPatient, ProfileUpdate, Records,
    WalletService,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

type ApiError = (StatusCode, Json<ErrorRes>);

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    dashboard: DashboardService,
    wallet: WalletService,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>, records: Arc<Records>) -> Self {
        Self {
            dashboard: DashboardService::new(cfg, records.clone()),
            wallet: WalletService::new(records),
        }
    }
}

/// Resolves configuration from the environment and opens the record store.
///
/// # Environment Variables
/// - `CAREDESK_DATA_FILE`: JSON record store (default: "data.json")
/// - `CAREDESK_STEP_MINUTES`: vitals sampling interval (default: 30)
///
/// # Errors
/// Returns an error if the configuration is invalid or the store cannot be read or seeded.
pub fn state_from_env() -> anyhow::Result<AppState> {
    let data_file = data_file_from_env_value(std::env::var("CAREDESK_DATA_FILE").ok());
    let step_minutes = step_minutes_from_env_value(std::env::var("CAREDESK_STEP_MINUTES").ok())?;
    let cfg = Arc::new(CoreConfig::new(data_file, step_minutes)?);

    tracing::info!("-- Using record store {}", cfg.data_file().display());
    let records = Arc::new(Records::open(JsonFileStore::new(cfg.data_file()))?);

    Ok(AppState::new(cfg, records))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        ping,
        steps,
        emergency,
        update_emergency,
        qr,
        list_patients,
        create_patient,
        list_notes,
        create_note,
        patient_vitals,
        patient_summary,
    ),
    components(schemas(
        PingRes,
        ErrorRes,
        StepsRes,
        EmergencyProfileRes,
        UpdateEmergencyReq,
        UpdateEmergencyRes,
        PatientRes,
        ListPatientsRes,
        CreatePatientReq,
        CreatePatientRes,
        NoteRes,
        ListNotesRes,
        CreateNoteReq,
        CreateNoteRes,
        VitalsSeriesRes,
        VitalsSummary,
        VitalsSummaryRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/steps", get(steps))
        .route("/api/emergency", get(emergency).post(update_emergency))
        .route("/api/qr", get(qr))
        .route("/api/patients", get(list_patients).post(create_patient))
        .route("/api/patient/:pid/notes", get(list_notes).post(create_note))
        .route("/api/patient/:pid/vitals", get(patient_vitals))
        .route("/api/patient/:pid/summary", get(patient_summary))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn error_res(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorRes {
            error: message.into(),
        }),
    )
}

/// Maps a core error onto a status code, hiding server-side detail from the client.
fn core_error(context: &str, e: CoreError) -> ApiError {
    if e.is_client_error() {
        tracing::warn!("{context} rejected: {e}");
        return error_res(StatusCode::BAD_REQUEST, e.to_string());
    }
    tracing::error!("{context} error: {:?}", e);
    error_res(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}

/// Parses a JSON body regardless of content type; anything unparseable counts as empty.
fn lenient_json<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    serde_json::from_slice(body).unwrap_or_default()
}

#[utoipa::path(
    get,
    path = "/api/ping",
    responses(
        (status = 200, description = "Service is alive", body = PingRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Returns liveness, the service version and the current UTC time.
#[axum::debug_handler]
async fn ping() -> Json<PingRes> {
    Json(HealthService::check_health(APP_VERSION))
}

#[utoipa::path(
    get,
    path = "/api/steps",
    params(StepsQuery),
    responses(
        (status = 200, description = "Steps for the topic, or a not-found message", body = StepsRes)
    )
)]
/// Civic process guidance lookup
#[axum::debug_handler]
async fn steps(Query(query): Query<StepsQuery>) -> Json<StepsRes> {
    let answer = lookup_steps(query.topic.as_deref().unwrap_or_default());
    Json(StepsRes {
        topic: answer.topic,
        steps: answer.steps,
    })
}

#[utoipa::path(
    get,
    path = "/api/emergency",
    responses(
        (status = 200, description = "Emergency profile", body = EmergencyProfileRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Read the emergency identity profile
#[axum::debug_handler]
async fn emergency(State(state): State<AppState>) -> Result<Json<EmergencyProfileRes>, ApiError> {
    let profile = state
        .wallet
        .profile()
        .map_err(|e| core_error("Read emergency profile", e))?;
    Ok(Json(convert::profile_res(profile)))
}

#[utoipa::path(
    post,
    path = "/api/emergency",
    request_body = UpdateEmergencyReq,
    responses(
        (status = 200, description = "Profile updated", body = UpdateEmergencyRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Update the emergency identity profile
///
/// Only the supplied string fields are replaced; `updated_at` is always refreshed.
#[axum::debug_handler]
async fn update_emergency(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UpdateEmergencyRes>, ApiError> {
    // Fields are taken one by one so a wrongly typed field does not discard the rest.
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap_or_default();
    let field = |key: &str| body.get(key).and_then(|v| v.as_str()).map(str::to_string);
    let profile = state
        .wallet
        .update(ProfileUpdate {
            name: field("name"),
            id: field("id"),
            ice: field("ice"),
            medical_notes: field("medical_notes"),
        })
        .map_err(|e| core_error("Update emergency profile", e))?;

    Ok(Json(UpdateEmergencyRes {
        ok: true,
        profile: convert::profile_res(profile),
    }))
}

#[utoipa::path(
    get,
    path = "/api/qr",
    params(QrQuery),
    responses(
        (status = 400, description = "Missing text", body = ErrorRes),
        (status = 501, description = "No QR encoder configured", body = ErrorRes)
    )
)]
/// QR code for the emergency card
///
/// This build ships without an image encoder, so valid requests are answered with 501.
#[axum::debug_handler]
async fn qr(Query(query): Query<QrQuery>) -> ApiError {
    let text = query.text.unwrap_or_default();
    if text.trim().is_empty() {
        return error_res(StatusCode::BAD_REQUEST, "Missing ?text=");
    }
    error_res(StatusCode::NOT_IMPLEMENTED, "QR not enabled on server")
}

#[utoipa::path(
    get,
    path = "/api/patients",
    responses(
        (status = 200, description = "List of patients", body = ListPatientsRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List all patients on the dashboard
#[axum::debug_handler]
async fn list_patients(State(state): State<AppState>) -> Result<Json<ListPatientsRes>, ApiError> {
    let patients = state
        .dashboard
        .list_patients()
        .map_err(|e| core_error("List patients", e))?;
    Ok(Json(ListPatientsRes {
        patients: patients.into_iter().map(convert::patient_res).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = CreatePatientRes),
        (status = 400, description = "Name or bed missing", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Admit a new patient
///
/// `name` and `bed` are required; the remaining fields fall back to demo defaults.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatePatientRes>), ApiError> {
    let req: CreatePatientReq = lenient_json(&body);
    let patient = state
        .dashboard
        .add_patient(NewPatient {
            name: req.name,
            bed: req.bed,
            age: req.age,
            mrn: req.mrn,
            status: req.status,
            risk: req.risk,
        })
        .map_err(|e| core_error("Create patient", e))?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePatientRes {
            ok: true,
            patient: convert::patient_res(patient),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/patient/{pid}/notes",
    params(("pid" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Notes for the patient", body = ListNotesRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List bedside notes for a patient
#[axum::debug_handler]
async fn list_notes(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<ListNotesRes>, ApiError> {
    let notes = state
        .dashboard
        .notes(&pid)
        .map_err(|e| core_error("List notes", e))?;
    Ok(Json(ListNotesRes {
        notes: notes.into_iter().map(convert::note_res).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/patient/{pid}/notes",
    params(("pid" = String, Path, description = "Patient id")),
    request_body = CreateNoteReq,
    responses(
        (status = 201, description = "Note recorded", body = CreateNoteRes),
        (status = 400, description = "Text missing", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Record a bedside note for a patient
#[axum::debug_handler]
async fn create_note(
    State(state): State<AppState>,
    Path(pid): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateNoteRes>), ApiError> {
    let req: CreateNoteReq = lenient_json(&body);
    let note = state
        .dashboard
        .add_note(&pid, req.text, req.author)
        .map_err(|e| core_error("Create note", e))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateNoteRes {
            ok: true,
            note: convert::note_res(note),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/patient/{pid}/vitals",
    params(("pid" = String, Path, description = "Patient id"), VitalsQuery),
    responses(
        (status = 200, description = "Synthetic vitals series", body = VitalsSeriesRes),
        (status = 400, description = "Invalid hours", body = ErrorRes)
    )
)]
/// Synthetic vitals series for a patient
///
/// The series is seeded from the patient id, so repeated calls return the same readings.
#[axum::debug_handler]
async fn patient_vitals(
    State(state): State<AppState>,
    Path(pid): Path<String>,
    Query(query): Query<VitalsQuery>,
) -> Result<Json<VitalsSeriesRes>, ApiError> {
    let hours = match query.hours.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
            error_res(StatusCode::BAD_REQUEST, "hours must be an integer")
        })?),
    };

    let series = state
        .dashboard
        .vitals(&pid, hours)
        .map_err(|e| core_error("Patient vitals", e))?;
    Ok(Json(convert::series_res(&series)))
}

#[utoipa::path(
    get,
    path = "/api/patient/{pid}/summary",
    params(("pid" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "24h summary and alerts", body = VitalsSummaryRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Trailing-window vitals summary and threshold alerts for a patient
#[axum::debug_handler]
async fn patient_summary(
    State(state): State<AppState>,
    Path(pid): Path<String>,
) -> Result<Json<VitalsSummaryRes>, ApiError> {
    let report = state
        .dashboard
        .summary(&pid)
        .map_err(|e| core_error("Patient summary", e))?;
    Ok(Json(convert::summary_res(report)))
}
