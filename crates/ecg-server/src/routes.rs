//! HTTP routes and handlers
//!
//! Error policy follows the service contract: missing primary input is the
//! only hard client error; a missing model or failed analysis degrades the
//! response instead of failing it.

use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use ecg_core::{read_record, LeadSet};
use ecg_model::PrecordialGenerator;
use ecg_processing::{analyze_rhythm, derive_limb_leads};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

/// Build the service router
///
/// CORS is fully permissive: the measurement frontend is served from a
/// different origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/get-record/{name}", get(get_record))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Body of `POST /analyze`
///
/// Both fields are optional at the serde level so their absence maps to
/// the contract's 400 instead of a generic deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub signal_lead1: Option<Vec<f64>>,
    #[serde(default)]
    pub signal_lead2: Option<Vec<f64>>,
}

/// `POST /analyze`: derive, synthesize, analyze
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    let (lead1, lead2) = match (&request.signal_lead1, &request.signal_lead2) {
        (Some(lead1), Some(lead2)) => (lead1, lead2),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing signal_lead1 or signal_lead2" })),
            )
                .into_response();
        }
    };

    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        lead1_samples = lead1.len(),
        lead2_samples = lead2.len(),
        "analyze request"
    );

    let mut all_leads: LeadSet = match derive_limb_leads(lead1, lead2) {
        Ok(leads) => leads,
        Err(err) => {
            tracing::error!(%request_id, %err, "limb-lead derivation failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to calculate limb leads." })),
            )
                .into_response();
        }
    };

    match &state.model {
        Some(model) => match model.generate(lead1, lead2) {
            Ok(precordial) => all_leads.merge(precordial),
            Err(err) => {
                tracing::warn!(%request_id, %err, "precordial synthesis failed, responding with limb leads only");
            }
        },
        None => {
            tracing::debug!(%request_id, "no generative model loaded, skipping V1-V6");
        }
    }

    let analysis = analyze_rhythm(&all_leads);
    tracing::info!(%request_id, heart_rate = analysis.heart_rate, "analyze complete");

    Json(json!({
        "status": "success",
        "analysis_results": analysis,
        "ecg_data": all_leads,
    }))
    .into_response()
}

/// `GET /get-record/{name}`: read a stored record pair
pub async fn get_record(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match read_record(&state.record_dir, &name) {
        Ok(leads) => Json(json!({
            "status": "success",
            "record_name": name,
            "leads_data": leads,
        }))
        .into_response(),
        Err(err) => {
            tracing::warn!(record = %name, %err, "record lookup failed");
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "status": "error",
                    "message": format!(
                        "Could not read or find desired leads in record: {}",
                        name
                    ),
                })),
            )
                .into_response()
        }
    }
}
