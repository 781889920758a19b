//! HTTP request handlers for the capacity planner API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{enrich_pis_with_limits, validate_pis};
use crate::config::{ConfigBag, ConfigLoader, ExportOptions, apply_import, build_export};
use crate::error::{PlannerError, PlannerResult};
use crate::models::{EnrichedPi, ProgramIncrement};

use super::request::{EnrichRequest, ImportBundle};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/pis", get(list_pis_handler).post(save_pis_handler))
        .route("/api/capacity", get(capacity_handler))
        .route("/api/enrich", post(enrich_handler))
        .route("/api/config", get(get_config_handler).put(put_config_handler))
        .route("/api/export", post(export_handler))
        .route("/api/import", post(import_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: PlannerError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Unwraps a JSON body or builds the 400 response describing why it was rejected.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(json_response(StatusCode::BAD_REQUEST, error))
}

/// Enriches `pis` and returns both the view and the raw records with
/// recomputed derived fields, ready to persist.
fn rederive(
    pis: &[ProgramIncrement],
    config: &ConfigBag,
    state: &AppState,
) -> (Vec<EnrichedPi>, Vec<ProgramIncrement>) {
    let enriched = enrich_pis_with_limits(pis, config, state.limits());
    let raw = enriched
        .iter()
        .map(EnrichedPi::to_program_increment)
        .collect();
    (enriched, raw)
}

fn persist_config(state: &AppState, config: &ConfigBag) -> PlannerResult<()> {
    match state.config_dir() {
        Some(dir) => ConfigLoader::save(dir, config),
        None => Ok(()),
    }
}

/// Saves the re-derived PIs, then writes `next_config` to the config directory.
///
/// Nothing is written to the config directory unless the PIs saved. A failed
/// config write puts back the previous PIs and config files before the error
/// is returned.
fn commit(
    state: &AppState,
    previous_pis: &[ProgramIncrement],
    next_pis: &[ProgramIncrement],
    previous_config: &ConfigBag,
    next_config: Option<&ConfigBag>,
) -> PlannerResult<()> {
    state.store().save(next_pis)?;
    let Some(next_config) = next_config else {
        return Ok(());
    };

    if let Err(err) = persist_config(state, next_config) {
        if let Err(restore) = state.store().save(previous_pis) {
            warn!(error = %restore, "Could not restore PIs after config write failed");
        }
        if let Err(restore) = persist_config(state, previous_config) {
            warn!(error = %restore, "Could not restore config files after write failed");
        }
        return Err(err);
    }
    Ok(())
}

/// Handler for GET /api/pis.
///
/// Returns the stored PIs as they were last saved.
async fn list_pis_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing PIs");

    match state.store().load() {
        Ok(pis) => json_response(StatusCode::OK, pis),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /api/pis.
///
/// Validates the submitted PIs, recomputes every derived field against the
/// current configuration, replaces the stored PIs and returns the enriched
/// view.
async fn save_pis_handler(
    State(state): State<AppState>,
    payload: Result<Json<Vec<ProgramIncrement>>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Saving PIs");

    let pis = match parse_body(correlation_id, payload) {
        Ok(pis) => pis,
        Err(response) => return response,
    };

    if let Err(err) = validate_pis(&pis, state.limits()) {
        return error_response(correlation_id, err);
    }

    let _edit = state.begin_edit().await;
    let config = state.config().read().await;
    let (enriched, raw) = rederive(&pis, &config, &state);

    match state.store().save(&raw) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                pis = raw.len(),
                "PIs saved"
            );
            json_response(StatusCode::OK, enriched)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /api/capacity.
///
/// Enriches the stored PIs with the current configuration.
async fn capacity_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Computing capacity");

    let pis = match state.store().load() {
        Ok(pis) => pis,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let config = state.config().read().await;
    let enriched = enrich_pis_with_limits(&pis, &config, state.limits());
    info!(
        correlation_id = %correlation_id,
        pis = enriched.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Capacity computed"
    );
    json_response(StatusCode::OK, enriched)
}

/// Handler for POST /api/enrich.
///
/// Enriches the PIs in the request body against the configuration in the
/// request body. Nothing is read from or written to storage.
async fn enrich_handler(
    State(state): State<AppState>,
    payload: Result<Json<EnrichRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing enrich request");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let enriched = enrich_pis_with_limits(&request.pis, &request.config, state.limits());
    info!(
        correlation_id = %correlation_id,
        pis = enriched.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Enrichment completed successfully"
    );
    json_response(StatusCode::OK, enriched)
}

/// Handler for GET /api/config.
async fn get_config_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Reading configuration");

    let config = state.config().read().await.clone();
    json_response(StatusCode::OK, config)
}

/// Handler for PUT /api/config.
///
/// Re-derives the stored PIs against the new configuration bag, saves them,
/// writes the bag to the config directory when one is set and only then
/// replaces the in-memory bag.
async fn put_config_handler(
    State(state): State<AppState>,
    payload: Result<Json<ConfigBag>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Replacing configuration");

    let new_config = match parse_body(correlation_id, payload) {
        Ok(config) => config,
        Err(response) => return response,
    };

    let _edit = state.begin_edit().await;
    let previous = state.config().read().await.clone();
    let result = state.store().load().and_then(|pis| {
        let (_, raw) = rederive(&pis, &new_config, &state);
        commit(&state, &pis, &raw, &previous, Some(&new_config))
    });
    if let Err(err) = result {
        return error_response(correlation_id, err);
    }

    *state.config().write().await = new_config.clone();
    info!(correlation_id = %correlation_id, "Configuration replaced");
    json_response(StatusCode::OK, new_config)
}

/// Handler for POST /api/export.
///
/// Returns one document per selected category, keyed by category.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExportOptions>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Exporting");

    let options = match parse_body(correlation_id, payload) {
        Ok(options) => options,
        Err(response) => return response,
    };

    let pis = match state.store().load() {
        Ok(pis) => pis,
        Err(err) => return error_response(correlation_id, err),
    };
    let config = state.config().read().await;
    let bundle = build_export(&options, &pis, &config);

    info!(
        correlation_id = %correlation_id,
        documents = bundle.len(),
        "Export built"
    );
    json_response(StatusCode::OK, bundle)
}

/// Handler for POST /api/import.
///
/// Applies every document in the bundle that parses. Imported PIs are
/// re-derived before they are stored. Returns the import summary.
async fn import_handler(
    State(state): State<AppState>,
    payload: Result<Json<ImportBundle>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Importing");

    let bundle = match parse_body(correlation_id, payload) {
        Ok(bundle) => bundle,
        Err(response) => return response,
    };
    let files = bundle.into_files();

    let _edit = state.begin_edit().await;
    let stored = match state.store().load() {
        Ok(pis) => pis,
        Err(err) => return error_response(correlation_id, err),
    };
    let previous = state.config().read().await.clone();
    let mut pis = stored.clone();
    let mut config = previous.clone();
    let summary = apply_import(&files, &mut pis, &mut config);

    let saved = if summary.imported_pis() || summary.imported_config() {
        let (_, raw) = rederive(&pis, &config, &state);
        let next_config = summary.imported_config().then_some(&config);
        commit(&state, &stored, &raw, &previous, next_config)
    } else {
        Ok(())
    };
    if let Err(err) = saved {
        return error_response(correlation_id, err);
    }
    *state.config().write().await = config;

    info!(
        correlation_id = %correlation_id,
        imported = summary.imported.len(),
        skipped = summary.skipped.len(),
        "Import applied"
    );
    json_response(StatusCode::OK, summary)
}
