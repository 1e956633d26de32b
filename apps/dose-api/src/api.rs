//! HTTP handlers for the dose API
//!
//! Every handler is a thin adapter over `dose_schedule`; the schedule file is
//! read fresh on each request.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use dose_schedule::{check_and_reset, due_items, set_status, Schedule, ScheduleError};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

/// Handler: GET|POST /api/v1
pub async fn handle_health() -> &'static str {
    "OK"
}

/// Handler: GET /api/v1/drugs/settings
pub async fn handle_get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Schedule>, ApiError> {
    let schedule = state.store.load().await?;
    debug!("Serving full schedule: {} people", schedule.people.len());
    Ok(Json(schedule))
}

/// Handler: POST /api/v1/drugs/settings
///
/// The body is parsed as JSON regardless of its content type.
pub async fn handle_replace_settings(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let schedule: Schedule = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid schedule: {}", e)))?;
    schedule
        .validate()
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    state.store.save(&schedule).await?;
    info!("Replaced schedule: {} people", schedule.people.len());

    Ok(StatusCode::OK)
}

/// Handler: GET /api/v1/drugs
///
/// Runs the daily reset check before filtering.
pub async fn handle_due(State(state): State<Arc<AppState>>) -> Result<Json<Schedule>, ApiError> {
    check_and_reset(&state.store, state.clock.as_ref()).await?;

    let schedule = state.store.load().await?;
    let due = due_items(&schedule, state.clock.as_ref())?;
    debug!("{} people have items due", due.people.len());

    Ok(Json(due))
}

/// Handler: PUT /api/v1/drugs/:person_name/:drug_name
pub async fn handle_mark_taken(
    State(state): State<Arc<AppState>>,
    Path((person_name, drug_name)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .update(|schedule| {
            if schedule.person(&person_name).is_none() {
                return Err(ScheduleError::PersonNotFound(person_name.clone()));
            }
            Ok(Some(set_status(&schedule, &person_name, &drug_name, true)))
        })
        .await?;

    info!("Marked '{}' complete for '{}'", drug_name, person_name);
    Ok(StatusCode::OK)
}
