use axum::{extract::State, Json};

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::station::LiveConditions;

/// Get current conditions
///
/// Returns the most recently stored live record. Polls skipped by the clock
/// check are not visible here.
#[utoipa::path(
    get,
    path = "/api/live",
    responses(
        (status = 200, description = "Current conditions", body = LiveConditions),
        (status = 404, description = "No live record stored yet"),
    ),
    tag = "weather"
)]
pub async fn get_live(State(state): State<AppState>) -> AppResult<Json<LiveConditions>> {
    state
        .store
        .current_live()
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No live weather recorded yet".to_string()))
}
