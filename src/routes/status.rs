use axum::{extract::State, Json};

use crate::common::{AppState, SyncStatus};

/// Get sync status
///
/// Reports the sync phase, the archive watermark and the outcome of the
/// last pass.
#[utoipa::path(
    get,
    path = "/api/sync",
    responses(
        (status = 200, description = "Current sync status", body = SyncStatus),
    ),
    tag = "sync"
)]
pub async fn get_sync_status(State(state): State<AppState>) -> Json<SyncStatus> {
    Json(state.status.read().await.clone())
}
