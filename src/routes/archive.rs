use axum::{
    extract::{Query, State},
    http::{
        header::{self, HeaderMap, HeaderValue},
        StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::station::ArchiveRecord;
use crate::store::ArchiveQuery;

const DEFAULT_LIMIT: u64 = 1000;
const MAX_LIMIT: u64 = 50_000;

fn default_format() -> String {
    "json".to_string()
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ArchiveParams {
    /// Start time (optional, ISO 8601, inclusive)
    pub start: Option<DateTime<Utc>>,
    /// End time (optional, ISO 8601, inclusive)
    pub end: Option<DateTime<Utc>>,
    /// Maximum records returned (default 1000, max 50000)
    pub limit: Option<u64>,
    /// Response format: json (default) or csv
    #[serde(default = "default_format")]
    pub format: String,
}

fn determine_format(query_format: &str, headers: &HeaderMap) -> String {
    // Query parameter takes precedence
    if query_format != "json" {
        return query_format.to_lowercase();
    }

    if let Some(accept) = headers.get(header::ACCEPT)
        && let Ok(accept_str) = accept.to_str()
        && accept_str.contains("text/csv")
    {
        return "csv".to_string();
    }

    "json".to_string()
}

fn build_csv_response(records: &[ArchiveRecord]) -> AppResult<Response> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }
    let body = writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"))],
        body,
    )
        .into_response())
}

/// Get archive records
///
/// Returns archived records in ascending time order.
/// Supports JSON and CSV formats.
#[utoipa::path(
    get,
    path = "/api/archive",
    params(ArchiveParams),
    responses(
        (status = 200, description = "Archive records", body = Vec<ArchiveRecord>),
        (status = 400, description = "Invalid query parameters"),
    ),
    tag = "weather"
)]
pub async fn get_archive(
    State(state): State<AppState>,
    Query(params): Query<ArchiveParams>,
    headers: HeaderMap,
) -> AppResult<Response> {
    if let (Some(start), Some(end)) = (params.start, params.end)
        && end < start
    {
        return Err(AppError::BadRequest(
            "end time must not be before start time".to_string(),
        ));
    }

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 || limit > MAX_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {MAX_LIMIT}"
        )));
    }

    let format = determine_format(&params.format, &headers);
    if format != "json" && format != "csv" {
        return Err(AppError::BadRequest(format!("Unsupported format '{format}'")));
    }

    let records = state
        .store
        .archive_range(&ArchiveQuery {
            start: params.start,
            end: params.end,
            limit: Some(limit),
        })
        .await?;

    tracing::debug!(count = records.len(), format = %format, "Serving archive records");

    if format == "csv" {
        build_csv_response(&records)
    } else {
        Ok(Json(records).into_response())
    }
}
