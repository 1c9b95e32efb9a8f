use axum::Json;

use crate::schema::{live_weather_schema, weather_archive_schema, CollectionSchema};

/// Describe the stored collections
///
/// Field types, labels and units for the live and archive collections.
#[utoipa::path(
    get,
    path = "/api/schema",
    responses(
        (status = 200, description = "Collection descriptions", body = Vec<CollectionSchema>),
    ),
    tag = "weather"
)]
pub async fn get_schema() -> Json<Vec<CollectionSchema>> {
    Json(vec![live_weather_schema(), weather_archive_schema()])
}
