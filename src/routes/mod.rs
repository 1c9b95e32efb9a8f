pub mod archive;
pub mod health;
pub mod live;
pub mod schema;
pub mod status;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        live::get_live,
        archive::get_archive,
        status::get_sync_status,
        schema::get_schema,
    ),
    components(
        schemas(
            crate::station::LiveConditions,
            crate::station::ArchiveRecord,
            crate::common::SyncStatus,
            crate::sync::SyncPhase,
            crate::sync::SyncWatermark,
            crate::sync::LiveWrite,
            crate::schema::CollectionSchema,
            crate::schema::FieldDescriptor,
            crate::schema::FieldType,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "weather", description = "Live conditions and archive records"),
        (name = "sync", description = "Station sync status"),
    ),
    info(
        title = "Vantage Sync API",
        description = "Read-only access to weather data synced from a Davis Vantage Pro station",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/live", get(live::get_live))
        .route("/archive", get(archive::get_archive))
        .route("/sync", get(status::get_sync_status))
        .route("/schema", get(schema::get_schema))
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1MB body limit

    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
