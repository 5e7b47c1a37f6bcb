//! Route definitions for the survey API.

pub mod dashboard;
pub mod health;
pub mod surveys;
pub mod taxonomy;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router. Shared by `main` and the tests.
pub fn router(state: AppState) -> Router {
    let cors = match HeaderValue::from_str(&state.config.frontend_url) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(e) => {
            tracing::warn!(
                error = %e,
                frontend_url = %state.config.frontend_url,
                "Invalid FRONTEND_URL, allowing any origin"
            );
            CorsLayer::permissive()
        }
    };

    let survey_routes = Router::new()
        .route(
            "/surveys",
            get(surveys::list)
                .post(surveys::submit)
                .delete(surveys::remove),
        )
        .route("/surveys/export", get(surveys::export_csv));

    let dashboard_routes = Router::new()
        .route("/dashboard/{survey_type}/report", get(dashboard::report))
        .route("/dashboard/{survey_type}/charts", get(dashboard::charts))
        .route("/taxonomy/{survey_type}", get(taxonomy::get));

    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", survey_routes)
        .nest("/api/v1", dashboard_routes)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
