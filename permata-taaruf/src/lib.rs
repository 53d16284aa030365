use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use permata_shared::clients::db::{DbConn, DbPool};
use permata_shared::errors::{AppError, AppResult, ErrorCode};

pub mod config;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
pub mod taaruf;

use config::AppConfig;
use routes::admin;

pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Check out a pooled connection for the current request.
    pub fn conn(&self) -> AppResult<DbConn> {
        self.db.get().map_err(|e| {
            tracing::error!(error = %e, "database pool exhausted or unreachable");
            AppError::new(ErrorCode::ServiceUnavailable, "database unavailable")
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .route("/participants", get(admin::participants::list_participants))
        .route(
            "/participants/:id",
            get(admin::participants::get_participant).delete(admin::participants::delete_participant),
        )
        .route("/participants/:id/mediators", put(admin::participants::assign_mediator))
        .route("/participants/:id/candidates", get(admin::participants::list_candidates))
        .route(
            "/participants/:id/pairing",
            put(admin::pairing::select_partner).delete(admin::pairing::reset_pairing),
        )
        .route("/participants/:id/pairing/status", put(admin::pairing::set_status))
        .route(
            "/mediators",
            get(admin::mediators::list_mediators).post(admin::mediators::create_mediator),
        )
        .route(
            "/mediators/:id",
            put(admin::mediators::update_mediator).delete(admin::mediators::delete_mediator),
        )
        .route("/stats", get(admin::stats::get_stats));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::health::metrics))
        .route("/me", get(routes::profile::get_own_profile).put(routes::profile::save_biodata))
        .route("/participants", get(routes::participants::list_participants))
        .route("/participants/:id", get(routes::participants::get_participant))
        .route(
            "/participants/:id/interest",
            get(routes::interest::check_interest_state).post(routes::interest::toggle_interest),
        )
        .nest("/admin", admin_routes)
        // Internal service-to-service endpoints (no auth)
        .route("/internal/participants", post(routes::internal::create_participant))
        .layer(middleware::from_fn(permata_shared::middleware::metrics_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
