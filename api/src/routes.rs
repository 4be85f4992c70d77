// API routes for the inventory service

use std::time::Duration;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::handlers::{assets, exports, health, references, reports, session, users, AppState};

/// Create the API router with all routes, bounded by the configured timeout and body size
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_check))
        // Session and landing pages
        .route("/login", post(session::login))
        .route("/logout", post(session::logout))
        .route("/me", get(session::me))
        .route("/", get(session::home))
        .route("/dashboard", get(session::dashboard_redirect))
        .route("/dashboard/admin", get(reports::admin_dashboard))
        .route("/dashboard/logistics", get(reports::logistics_dashboard))
        .route("/dashboard/read-only", get(reports::read_only_dashboard))
        // Assets and their audit trail
        .route("/assets", get(assets::list_assets).post(assets::create_asset))
        .route("/assets/form-options", get(assets::form_options))
        .route(
            "/assets/{id}",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route("/assets/{id}/history", get(assets::asset_history))
        .route("/assets/{id}/movements", post(assets::register_movement))
        .route("/traceability", get(assets::list_traceability))
        // Reports and exports
        .route("/reports/by-zone", get(reports::zone_report))
        .route("/exports/assets.xlsx", get(exports::export_xlsx))
        .route("/exports/assets.csv", get(exports::export_csv))
        // Reference data
        .route(
            "/zones",
            get(references::list_zones).post(references::create_zone),
        )
        .route(
            "/zones/{id}",
            get(references::get_zone)
                .put(references::update_zone)
                .delete(references::delete_zone),
        )
        .route(
            "/categories",
            get(references::list_categories).post(references::create_category),
        )
        .route(
            "/categories/{id}",
            get(references::get_category)
                .put(references::update_category)
                .delete(references::delete_category),
        )
        .route(
            "/brands",
            get(references::list_brands).post(references::create_brand),
        )
        .route(
            "/brands/{id}",
            put(references::update_brand).delete(references::delete_brand),
        )
        // User administration
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            put(users::update_user).delete(users::delete_user),
        )
        .route("/users/{id}/reset-password", post(users::reset_password))
        .route("/users/{id}/toggle-active", post(users::toggle_active))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .with_state(state)
}
