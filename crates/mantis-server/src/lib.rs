#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use axum::Router;
use mantis_store::DocumentStore;
use std::sync::Arc;

mod config;
mod http;
mod notify;

pub use config::{validate_startup_config, ApiConfig};

pub const CRATE_NAME: &str = "mantis-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub api: ApiConfig,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_config(store, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<dyn DocumentStore>, api: ApiConfig) -> Self {
        Self { store, api }
    }
}

pub fn build_router(state: AppState) -> Router {
    let max_body = state.api.max_body_bytes;
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route(
            "/api/preventive",
            get(http::preventive::list_handler).post(http::preventive::create_handler),
        )
        .route(
            "/api/preventive/dashboard",
            get(http::preventive::dashboard_handler),
        )
        .route(
            "/api/preventive/{id}",
            get(http::preventive::get_handler)
                .patch(http::preventive::update_handler)
                .delete(http::preventive::delete_handler),
        )
        .route(
            "/api/corrective",
            get(http::corrective::list_handler).post(http::corrective::create_handler),
        )
        .route("/api/corrective/stats", get(http::corrective::stats_handler))
        .route(
            "/api/corrective/equipment/{equipment_id}",
            get(http::corrective::equipment_handler),
        )
        .route(
            "/api/corrective/{id}",
            get(http::corrective::get_handler).patch(http::corrective::update_handler),
        )
        .route(
            "/api/inventory",
            get(http::inventory::list_handler).post(http::inventory::create_handler),
        )
        .route("/api/inventory/reorder", get(http::inventory::reorder_handler))
        .route("/api/inventory/search", get(http::inventory::search_handler))
        .route(
            "/api/inventory/{id}",
            get(http::inventory::get_handler).patch(http::inventory::update_handler),
        )
        .route(
            "/api/inventory/{id}/history",
            get(http::inventory::history_handler),
        )
        .route(
            "/api/notifications",
            get(http::notifications::list_handler).post(http::notifications::create_handler),
        )
        .route(
            "/api/notifications/summary",
            get(http::notifications::summary_handler),
        )
        .route(
            "/api/notifications/unread/{user_id}",
            get(http::notifications::unread_handler),
        )
        .route(
            "/api/notifications/bulk-read",
            post(http::notifications::bulk_read_handler),
        )
        .route(
            "/api/notifications/{id}/read",
            patch(http::notifications::read_handler),
        )
        .route(
            "/api/notifications/{id}/archive",
            patch(http::notifications::archive_handler),
        )
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}

#[cfg(test)]
mod notify_tests;
