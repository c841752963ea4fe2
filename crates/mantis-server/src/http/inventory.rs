use super::handlers::{
    api_error_response, parse_body, parse_record_id, store_error, validation_error,
};
use crate::notify;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use mantis_api::{params::parse_inventory_search_params, InventoryHistory};
use mantis_model::{
    InventoryItemPatch, NewInventoryItem, RecordId, RecordKind, RelatedRecord,
};
use mantis_store::NotificationFilter;
use std::collections::BTreeMap;
use tracing::info;

pub(crate) async fn list_handler(State(state): State<AppState>) -> Response {
    match state.store.list_inventory().await {
        Ok(items) => Json(items).into_response(),
        Err(e) => api_error_response(&store_error(e)),
    }
}

pub(crate) async fn create_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let input: NewInventoryItem = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    if let Err(e) = input.validate() {
        return api_error_response(&validation_error(e));
    }

    let item = input.into_item(RecordId::generate(), Utc::now());
    if let Err(e) = state.store.insert_inventory(item.clone()).await {
        return api_error_response(&store_error(e));
    }
    info!(item = %item.id, part_number = %item.part_number, "inventory item created");
    (StatusCode::CREATED, Json(item)).into_response()
}

pub(crate) async fn get_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_record_id(&id) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    match state.store.get_inventory(id).await {
        Ok(item) => Json(item).into_response(),
        Err(e) => api_error_response(&store_error(e)),
    }
}

pub(crate) async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let id = match parse_record_id(&id) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    let patch: InventoryItemPatch = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    if let Err(e) = patch.validate() {
        return api_error_response(&validation_error(e));
    }

    let mut item = match state.store.get_inventory(id).await {
        Ok(v) => v,
        Err(e) => return api_error_response(&store_error(e)),
    };
    patch.apply(&mut item, Utc::now());
    if let Err(e) = state.store.update_inventory(item.clone()).await {
        return api_error_response(&store_error(e));
    }

    // Both threshold checks run against the persisted state; one update can
    // produce two notifications.
    for event in notify::stock_events(&item) {
        if let Err(e) = notify::dispatch(state.store.as_ref(), event).await {
            return api_error_response(&store_error(e));
        }
    }
    Json(item).into_response()
}

pub(crate) async fn reorder_handler(State(state): State<AppState>) -> Response {
    match state.store.list_inventory_reorder().await {
        Ok(items) => Json(items).into_response(),
        Err(e) => api_error_response(&store_error(e)),
    }
}

pub(crate) async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let params = parse_inventory_search_params(&query);
    match state
        .store
        .search_inventory(params.category.as_deref(), params.name.as_deref())
        .await
    {
        Ok(items) => Json(items).into_response(),
        Err(e) => api_error_response(&store_error(e)),
    }
}

pub(crate) async fn history_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_record_id(&id) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    let item = match state.store.get_inventory(id).await {
        Ok(v) => v,
        Err(e) => return api_error_response(&store_error(e)),
    };

    let filter = NotificationFilter::related(RelatedRecord {
        model: RecordKind::Inventory,
        id,
    });
    let alerts = match state.store.list_notifications(&filter, None).await {
        Ok(v) => v,
        Err(e) => return api_error_response(&store_error(e)),
    };
    Json(InventoryHistory { item, alerts }).into_response()
}
