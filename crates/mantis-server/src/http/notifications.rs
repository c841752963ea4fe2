use super::handlers::{
    api_error_response, parse_body, parse_record_id, store_error, validation_error,
};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use mantis_api::{
    params::parse_notification_list_params, ApiError, BulkReadOutcome, NotificationSummary,
};
use mantis_model::{NewNotification, NotificationPriority, NotificationStatus, RecordId};
use mantis_store::{NotificationFilter, StoreError};
use serde::Deserialize;
use std::collections::BTreeMap;

pub(crate) async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let params = match parse_notification_list_params(
        &query,
        state.api.default_notification_limit,
        state.api.max_list_limit,
    ) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };

    let filter = NotificationFilter {
        status: params.status,
        kind: params.kind,
        recipient: params.recipient,
        related: None,
    };
    match state
        .store
        .list_notifications(&filter, Some(params.limit))
        .await
    {
        Ok(list) => Json(list).into_response(),
        Err(e) => api_error_response(&store_error(e)),
    }
}

pub(crate) async fn create_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let input: NewNotification = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    if let Err(e) = input.validate() {
        return api_error_response(&validation_error(e));
    }

    let notification = input.into_notification(RecordId::generate(), Utc::now());
    if let Err(e) = state.store.insert_notification(notification.clone()).await {
        return api_error_response(&store_error(e));
    }
    (StatusCode::CREATED, Json(notification)).into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadRequest {
    user_id: String,
}

pub(crate) async fn read_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let id = match parse_record_id(&id) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    let request: ReadRequest = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };

    let mut notification = match state.store.get_notification(id).await {
        Ok(v) => v,
        Err(e) => return api_error_response(&store_error(e)),
    };
    notification.mark_read(&request.user_id, Utc::now());
    if let Err(e) = state.store.update_notification(notification.clone()).await {
        return api_error_response(&store_error(e));
    }
    Json(notification).into_response()
}

pub(crate) async fn archive_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_record_id(&id) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    let mut notification = match state.store.get_notification(id).await {
        Ok(v) => v,
        Err(e) => return api_error_response(&store_error(e)),
    };
    notification.archive(Utc::now());
    if let Err(e) = state.store.update_notification(notification.clone()).await {
        return api_error_response(&store_error(e));
    }
    Json(notification).into_response()
}

pub(crate) async fn unread_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Response {
    let filter = NotificationFilter::unread_for(&user_id);
    match state.store.list_notifications(&filter, None).await {
        Ok(list) => Json(list).into_response(),
        Err(e) => api_error_response(&store_error(e)),
    }
}

pub(crate) async fn summary_handler(State(state): State<AppState>) -> Response {
    let all = match state
        .store
        .list_notifications(&NotificationFilter::default(), None)
        .await
    {
        Ok(v) => v,
        Err(e) => return api_error_response(&store_error(e)),
    };

    let mut unread = 0;
    let mut urgent = 0;
    let mut by_type: BTreeMap<String, u64> = BTreeMap::new();
    for n in &all {
        if n.status == NotificationStatus::Unread {
            unread += 1;
            if n.priority == NotificationPriority::Urgent {
                urgent += 1;
            }
        }
        *by_type.entry(n.kind.as_str().to_string()).or_insert(0) += 1;
    }

    Json(NotificationSummary {
        unread,
        urgent,
        by_type,
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkReadRequest {
    notification_ids: Vec<String>,
    user_id: String,
}

pub(crate) async fn bulk_read_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request: BulkReadRequest = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };

    let mut ids = Vec::with_capacity(request.notification_ids.len());
    for raw in &request.notification_ids {
        match parse_record_id(raw) {
            Ok(id) => ids.push(id),
            Err(_) => {
                return api_error_response(&ApiError::invalid_param("notificationIds", raw))
            }
        }
    }

    let now = Utc::now();
    let mut updated = 0;
    for id in ids {
        // Absent ids are skipped; the count reports actual matches only.
        let mut notification = match state.store.get_notification(id).await {
            Ok(v) => v,
            Err(StoreError::NotFound { .. }) => continue,
            Err(e) => return api_error_response(&store_error(e)),
        };
        notification.mark_read(&request.user_id, now);
        if let Err(e) = state.store.update_notification(notification).await {
            return api_error_response(&store_error(e));
        }
        updated += 1;
    }
    Json(BulkReadOutcome { updated }).into_response()
}
