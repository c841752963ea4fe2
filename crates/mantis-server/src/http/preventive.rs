use super::handlers::{
    api_error_response, parse_body, parse_record_id, store_error, validation_error,
};
use crate::notify::{self, NotifyEvent};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Duration, Utc};
use mantis_api::PreventiveDashboard;
use mantis_model::{NewPreventiveTask, PreventiveStatus, PreventiveTaskPatch, RecordId};
use serde_json::json;
use tracing::info;

pub(crate) async fn list_handler(State(state): State<AppState>) -> Response {
    match state.store.list_preventive().await {
        Ok(tasks) => Json(tasks).into_response(),
        Err(e) => api_error_response(&store_error(e)),
    }
}

pub(crate) async fn create_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let input: NewPreventiveTask = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    if let Err(e) = input.validate() {
        return api_error_response(&validation_error(e));
    }

    let now = Utc::now();
    let work_order = format!("PM-{}", now.timestamp_millis());
    let task = input.into_task(RecordId::generate(), work_order, now);
    if let Err(e) = state.store.insert_preventive(task.clone()).await {
        return api_error_response(&store_error(e));
    }
    info!(task = %task.id, work_order = %task.work_order, "preventive task created");

    if let Err(e) = notify::dispatch(state.store.as_ref(), NotifyEvent::PreventiveCreated(&task)).await
    {
        return api_error_response(&store_error(e));
    }
    (StatusCode::CREATED, Json(task)).into_response()
}

pub(crate) async fn get_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_record_id(&id) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    match state.store.get_preventive(id).await {
        Ok(task) => Json(task).into_response(),
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
    let patch: PreventiveTaskPatch = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    if let Err(e) = patch.validate() {
        return api_error_response(&validation_error(e));
    }

    let mut task = match state.store.get_preventive(id).await {
        Ok(v) => v,
        Err(e) => return api_error_response(&store_error(e)),
    };
    patch.apply(&mut task, Utc::now());
    if let Err(e) = state.store.update_preventive(task.clone()).await {
        return api_error_response(&store_error(e));
    }

    // Fires on the incoming patch value: re-patching `completed` fires again.
    if patch.status == Some(PreventiveStatus::Completed) {
        if let Err(e) =
            notify::dispatch(state.store.as_ref(), NotifyEvent::PreventiveCompleted(&task)).await
        {
            return api_error_response(&store_error(e));
        }
    }
    Json(task).into_response()
}

pub(crate) async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_record_id(&id) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    match state.store.delete_preventive(id).await {
        Ok(()) => Json(json!({"message": "task deleted"})).into_response(),
        Err(e) => api_error_response(&store_error(e)),
    }
}

pub(crate) async fn dashboard_handler(State(state): State<AppState>) -> Response {
    let tasks = match state.store.list_preventive().await {
        Ok(v) => v,
        Err(e) => return api_error_response(&store_error(e)),
    };

    let now = Utc::now();
    let horizon = now + Duration::days(7);
    let mut pending = 0;
    let mut in_progress = 0;
    let mut completed = 0;
    for task in &tasks {
        match task.status {
            PreventiveStatus::Pending => pending += 1,
            PreventiveStatus::InProgress => in_progress += 1,
            PreventiveStatus::Completed => completed += 1,
        }
    }
    // The store already returns next_maintenance ascending.
    let upcoming_tasks = tasks
        .into_iter()
        .filter(|t| {
            t.status == PreventiveStatus::Pending
                && t.next_maintenance >= now
                && t.next_maintenance <= horizon
        })
        .collect();

    Json(PreventiveDashboard {
        pending,
        in_progress,
        completed,
        upcoming_tasks,
    })
    .into_response()
}
