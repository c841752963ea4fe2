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
use chrono::Utc;
use mantis_api::CorrectiveStats;
use mantis_model::{CorrectiveStatus, CorrectiveTaskPatch, NewCorrectiveTask, RecordId};
use std::collections::BTreeMap;
use tracing::info;

pub(crate) async fn list_handler(State(state): State<AppState>) -> Response {
    match state.store.list_corrective().await {
        Ok(tasks) => Json(tasks).into_response(),
        Err(e) => api_error_response(&store_error(e)),
    }
}

pub(crate) async fn create_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let input: NewCorrectiveTask = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    if let Err(e) = input.validate() {
        return api_error_response(&validation_error(e));
    }

    let task = input.into_task(RecordId::generate(), Utc::now());
    if let Err(e) = state.store.insert_corrective(task.clone()).await {
        return api_error_response(&store_error(e));
    }
    info!(task = %task.id, equipment = %task.equipment, "fault reported");

    if let Err(e) =
        notify::dispatch(state.store.as_ref(), NotifyEvent::CorrectiveReported(&task)).await
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
    match state.store.get_corrective(id).await {
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
    let patch: CorrectiveTaskPatch = match parse_body(&body) {
        Ok(v) => v,
        Err(e) => return api_error_response(&e),
    };
    if let Err(e) = patch.validate() {
        return api_error_response(&validation_error(e));
    }

    let mut task = match state.store.get_corrective(id).await {
        Ok(v) => v,
        Err(e) => return api_error_response(&store_error(e)),
    };

    let now = Utc::now();
    // Stock decrements run before the task save; there is no atomicity
    // between the two, and a failure here leaves the task untouched.
    if let Some(parts) = &patch.parts_used {
        if let Err(e) = notify::consume_parts(state.store.as_ref(), parts, now).await {
            return api_error_response(&store_error(e));
        }
    }

    patch.apply(&mut task, now);
    if let Err(e) = state.store.update_corrective(task.clone()).await {
        return api_error_response(&store_error(e));
    }

    if patch.status == Some(CorrectiveStatus::Completed) {
        if let Err(e) =
            notify::dispatch(state.store.as_ref(), NotifyEvent::CorrectiveCompleted(&task)).await
        {
            return api_error_response(&store_error(e));
        }
    }
    Json(task).into_response()
}

pub(crate) async fn stats_handler(State(state): State<AppState>) -> Response {
    let tasks = match state.store.list_corrective().await {
        Ok(v) => v,
        Err(e) => return api_error_response(&store_error(e)),
    };

    let mut by_status: BTreeMap<String, u64> = BTreeMap::new();
    let mut by_priority: BTreeMap<String, u64> = BTreeMap::new();
    let mut downtime_total = 0.0;
    for task in &tasks {
        *by_status.entry(task.status.as_str().to_string()).or_insert(0) += 1;
        *by_priority
            .entry(task.priority.as_str().to_string())
            .or_insert(0) += 1;
        downtime_total += task.downtime;
    }
    let total = tasks.len() as u64;
    let average_downtime = if tasks.is_empty() {
        0.0
    } else {
        downtime_total / tasks.len() as f64
    };

    Json(CorrectiveStats {
        total,
        by_status,
        by_priority,
        average_downtime,
    })
    .into_response()
}

pub(crate) async fn equipment_handler(
    State(state): State<AppState>,
    Path(equipment_id): Path<String>,
) -> Response {
    match state.store.list_corrective_by_equipment(&equipment_id).await {
        Ok(tasks) => Json(tasks).into_response(),
        Err(e) => api_error_response(&store_error(e)),
    }
}
