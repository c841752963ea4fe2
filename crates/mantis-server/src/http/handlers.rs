use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mantis_api::{map_error, ApiError, ApiErrorCode};
use mantis_model::{RecordId, ValidationError};
use mantis_store::StoreError;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::error;

/// Error responses carry `{"message": ...}`; the code picks the status.
pub(crate) fn api_error_response(err: &ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(err).status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"message": err.message}))).into_response()
}

/// Store failures fold into the three-bucket taxonomy. Messages pass through
/// verbatim for client errors; backend failures are logged and masked.
pub(crate) fn store_error(err: StoreError) -> ApiError {
    match &err {
        StoreError::NotFound { .. } => ApiError {
            code: ApiErrorCode::NotFound,
            message: err.to_string(),
            details: serde_json::Value::Null,
        },
        StoreError::Duplicate { .. } => ApiError::validation(err.to_string()),
        StoreError::Serialization(_) | StoreError::Backend(_) => {
            error!("store failure: {err}");
            ApiError::internal("internal server error")
        }
    }
}

pub(crate) fn validation_error(err: ValidationError) -> ApiError {
    ApiError::validation(err.to_string())
}

/// Body deserialization failures are client errors; the serde message (missing
/// field, unknown enum variant) is the response message, verbatim.
pub(crate) fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::validation(e.to_string()))
}

pub(crate) fn parse_record_id(raw: &str) -> Result<RecordId, ApiError> {
    RecordId::parse(raw).map_err(|_| ApiError::invalid_param("id", raw))
}

pub(crate) async fn healthz_handler() -> Response {
    Json(json!({"status": "ok"})).into_response()
}
