#![forbid(unsafe_code)]

mod dto;
mod error_mapping;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub use dto::{
    BulkReadOutcome, CorrectiveStats, InventoryHistory, NotificationSummary, PreventiveDashboard,
};
pub use error_mapping::map_error;

pub const CRATE_NAME: &str = "mantis-api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    InvalidQueryParameter,
    NotFound,
    Internal,
}

/// Wire error. Responses carry `{"message": ...}` (the client contract);
/// `code` selects the HTTP status and `details` feeds the request log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    /// Client error for a rejected write. The message is passed through
    /// verbatim from the validation or store layer.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::ValidationFailed,
            message: message.into(),
            details: Value::Null,
        }
    }

    #[must_use]
    pub fn invalid_param(name: &str, value: &str) -> Self {
        Self {
            code: ApiErrorCode::InvalidQueryParameter,
            message: format!("invalid query parameter: {name}"),
            details: json!({"parameter": name, "value": value}),
        }
    }

    #[must_use]
    pub fn not_found(what: &str) -> Self {
        Self {
            code: ApiErrorCode::NotFound,
            message: format!("{what} not found"),
            details: Value::Null,
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::Internal,
            message: message.into(),
            details: Value::Null,
        }
    }
}

pub mod params {
    use super::ApiError;
    use mantis_model::{NotificationStatus, NotificationType};
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct NotificationListParams {
        pub status: Option<NotificationStatus>,
        pub kind: Option<NotificationType>,
        pub recipient: Option<String>,
        pub limit: usize,
    }

    fn parse_status(raw: &str) -> Result<NotificationStatus, ApiError> {
        match raw {
            "unread" => Ok(NotificationStatus::Unread),
            "read" => Ok(NotificationStatus::Read),
            "archived" => Ok(NotificationStatus::Archived),
            _ => Err(ApiError::invalid_param("status", raw)),
        }
    }

    fn parse_type(raw: &str) -> Result<NotificationType, ApiError> {
        match raw {
            "preventive" => Ok(NotificationType::Preventive),
            "corrective" => Ok(NotificationType::Corrective),
            "inventory" => Ok(NotificationType::Inventory),
            "system" => Ok(NotificationType::System),
            _ => Err(ApiError::invalid_param("type", raw)),
        }
    }

    pub fn parse_notification_list_params(
        query: &BTreeMap<String, String>,
        default_limit: usize,
        max_limit: usize,
    ) -> Result<NotificationListParams, ApiError> {
        let status = query.get("status").map(|s| parse_status(s)).transpose()?;
        let kind = query.get("type").map(|s| parse_type(s)).transpose()?;

        let limit = if let Some(raw) = query.get("limit") {
            let value = raw
                .parse::<usize>()
                .map_err(|_| ApiError::invalid_param("limit", raw))?;
            if value == 0 || value > max_limit {
                return Err(ApiError::invalid_param("limit", raw));
            }
            value
        } else {
            default_limit
        };

        Ok(NotificationListParams {
            status,
            kind,
            recipient: query.get("recipient").cloned(),
            limit,
        })
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct InventorySearchParams {
        pub category: Option<String>,
        pub name: Option<String>,
    }

    pub fn parse_inventory_search_params(
        query: &BTreeMap<String, String>,
    ) -> InventorySearchParams {
        InventorySearchParams {
            category: query.get("category").cloned().filter(|s| !s.is_empty()),
            name: query.get("name").cloned().filter(|s| !s.is_empty()),
        }
    }
}
