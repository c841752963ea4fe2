use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    /// Default `limit` for the notification listing when the query omits it.
    pub default_notification_limit: usize,
    pub max_list_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
            default_notification_limit: 50,
            max_list_limit: 500,
        }
    }
}

pub fn validate_startup_config(api: &ApiConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("api size limits must be > 0".to_string());
    }
    if api.default_notification_limit == 0 || api.max_list_limit == 0 {
        return Err("list limits must be > 0".to_string());
    }
    if api.default_notification_limit > api.max_list_limit {
        return Err("default notification limit must not exceed max list limit".to_string());
    }
    Ok(())
}
