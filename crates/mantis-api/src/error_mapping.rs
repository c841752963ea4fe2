// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
}

/// Three-bucket taxonomy: validation/write errors are the client's fault
/// (400), absent ids are 404, everything else is a 500.
#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    let status_code = match error.code {
        ApiErrorCode::ValidationFailed | ApiErrorCode::InvalidQueryParameter => 400,
        ApiErrorCode::NotFound => 404,
        _ => 500,
    };
    ApiErrorMapping { status_code }
}
