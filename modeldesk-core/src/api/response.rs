//! The `{code, msg, data}` envelope every JSON endpoint answers with.

use serde::Deserialize;

use super::error::ApiError;

/// `code` value that marks a successful call.
pub const SUCCESS_CODE: i64 = 200;

/// Response envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Server message, or an empty string.
    pub fn message(&self) -> String {
        self.msg.clone().unwrap_or_default()
    }

    /// Fail with `Rejected` unless `code` is the success sentinel.
    pub fn check(self) -> Result<Self, ApiError> {
        if self.code == SUCCESS_CODE {
            Ok(self)
        } else {
            Err(ApiError::Rejected {
                code: self.code,
                msg: self.message(),
            })
        }
    }

    /// Unwrap the payload of a successful response.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.check()?
            .data
            .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
    }
}
