//! # Response Envelope
//!
//! Every endpoint answers with `{status, msg, data, data2?, code?}`.
//! Handlers build an [`ApiResponse`] and never assemble the JSON shape
//! themselves.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::inventory::{InventoryError, InventoryResult};

/// Write acknowledgement when a record changed
pub const AFFECTED: &str = "Affected";

/// Write acknowledgement when nothing changed
pub const UNAFFECTED: &str = "Unaffected";

/// Wire shape shared by every response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data2: Option<Value>,
}

/// Typed response variants
#[derive(Debug, Clone)]
pub enum ApiResponse {
    Ok(Value),
    /// One page of data plus the total number of matching records
    OkPaged(Value, usize),
    Err(InventoryError),
}

impl ApiResponse {
    /// Serialize `data` into a success response
    pub fn ok<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => ApiResponse::Ok(value),
            Err(e) => ApiResponse::Err(InventoryError::Internal(format!("serialization failed: {}", e))),
        }
    }

    pub fn paged<T: Serialize>(data: &T, total: usize) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => ApiResponse::OkPaged(value, total),
            Err(e) => ApiResponse::Err(InventoryError::Internal(format!("serialization failed: {}", e))),
        }
    }

    /// Acknowledge a write by its affected record count
    pub fn action(result: InventoryResult<usize>) -> Self {
        match result {
            Ok(0) => ApiResponse::Ok(Value::String(UNAFFECTED.to_string())),
            Ok(_) => ApiResponse::Ok(Value::String(AFFECTED.to_string())),
            Err(e) => ApiResponse::Err(e),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiResponse::Ok(_) | ApiResponse::OkPaged(..) => StatusCode::OK,
            ApiResponse::Err(err) => match err {
                InventoryError::InvalidParam { .. } | InventoryError::InvalidBody(_) => {
                    StatusCode::BAD_REQUEST
                }
                InventoryError::NotFound(_) => StatusCode::NOT_FOUND,
                InventoryError::Sync(_) => StatusCode::BAD_GATEWAY,
                InventoryError::Store(_) | InventoryError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            ApiResponse::Ok(data) => Envelope {
                status: "ok".to_string(),
                msg: String::new(),
                code: None,
                data: data.clone(),
                data2: None,
            },
            ApiResponse::OkPaged(data, total) => Envelope {
                status: "ok".to_string(),
                msg: String::new(),
                code: None,
                data: data.clone(),
                data2: Some(Value::from(*total)),
            },
            ApiResponse::Err(err) => Envelope {
                status: "error".to_string(),
                msg: err.to_string(),
                code: Some(err.code().to_string()),
                data: Value::Null,
                data2: None,
            },
        }
    }
}

impl From<InventoryError> for ApiResponse {
    fn from(err: InventoryError) -> Self {
        ApiResponse::Err(err)
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope() {
        let envelope = ApiResponse::ok(&json!([{"name": "web-1"}])).envelope();
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["status"], "ok");
        assert_eq!(value["data"][0]["name"], "web-1");
        assert!(value.get("data2").is_none());
        assert!(value.get("code").is_none());
    }

    #[test]
    fn test_paged_envelope_carries_total() {
        let envelope = ApiResponse::paged(&json!([]), 42).envelope();
        assert_eq!(envelope.data2, Some(json!(42)));
    }

    #[test]
    fn test_error_envelope() {
        let response = ApiResponse::Err(InventoryError::NotFound("alice/x".to_string()));
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let envelope = response.envelope();
        assert_eq!(envelope.status, "error");
        assert_eq!(envelope.code.as_deref(), Some("MACHINE_NOT_FOUND"));
        assert!(envelope.msg.contains("alice/x"));
    }

    #[test]
    fn test_action_envelope() {
        assert_eq!(ApiResponse::action(Ok(1)).envelope().data, json!(AFFECTED));
        assert_eq!(ApiResponse::action(Ok(0)).envelope().data, json!(UNAFFECTED));

        let failed = ApiResponse::action(Err(InventoryError::InvalidBody("x".into())));
        assert_eq!(failed.status_code(), StatusCode::BAD_REQUEST);
    }
}
