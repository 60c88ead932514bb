//! Uniform `{status, message, payload}` envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "success";

/// Status and message a response was written with.
///
/// Attached to every enveloped response as an extension so the logging
/// middleware can read what the handler reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseOutcome {
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub payload: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(payload: T) -> Self {
        Self { status: StatusCode::OK.as_u16(), message: SUCCESS_MESSAGE.to_string(), payload }
    }
}

impl ApiResponse<String> {
    /// Error envelopes carry an empty string payload
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status: status.as_u16(), message: message.into(), payload: String::new() }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(&self)).into_response();
        response
            .extensions_mut()
            .insert(ResponseOutcome { status: self.status, message: self.message });
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_success_envelope() {
        let response = ApiResponse::success(json!({ "id": 5 })).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.extensions().get::<ResponseOutcome>(),
            Some(&ResponseOutcome { status: 200, message: "success".to_string() })
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "status": 200, "message": "success", "payload": { "id": 5 } }));
    }

    #[tokio::test]
    async fn test_error_envelope_uses_status() {
        let response = ApiResponse::error(StatusCode::FORBIDDEN, "forbidden").into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let outcome = response.extensions().get::<ResponseOutcome>().cloned().unwrap();
        assert_eq!(outcome.status, 403);
        assert_eq!(outcome.message, "forbidden");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["payload"], "");
    }
}
