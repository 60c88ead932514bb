use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

/// Drives a router one request at a time, sending a fixed session cookie
pub struct TestApp {
    pub router: Router,
    session: Option<String>,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router, session: None }
    }

    pub fn with_session(mut self, session_id: &str) -> Self {
        self.session = Some(session_id.to_string());
        self
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.send(Method::DELETE, path, None).await
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(session) = &self.session {
            builder = builder.header(header::COOKIE, format!("session_id={session}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        TestResponse::new(response).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    async fn new(response: axum::response::Response) -> Self {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Self { status, body }
    }

    /// Envelope `status` must always match the HTTP status
    pub fn assert_envelope(&self, status: StatusCode, message: &str) {
        assert_eq!(self.status, status);
        assert_eq!(self.body["status"], status.as_u16());
        assert_eq!(self.body["message"], message);
    }
}
