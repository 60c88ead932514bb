use axum::{
    extract::Request,
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use serde_json::{Value, json};
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    time::{Duration, Instant},
};

use crate::infrastructure::config::LoggingConfig;
use crate::presentation::response::ResponseOutcome;

/// Settings for the per-request log line
#[derive(Debug, Clone)]
pub struct RequestLoggingConfig {
    /// Log request headers
    pub log_request_headers: bool,
    /// Headers to exclude from logging (for sensitive data)
    pub excluded_headers: Vec<String>,
    /// Requests slower than this are logged at warn level
    pub slow_request_threshold_ms: u64,
}

impl Default for RequestLoggingConfig {
    fn default() -> Self {
        Self {
            log_request_headers: false,
            excluded_headers: vec![
                "authorization".to_string(),
                "cookie".to_string(),
                "set-cookie".to_string(),
            ],
            slow_request_threshold_ms: 1000,
        }
    }
}

impl From<&LoggingConfig> for RequestLoggingConfig {
    fn from(settings: &LoggingConfig) -> Self {
        Self {
            log_request_headers: settings.log_request_headers,
            slow_request_threshold_ms: settings.slow_request_threshold_ms,
            ..Self::default()
        }
    }
}

impl RequestLoggingConfig {
    fn should_log_header(&self, header_name: &str) -> bool {
        !self.excluded_headers.iter().any(|excluded| header_name.eq_ignore_ascii_case(excluded))
    }

    /// Filter headers for logging
    fn filter_headers(&self, headers: &HeaderMap) -> Value {
        let mut filtered = serde_json::Map::new();

        for (name, value) in headers {
            let name_str = name.as_str();
            if self.should_log_header(name_str) {
                let rendered = value.to_str().map_or_else(|_| json!("<binary>"), |v| json!(v));
                filtered.insert(name_str.to_string(), rendered);
            }
        }

        Value::Object(filtered)
    }

    fn is_slow(&self, elapsed: Duration) -> bool {
        elapsed.as_millis() > u128::from(self.slow_request_threshold_ms)
    }
}

/// Status and message the handler reported, or the zero value if it never
/// produced an envelope
pub fn outcome_of(response: &Response) -> ResponseOutcome {
    response.extensions().get::<ResponseOutcome>().cloned().unwrap_or_default()
}

/// Emits exactly one log line per request once the inner chain has answered
pub fn logging_middleware(
    config: RequestLoggingConfig,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Clone {
    let config = Arc::new(config);
    move |request: Request, next: Next| {
        let config = Arc::clone(&config);
        Box::pin(async move {
            let start_time = Instant::now();

            let method = request.method().clone();
            let path = request.uri().path().to_string();
            let headers =
                config.log_request_headers.then(|| config.filter_headers(request.headers()));

            let response = next.run(request).await;

            let line = RequestLine {
                method: &method,
                path: &path,
                elapsed: start_time.elapsed(),
                http_status: response.status(),
                outcome: outcome_of(&response),
                headers,
            };
            log_request(&config, &line);

            response
        })
    }
}

struct RequestLine<'a> {
    method: &'a Method,
    path: &'a str,
    elapsed: Duration,
    http_status: StatusCode,
    outcome: ResponseOutcome,
    headers: Option<Value>,
}

fn log_request(config: &RequestLoggingConfig, line: &RequestLine<'_>) {
    let headers = line.headers.as_ref().map(ToString::to_string).unwrap_or_default();
    let elapsed_ms = u64::try_from(line.elapsed.as_millis()).unwrap_or(u64::MAX);

    macro_rules! emit {
        ($level:ident) => {
            tracing::$level!(
                target: "http_requests",
                method = line.method.as_str(),
                path = line.path,
                elapsed_ms,
                status = line.outcome.status,
                response_message = line.outcome.message.as_str(),
                headers = headers.as_str(),
                "Request handled"
            )
        };
    }

    if line.http_status.is_server_error() {
        emit!(error);
    } else if line.http_status.is_client_error() || config.is_slow(line.elapsed) {
        emit!(warn);
    } else {
        emit!(info);
    }
}
