use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::presentation::response::ApiResponse;

pub const PANIC_MESSAGE: &str = "Internal Server Error";

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

/// Outermost layer of the request chain: a panic anywhere inside becomes a
/// 500 envelope and the connection stays up. The backtrace itself is
/// written by the process panic hook.
pub fn recovery_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_response as PanicHandler)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic_message(panic.as_ref());
    tracing::error!(panic = %detail, "Recovered from panic in request handler");

    ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, PANIC_MESSAGE).into_response()
}

/// Best-effort text of a panic payload
pub fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
