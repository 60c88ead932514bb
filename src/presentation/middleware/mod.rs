//! Middleware for HTTP request processing
//!
//! Protected routes run `recovery(logging(auth(handler)))`:
//! - Panic recovery
//! - Request logging
//! - Session authentication and admin gate
//! - Application error to envelope conversion

pub mod auth;
pub mod error;
pub mod logging;
pub mod recovery;

pub use auth::{SessionContext, require_session};
pub use error::{AppError, ErrorKind};
pub use logging::{RequestLoggingConfig, logging_middleware};
pub use recovery::recovery_layer;
