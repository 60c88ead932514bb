#![deny(clippy::all)]
#![deny(clippy::pedantic)]
// Allow some overly strict pedantic lints
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

//! Film Library Service
//!
//! JSON HTTP backend for a catalog of films and actors. Catalog data lives in
//! `PostgreSQL`, sessions live in Redis, and every write needs the
//! administrator role.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use application::dto::*;
pub use domain::entities::*;
