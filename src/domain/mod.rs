//! Core domain model: validated entities, value objects, and the storage seams
//! the application layer depends on.

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod value_objects;
