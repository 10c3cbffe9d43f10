//! Dipplan Core - Shared data model, normalization, and errors

pub mod errors;
pub mod models;
pub mod normalize;
pub mod sanitize;

pub use errors::{Error, Result};
pub use models::*;
