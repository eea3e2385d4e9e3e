//! Application layer: services and use cases
//!
//! This layer orchestrates domain and form logic for an editing session.

pub mod document;
pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::DocumentResultExt;
