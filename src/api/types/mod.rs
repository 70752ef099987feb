//! Shared API types

pub mod error;

pub use error::{ApiError, ApiErrorResponse, ErrorMessage};
