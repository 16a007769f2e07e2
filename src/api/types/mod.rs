//! Request and response types shared by the HTTP handlers

pub mod envelope;
pub mod error;
pub mod json;

pub use envelope::{ApiErrorDetail, ApiErrorResponse, ApiResponse, EnvelopeStatus};
pub use error::ApiError;
pub(crate) use json::decode_body;
pub use json::{Json, INVALID_INPUT_FORMAT};
