//! JSON body extractor that rejects with the failure envelope

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::error::ApiError;

pub const INVALID_INPUT_FORMAT: &str = "Invalid input format";

/// JSON extractor that accepts any content type
///
/// Unknown fields are ignored and a literal `null` body decodes as the
/// payload's default. Any read or decode failure is rejected with 400
/// "Invalid input format"; the decoder's message only goes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        decode_body(Bytes::from_request(req, state).await).map(Json)
    }
}

/// Decode a body that was extracted as raw bytes
///
/// Handlers that must check the path before the payload take
/// `Result<Bytes, BytesRejection>` and call this afterwards.
pub(crate) fn decode_body<T>(body: Result<Bytes, BytesRejection>) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    let bytes = body.map_err(|e| {
        warn!(error = %e, "Failed to read request body");
        ApiError::bad_request(INVALID_INPUT_FORMAT)
    })?;

    decode(&bytes)
}

fn decode<T: DeserializeOwned + Default>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice::<Option<T>>(bytes)
        .map(Option::unwrap_or_default)
        .map_err(|e| {
            warn!(error = %e, "Failed to decode JSON body");
            ApiError::bad_request(INVALID_INPUT_FORMAT)
        })
}
