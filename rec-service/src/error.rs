//! Maps [`rec_core::Error`] onto the error body and HTTP status from §6/§7:
//! `{ error, code, details? }`, mirroring the shape of
//! [`rec_core::error::Error::is_recoverable`]/`code`/`retry_after_secs`
//! rather than re-deriving the taxonomy here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rec_core::error::ErrorCode;
use rec_core::Error;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

/// Newtype so handlers can return `Err(ServiceError(e))` and get the right
/// status/body for free via [`IntoResponse`].
pub struct ServiceError(pub Error);

impl From<Error> for ServiceError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let error = self.0;
        let code = error.code();
        let status = StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let retry_after = error.retry_after_secs();

        if matches!(code, ErrorCode::Internal) {
            tracing::error!(%error, "internal error serving request");
        } else {
            tracing::warn!(%error, ?code, "request failed");
        }

        let details = retry_after.map(|retry_after| ErrorDetails { retry_after: Some(retry_after) });
        let body = ErrorBody {
            error: error.to_string(),
            code,
            details,
        };

        (status, Json(body)).into_response()
    }
}
