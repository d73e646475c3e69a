use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nb_core::Error;
use serde_json::{json, Value};

const GENERIC_MESSAGE: &str = "An unexpected network or server error occurred.";

/// Handler-boundary wrapper that renders [`Error`] as a JSON error body.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

pub fn error_body(err: &Error) -> Value {
    match err {
        Error::Upstream { status, details, .. } => json!({
            "error": err.to_string(),
            "api_status": status,
            "api_details": details,
        }),
        Error::MalformedAiResponse { raw } => json!({
            "error": err.to_string(),
            "details": raw,
        }),
        Error::InvalidAiResponseShape { details, .. } => json!({
            "error": err.to_string(),
            "details": details,
        }),
        Error::EmptyOrBlockedResponse { block_reason } => json!({
            "error": err.to_string(),
            "blockReason": block_reason,
        }),
        Error::Network(_) | Error::Serialization(_) | Error::Io(_) => json!({
            "error": GENERIC_MESSAGE,
        }),
        _ => json!({ "error": err.to_string() }),
    }
}

/// Log line for a failed request. Raw upstream and model text stays out; the
/// clients log it as a bounded snippet at debug level.
fn log_line(status: StatusCode, err: &Error) -> String {
    format!("{} {}", status, err)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!("❌ {}", log_line(status, &self.0));
        } else {
            tracing::warn!("⚠️ {}", log_line(status, &self.0));
        }
        (status, Json(error_body(&self.0))).into_response()
    }
}
