use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use billhub_core::PortalError;

pub fn portal_error_to_response(err: PortalError) -> axum::response::Response {
    match err {
        PortalError::Unauthorized => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
        }
        PortalError::NotFound => {
            json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found")
        }
        PortalError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        PortalError::ReportGeneration(msg) => {
            json_error(StatusCode::BAD_GATEWAY, "report_error", msg)
        }
        PortalError::Store(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
