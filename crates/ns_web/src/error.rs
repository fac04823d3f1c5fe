use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;
use ns_core::Error;

pub enum ApiError {
    BadRequest(String),
    Core(Error),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError::Core(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(e) => match e {
                Error::InvalidUrl(_) => StatusCode::BAD_REQUEST,
                Error::Pdf(_) => StatusCode::UNPROCESSABLE_ENTITY,
                Error::Extraction(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(message) => message,
            ApiError::Core(e) => e.to_string(),
        };
        if status.is_server_error() {
            error!("❌ {}", message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
