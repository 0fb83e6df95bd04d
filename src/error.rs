// HTTP-facing errors. The transformations themselves never fail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
    #[error("unknown time span: {0}")]
    UnknownTimeSpan(String),
    #[error("window of {ticks} ticks exceeds the limit of {max}")]
    WindowTooLarge { ticks: u64, max: u64 },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownMetric(_)
            | ApiError::UnknownTimeSpan(_)
            | ApiError::WindowTooLarge { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        (status, axum::Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
