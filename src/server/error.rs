use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Every failure a handler can report, classified by what went wrong.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unprocessable: {0}")]
    Unprocessable(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad request",
            ApiError::NotFound(_) => "not found",
            ApiError::Unprocessable(_) => "unprocessable",
            ApiError::Database(_) => "internal server error",
        }
    }

    /// Store failure on a write path, reported to the client as 422.
    pub fn unprocessable_store(error: sqlx::Error) -> Self {
        ApiError::Unprocessable(error.to_string())
    }

    pub fn not_found_store(error: sqlx::Error) -> Self {
        ApiError::NotFound(error.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(err: &ApiError) -> Self {
        Self {
            success: false,
            error: err.status_code().as_u16(),
            message: err.message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(error) => tracing::error!("{error}"),
            other => tracing::warn!("{other}"),
        }
        (self.status_code(), Json(ErrorEnvelope::from(&self))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::NotFound(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".to_owned()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".to_owned()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Unprocessable("x".to_owned()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_follow_the_endpoint() {
        assert_eq!(
            ApiError::unprocessable_store(sqlx::Error::PoolClosed).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::not_found_store(sqlx::Error::PoolClosed).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn envelope_body() {
        let response = ApiError::NotFound("no such page".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": 404, "message": "not found"})
        );
    }
}
