//! JSON envelope for every API response
//!
//! Success: `{"status":"Ok","result":...}` with `result` left out for empty
//! outcomes. Failure: `{"status":"Error","error":"..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::models::Song;
use crate::error::SongLibError;

/// Successful outcome of an API operation
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    Songs(Vec<Song>),
    Verses(Vec<String>),
    Empty,
}

impl IntoResponse for ApiResult {
    fn into_response(self) -> Response {
        let body = match self {
            ApiResult::Songs(songs) => json!({ "status": "Ok", "result": songs }),
            ApiResult::Verses(verses) => json!({ "status": "Ok", "result": verses }),
            ApiResult::Empty => json!({ "status": "Ok" }),
        };

        (StatusCode::OK, Json(body)).into_response()
    }
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request or failed input validation (400)
    #[error("{0}")]
    BadRequest(String),

    /// No song with the requested id (404)
    #[error("{0}")]
    NotFound(String),

    /// Song details service failed (502)
    #[error("{0}")]
    Upstream(String),

    /// Record store or other internal failure (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn song_not_found(id: i64) -> Self {
        ApiError::NotFound(format!("song {} not found", id))
    }
}

impl From<SongLibError> for ApiError {
    fn from(err: SongLibError) -> Self {
        match err {
            _ if err.is_client_error() => {
                warn!("Rejected request: {}", err);
                ApiError::BadRequest(err.to_string())
            }
            SongLibError::Network(_) => {
                error!("Lookup failed: {}", err);
                ApiError::Upstream(err.to_string())
            }
            _ => {
                error!("Request failed: {}", err);
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({ "status": "Error", "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DatabaseError, NetworkError};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_empty_result_omits_payload() {
        let response = ApiResult::Empty.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "Ok" }));
    }

    #[tokio::test]
    async fn test_verses_payload() {
        let response = ApiResult::Verses(vec!["a".to_string(), "b".to_string()]).into_response();
        assert_eq!(body_json(response).await, json!({ "status": "Ok", "result": ["a", "b"] }));
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = ApiError::BadRequest("limit must be int, got 'x'".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "status": "Error", "error": "limit must be int, got 'x'" })
        );
    }

    #[test]
    fn test_status_mapping() {
        let err: ApiError = SongLibError::invalid_filter("id", "abc").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = SongLibError::from(NetworkError::Status { status: 500 }).into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err: ApiError = SongLibError::from(DatabaseError::Corruption).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(ApiError::song_not_found(7).status(), StatusCode::NOT_FOUND);
    }
}
