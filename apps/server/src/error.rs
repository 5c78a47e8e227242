use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use symbolsync_core::errors::{DatabaseError, Error as CoreError, FieldErrors, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Core(CoreError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Core(CoreError::Database(DatabaseError::UniqueViolation(_))) => {
                StatusCode::CONFLICT
            }
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) | ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let errors = match &self {
            ApiError::Core(CoreError::Validation(ValidationError::Fields(fields))) => {
                Some(fields.clone())
            }
            _ => None,
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
            errors,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn field_errors_are_listed_per_field() {
        let (status, body) = body_of(CoreError::field("Name", "Exchange name is required.").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
        assert_eq!(body["errors"]["Name"][0], "Exchange name is required.");
    }

    #[tokio::test]
    async fn core_errors_map_to_http_statuses() {
        let (status, body) = body_of(CoreError::not_found("Exchange", "Kraken").into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Exchange 'Kraken' was not found");
        assert!(body.get("errors").is_none());

        let unique = CoreError::Database(DatabaseError::UniqueViolation("symbols".into()));
        assert_eq!(body_of(unique.into()).await.0, StatusCode::CONFLICT);

        let market = CoreError::MarketData("HTTP 418".into());
        assert_eq!(
            body_of(market.into()).await.0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
