use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use tracing::{error, warn};

/// HTTP face of [`DomainError`]. Bodies are plain text.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self(DomainError::InvalidInput(detail.into()))
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::InvalidInput(detail) => {
                warn!("Rejected request: {}", detail);
                StatusCode::BAD_REQUEST
            }
            DomainError::StorageUnavailable(detail) => {
                error!("Storage failure: {}", detail);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.0.to_string()).into_response()
    }
}
