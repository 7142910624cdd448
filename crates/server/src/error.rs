use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use stashdb_common::{CommandError, StashError, StorageError};
use stashdb_protocol::ErrorResponse;

/// Erro devolvido pelos handlers; vira status HTTP + corpo JSON.
#[derive(Debug)]
pub struct ApiError(pub StashError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            StashError::Storage(StorageError::AlreadyExists) => StatusCode::CONFLICT,
            StashError::Storage(StorageError::NotFound | StorageError::Expired) => {
                StatusCode::NOT_FOUND
            }
            StashError::Storage(StorageError::EmptyList) => StatusCode::CONFLICT,
            StashError::Command(_) => StatusCode::BAD_REQUEST,
            StashError::Auth(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// Mensagem exposta ao cliente. Expirada e inexistente são
    /// indistinguíveis do lado de fora.
    pub fn message(&self) -> &'static str {
        match &self.0 {
            StashError::Storage(StorageError::AlreadyExists) => "key already exists",
            StashError::Storage(StorageError::NotFound | StorageError::Expired) => "key not found",
            StashError::Storage(StorageError::EmptyList) => "list is empty",
            StashError::Command(CommandError::EmptyKey) => "key cannot be empty",
            StashError::Command(CommandError::EmptyValue) => "value cannot be empty",
            StashError::Command(CommandError::InvalidBody(_)) => "invalid request body",
            StashError::Command(CommandError::InvalidQuery(_)) => "invalid query string",
            StashError::Auth(_) => "unauthorized",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.message()))).into_response()
    }
}

impl<E: Into<StashError>> From<E> for ApiError {
    fn from(e: E) -> Self {
        ApiError(e.into())
    }
}
