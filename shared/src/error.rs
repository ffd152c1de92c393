use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    InvalidRequestBody(#[from] JsonRejection),
    // 一意制約違反など、入力値に起因して DB が拒否したもの
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    DuplicateRegistration(String),
    // sqlx::Error を引数にするヴァリアントが複数あるので、[from] は使えず、[source] で代用している
    #[error("Failed to run the transaction.")]
    TransactionError(#[source] sqlx::Error),
    #[error("A database operation failed.")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    TokenEncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid credentials")]
    UnauthenticatedError,
    #[error("Authentication credentials were not provided or are invalid.")]
    UnauthorizedError,
    #[error("{0}")]
    ForbiddenOperation(String),
    #[error("{0}")]
    ConversionEntityError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_)
            | AppError::InvalidRequestBody(_)
            | AppError::InvalidInput(_)
            | AppError::DuplicateRegistration(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ForbiddenOperation(_) => StatusCode::FORBIDDEN,
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::BcryptError(_)
            | AppError::TokenEncodingError(_)
            | AppError::ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let detail = if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status_code, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

// パスの ID が読めないときは、該当するリソースがないものとして 404 を返す
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection, "rejected path parameter");
        AppError::EntityNotFound("Not found.".into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
