use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Caller lacks the {0} authority")]
    Unauthorized(String),

    #[error("Authority store unavailable: {0}")]
    StoreUnavailable(#[source] anyhow::Error),

    #[error("Invalid token")]
    InvalidToken,
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::StoreUnavailable(anyhow::Error::new(err))
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized(_) => AppError::Forbidden(anyhow::anyhow!("Access denied")),
            ServiceError::StoreUnavailable(_) => AppError::ServiceUnavailable,
            ServiceError::InvalidToken => {
                AppError::Unauthorized(anyhow::anyhow!("Invalid or expired token"))
            }
        }
    }
}
