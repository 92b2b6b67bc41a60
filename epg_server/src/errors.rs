use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use epg_engine::{traits::ChainReaderError, OrderApiError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("There was an error on the backend of the server. {0}")]
    BackendError(String),
    #[error("The blockchain node could not be reached. {0}")]
    ChainUnavailable(String),
    #[error("The requested resource was not found. {0}")]
    NoRecordFound(String),
    #[error("The requested token is not accepted by this gateway. {0}")]
    UnsupportedToken(String),
    #[error("The requested amount is not valid. {0}")]
    InvalidAmount(String),
    #[error("An IO error happened on the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("An unspecified error happened on the server. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnsupportedToken(_) | Self::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::ChainUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({"error": self.to_string()}))
    }
}

impl From<OrderApiError> for ServerError {
    fn from(e: OrderApiError) -> Self {
        match e {
            OrderApiError::UnsupportedToken(t) => Self::UnsupportedToken(t),
            OrderApiError::InvalidAmount(e) => Self::InvalidAmount(e.to_string()),
            OrderApiError::Store(e) => Self::BackendError(e.to_string()),
        }
    }
}

impl From<ChainReaderError> for ServerError {
    fn from(e: ChainReaderError) -> Self {
        Self::ChainUnavailable(e.to_string())
    }
}
