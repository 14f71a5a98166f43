use thiserror::Error;

use crate::model::OutgoingResponse;

/// Transport-level failure talking to the weather API.
#[derive(Debug, Error)]
#[error("request to weather API failed")]
pub struct NetworkError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl NetworkError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

/// Everything that can stop a request from producing weather data.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("request body is not a JSON object: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("request body has no `city` field")]
    MissingCity,

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("weather API answered with status {status}")]
    Upstream { status: u16 },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::InvalidJson(_) | HandlerError::MissingCity | HandlerError::Network(_) => {
                400
            }
            HandlerError::Upstream { .. } | HandlerError::Unexpected(_) => 500,
        }
    }

    /// Body returned to the caller. Never carries internal detail.
    pub fn public_message(&self) -> String {
        match self {
            HandlerError::InvalidJson(_) => "Invalid JSON format".to_string(),
            HandlerError::MissingCity => "Missing required parameter: city".to_string(),
            HandlerError::Network(_) => "Network error".to_string(),
            HandlerError::Upstream { status } => format!("Weather Api Error {status}"),
            HandlerError::Unexpected(_) => "An unexpected error occurred".to_string(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, HandlerError::InvalidJson(_) | HandlerError::MissingCity)
    }
}

impl From<HandlerError> for OutgoingResponse {
    fn from(err: HandlerError) -> Self {
        OutgoingResponse::new(err.status_code(), err.public_message())
    }
}
