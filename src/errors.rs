use astra::Response;
use thiserror::Error;

/// Errors originating from request handling (routing, body decoding)
/// or from the model layer while serving a request.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("{0}")]
    Unprocessable(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::BadRequest(_) => 400,
            ServerError::NotFound => 404,
            ServerError::MethodNotAllowed => 405,
            ServerError::PayloadTooLarge => 413,
            ServerError::Unprocessable(_) => 422,
            ServerError::Inference(_) | ServerError::InternalError => 500,
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
