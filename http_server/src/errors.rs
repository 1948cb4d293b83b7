use actix_web::{
    error,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Only one direction of a pairing could be written. The client should
    /// retry the request.
    #[error("Pairing {0} was left incomplete, retry the request")]
    PartialPairing(String),
    /// Only one direction of a pairing could be deleted. The client should
    /// retry the request.
    #[error("Unpairing {0} was left incomplete, retry the request")]
    PartialUnpairing(String),
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::PartialPairing(_) | ApiError::PartialUnpairing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let err_json = json!({ "error": self.to_string() });
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(err_json)
    }
}
