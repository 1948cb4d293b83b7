use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::{DefaultHeaders, NormalizePath};

/// Answers preflight requests from any origin.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET", "POST"])
        .allow_any_header()
        .max_age(3600)
}

/// Browsers on any origin may read every response, with or without an
/// `Origin` header on the request.
pub fn allow_any_origin() -> DefaultHeaders {
    DefaultHeaders::new().add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
}

pub fn normalize_path() -> NormalizePath {
    NormalizePath::trim()
}
