//! Business services and thin HTTP handlers
//!
//! Handlers only translate between HTTP and the domain error taxonomy;
//! every decision lives in the stores and [`LinkService`].

pub mod health;
pub mod link_service;
pub mod redirect;
pub mod shorten;

pub use health::{AppStartTime, HealthService};
pub use link_service::LinkService;
pub use redirect::RedirectService;
pub use shorten::{ShortenRequest, ShortenResponse, ShortenService};

use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;

use crate::errors::ShortenerError;

/// Map a domain error onto an HTTP response.
///
/// Domain errors arrive here verbatim — nothing below the handlers
/// retries or rewrites them.
pub fn error_response(err: &ShortenerError) -> HttpResponse {
    let status = match err {
        ShortenerError::NotFound(_) | ShortenerError::CacheMiss(_) => StatusCode::NOT_FOUND,
        ShortenerError::AlreadyExists(_) => StatusCode::CONFLICT,
        ShortenerError::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
        ShortenerError::UserDoesNotExist(_) | ShortenerError::Validation(_) => {
            StatusCode::BAD_REQUEST
        }
        ShortenerError::DataStore { .. }
        | ShortenerError::CachePut(_)
        | ShortenerError::ConfigFetch(_) => StatusCode::SERVICE_UNAVAILABLE,
        ShortenerError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    HttpResponse::build(status).json(json!({
        "code": err.code(),
        "error": err.error_type(),
        "message": err.message(),
    }))
}
