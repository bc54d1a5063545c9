//! HTTP error mapping tests
//!
//! The handlers translate the domain error taxonomy into HTTP statuses;
//! these pin that mapping down without needing a running server.

use actix_web::http::StatusCode;

use cloudshortener::errors::ShortenerError;
use cloudshortener::services::error_response;

#[test]
fn test_not_found_and_cache_miss_map_to_404() {
    let response = error_response(&ShortenerError::not_found("x"));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = error_response(&ShortenerError::cache_miss("x"));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_already_exists_maps_to_409() {
    let response = error_response(&ShortenerError::already_exists("x"));
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn test_quota_exceeded_maps_to_429() {
    let response = error_response(&ShortenerError::quota_exceeded("x"));
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[test]
fn test_client_mistakes_map_to_400() {
    let response = error_response(&ShortenerError::validation("x"));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = error_response(&ShortenerError::user_does_not_exist("x"));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_infrastructure_failures_map_to_503() {
    let response = error_response(&ShortenerError::data_store("h:6379/0", "refused"));
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = error_response(&ShortenerError::cache_put("x"));
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = error_response(&ShortenerError::config_fetch("x"));
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
