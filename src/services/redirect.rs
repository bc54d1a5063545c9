use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::ShortenerError;
use crate::services::LinkService;
use crate::services::error_response;

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let code = path.into_inner();

        match service.resolve(&code).await {
            Ok(link) => HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                .insert_header(("Location", link.target))
                .finish(),
            Err(err @ ShortenerError::NotFound(_)) => {
                debug!("Redirect link not found: {}", code);
                HttpResponse::build(StatusCode::NOT_FOUND)
                    .insert_header(("Content-Type", "text/html; charset=utf-8"))
                    .insert_header(("Cache-Control", "public, max-age=60")) // 缓存404
                    .body(err.error_type())
            }
            Err(err) => {
                warn!("Redirect for '{}' failed: {}", code, err);
                error_response(&err)
            }
        }
    }
}
