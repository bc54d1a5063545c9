use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::services::LinkService;
use crate::services::error_response;

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub target: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

fn default_user_id() -> String {
    "anonymous".to_string()
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub shortcode: String,
    pub target: String,
    pub expires_at: Option<DateTime<Utc>>,
}

pub struct ShortenService {}

impl ShortenService {
    pub async fn handle_shorten(
        payload: web::Json<ShortenRequest>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let request = payload.into_inner();

        match service.shorten(&request.target, &request.user_id).await {
            Ok(link) => HttpResponse::Created().json(ShortenResponse {
                shortcode: link.shortcode,
                target: link.target,
                expires_at: link.expires_at,
            }),
            Err(err) => {
                warn!("Shorten request for user '{}' failed: {}", request.user_id, err);
                error_response(&err)
            }
        }
    }
}
