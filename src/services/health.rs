use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use crate::storage::GuardedRedis;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        redis: web::Data<Arc<GuardedRedis>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let datastore_status =
            match tokio::time::timeout(Duration::from_secs(5), redis.ping()).await {
                Ok(Ok(())) => json!({
                    "status": "healthy",
                    "endpoint": redis.endpoint().to_string(),
                }),
                Ok(Err(e)) => {
                    error!("Datastore health check failed: {}", e);
                    json!({
                        "status": "unhealthy",
                        "error": e.message(),
                        "endpoint": redis.endpoint().to_string(),
                    })
                }
                Err(_) => {
                    error!("Datastore health check timeout");
                    json!({
                        "status": "unhealthy",
                        "error": "timeout",
                        "endpoint": redis.endpoint().to_string(),
                    })
                }
            };

        let now = chrono::Utc::now();
        let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;
        let is_healthy = datastore_status["status"] == "healthy";

        let response_status = if is_healthy {
            actix_web::http::StatusCode::OK
        } else {
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        };

        HttpResponse::build(response_status).json(json!({
            "status": if is_healthy { "healthy" } else { "unhealthy" },
            "timestamp": now.to_rfc3339(),
            "uptime": uptime_seconds,
            "checks": {
                "datastore": datastore_status,
            },
            "response_time_ms": start_time.elapsed().as_millis(),
        }))
    }
}
