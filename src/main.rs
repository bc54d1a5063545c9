use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing::info;

use cloudshortener::config::init_config;
use cloudshortener::services::{
    AppStartTime, HealthService, LinkService, RedirectService, ShortenService,
};
use cloudshortener::storage::{GuardedRedis, RedisKeySchema, ShortUrlStore, UserQuotaStore};
use cloudshortener::system::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 记录程序启动时间
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    dotenvy::dotenv().ok();
    let config = init_config();
    let _log_guard = init_logging(&config);

    // Redis 不可达时直接退出，而不是等到第一次请求才暴露
    let redis = match GuardedRedis::connect(&config.redis).await {
        Ok(redis) => Arc::new(redis),
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            std::process::exit(1);
        }
    };
    info!("Connected to Redis at {}", redis.endpoint());

    let links = ShortUrlStore::new(
        redis.clone(),
        RedisKeySchema::new(config.redis.key_prefix.clone()),
        config.quota.link_hits,
    );
    let users = UserQuotaStore::new(
        redis.clone(),
        RedisKeySchema::new(config.redis.key_prefix.clone()),
    );
    let link_service = Arc::new(LinkService::new(links, users, config.quota.clone()));

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(redis.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .route("/api/shorten", web::post().to(ShortenService::handle_shorten))
            .route("/health", web::get().to(HealthService::health_check))
            .route("/{code}", web::get().to(RedirectService::handle_redirect))
    })
    .bind(bind_address)?
    .run()
    .await
}
