use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// - server: 服务器地址、端口
/// - redis: Redis 连接与键前缀
/// - quota: 配额与短码生成参数
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub quota: QuotaConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > config.toml > 默认值
    /// ENV 前缀：CS，分隔符：__
    /// 示例：CS__REDIS__URL=redis://cache:6379/0
    pub fn load() -> Self {
        use config::{Config, Environment, File};

        let path = "config.toml";

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("CS")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Redis 配置
///
/// `key_prefix` namespaces every key this instance writes, e.g.
/// "cloudshortener:prod". Leave unset to share the keyspace unprefixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_url")]
    pub url: String,
    #[serde(default)]
    pub key_prefix: Option<String>,
}

/// 配额与短码生成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Monthly hit quota assigned to every new link
    #[serde(default = "default_link_hits_quota")]
    pub link_hits: i64,
    /// Monthly per-user link generation quota
    #[serde(default = "default_user_links_quota")]
    pub user_links: i64,
    #[serde(default = "default_shortcode_length")]
    pub shortcode_length: usize,
    /// Secret salt randomizing the shortcode space. Override in production.
    #[serde(default = "default_shortcode_salt")]
    pub shortcode_salt: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/".to_string()
}

fn default_link_hits_quota() -> i64 {
    10_000
}

fn default_user_links_quota() -> i64 {
    20
}

fn default_shortcode_length() -> usize {
    crate::utils::DEFAULT_SHORTCODE_LENGTH
}

fn default_shortcode_salt() -> String {
    "default_salt".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: None,
        }
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            link_hits: default_link_hits_quota(),
            user_links: default_user_links_quota(),
            shortcode_length: default_shortcode_length(),
            shortcode_salt: default_shortcode_salt(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_quotas() {
        let config = StaticConfig::default();
        assert_eq!(config.quota.link_hits, 10_000);
        assert_eq!(config.quota.user_links, 20);
        assert_eq!(config.quota.shortcode_length, 7);
        assert_eq!(config.redis.key_prefix, None);
    }

    #[test]
    fn test_empty_toml_deserializes_to_defaults() {
        let config: StaticConfig = toml_from_str("");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.redis.url, "redis://127.0.0.1:6379/");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: StaticConfig = toml_from_str("[quota]\nlink_hits = 500\n");
        assert_eq!(config.quota.link_hits, 500);
        assert_eq!(config.quota.user_links, 20);
    }

    fn toml_from_str(raw: &str) -> StaticConfig {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
