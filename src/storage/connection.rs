//! Guarded Redis client handle
//!
//! Every store component talks to Redis through [`GuardedRedis`]: a single
//! client handle that is pinged once at construction (fail fast instead of
//! surfacing connectivity lazily on first use) and that translates every
//! low-level `redis::RedisError` into a typed [`ShortenerError::DataStore`]
//! carrying the target endpoint. No retries happen at this layer.

use std::fmt;
use std::sync::Arc;

use redis::aio::MultiplexedConnection;
use redis::{ConnectionAddr, ConnectionInfo};
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::RedisConfig;
use crate::errors::{Result, ShortenerError};

/// Resolved target endpoint, kept for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisEndpoint {
    pub host: String,
    pub port: u16,
    pub db: i64,
}

impl fmt::Display for RedisEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.host, self.port, self.db)
    }
}

impl From<&ConnectionInfo> for RedisEndpoint {
    fn from(info: &ConnectionInfo) -> Self {
        let (host, port) = match info.addr() {
            ConnectionAddr::Tcp(host, port) => (host.clone(), *port),
            ConnectionAddr::TcpTls { host, port, .. } => (host.clone(), *port),
            ConnectionAddr::Unix(path) => (path.display().to_string(), 0),
            _ => (String::new(), 0),
        };
        Self {
            host,
            port,
            db: info.redis_settings().db(),
        }
    }
}

pub struct GuardedRedis {
    client: redis::Client,
    /// 持久化连接，使用 RwLock 保护
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
    endpoint: RedisEndpoint,
}

impl GuardedRedis {
    /// Build a client from the resolved configuration and verify liveness.
    ///
    /// A failed PING here is fatal to store construction.
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            ShortenerError::validation(format!("invalid Redis URL '{}': {}", config.url, e))
        })?;
        let endpoint = RedisEndpoint::from(client.get_connection_info());

        let guarded = Self {
            client,
            connection: Arc::new(RwLock::new(None)),
            endpoint,
        };
        guarded.ping().await?;
        debug!("Redis connection verified at {}", guarded.endpoint);

        Ok(guarded)
    }

    pub fn endpoint(&self) -> &RedisEndpoint {
        &self.endpoint
    }

    /// PING the server through the guarded connection.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let pong: String = self.guard(redis::cmd("PING").query_async(&mut conn).await).await?;
        debug!("Redis PING -> {}", pong);
        Ok(())
    }

    /// 获取或建立持久连接
    pub async fn connection(&self) -> Result<MultiplexedConnection> {
        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        let mut conn_guard = self.connection.write().await;

        // 双重检查，另一个任务可能已经建好连接
        if let Some(ref conn) = *conn_guard {
            return Ok(conn.clone());
        }

        let new_conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| self.translate(e))?;
        *conn_guard = Some(new_conn.clone());
        debug!("Redis connection established and cached");

        Ok(new_conn)
    }

    /// Translate the outcome of a Redis round trip.
    ///
    /// On failure the cached connection is dropped so the next operation
    /// reconnects, and the error surfaces as `DataStore` with the endpoint
    /// attached. The caller decides whether and how to retry.
    pub async fn guard<T>(&self, result: redis::RedisResult<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                self.reset_connection().await;
                Err(self.translate(e))
            }
        }
    }

    /// 重置连接（在连接错误时调用）
    pub(crate) async fn reset_connection(&self) {
        let mut conn_guard = self.connection.write().await;
        *conn_guard = None;
        debug!("Redis connection reset due to error");
    }

    fn translate(&self, err: redis::RedisError) -> ShortenerError {
        ShortenerError::data_store(self.endpoint.to_string(), err.to_string())
    }
}
