//! Server settings loaded from the environment (and `.env` when present).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
/// 1 MiB.
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;
pub const DEFAULT_LOG_FILTER: &str = "auto_rest=info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub body_limit_bytes: usize,
    pub log_filter: String,
}

impl ServerConfig {
    /// Reads `AUTO_REST_BIND`, `AUTO_REST_BODY_LIMIT` and `RUST_LOG` after loading `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = lookup("AUTO_REST_BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let bind_addr = bind
            .parse()
            .map_err(|e| ConfigError::Load(format!("AUTO_REST_BIND '{}': {}", bind, e)))?;
        let body_limit_bytes = match lookup("AUTO_REST_BODY_LIMIT") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|e| ConfigError::Load(format!("AUTO_REST_BODY_LIMIT '{}': {}", v, e)))?,
            None => DEFAULT_BODY_LIMIT,
        };
        let log_filter = lookup("RUST_LOG")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.into());
        Ok(Self {
            bind_addr,
            body_limit_bytes,
            log_filter,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            body_limit_bytes: DEFAULT_BODY_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}
