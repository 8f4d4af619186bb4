//! Process configuration, read from the environment once at startup.

use std::net::SocketAddr;
use std::sync::Arc;

use crudkit_auth::{Hs256JwtValidator, JwtValidator};
use crudkit_observability::LogFormat;

const DEV_JWT_SECRET: &str = "dev-secret";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// `None` falls back to an insecure development secret.
    pub jwt_secret: Option<String>,
    pub jwt_audience: Option<String>,
    /// `None` runs on in-memory stores.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl ApiConfig {
    /// Read `BIND_ADDR`, `JWT_SECRET`, `JWT_AUDIENCE`, `DATABASE_URL`,
    /// `DB_MAX_CONNECTIONS` and `LOG_FORMAT`.
    pub fn from_env(default_port: u16) -> Result<Self, ConfigError> {
        Self::from_lookup(default_port, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(default_port: u16, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = match var("BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                reason: format!("{raw:?}: {e}"),
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], default_port)),
        };

        let db_max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "DB_MAX_CONNECTIONS",
                        reason: format!("{raw:?} is not a positive integer"),
                    });
                }
            },
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let log_format = match var("LOG_FORMAT") {
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                var: "LOG_FORMAT",
                reason: format!("{e}"),
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            jwt_secret: var("JWT_SECRET"),
            jwt_audience: var("JWT_AUDIENCE"),
            database_url: var("DATABASE_URL"),
            db_max_connections,
            log_format,
        })
    }

    /// Build the token validator. Call after logging is initialised so the
    /// dev-secret warning is visible.
    pub fn jwt_validator(&self) -> Arc<dyn JwtValidator> {
        let secret = match &self.jwt_secret {
            Some(secret) => secret.as_str(),
            None => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET
            }
        };
        let validator = Hs256JwtValidator::new(secret);
        match &self.jwt_audience {
            Some(audience) => Arc::new(validator.with_audience(audience)),
            None => Arc::new(validator),
        }
    }
}
