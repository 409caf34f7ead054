//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ADDRESS_MAX_COUNT, DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SESSION_EXPIRY_MINUTES,
};

/// Session cookie settings
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Inactivity expiry in minutes
    pub expiry_minutes: i64,
    /// Mark the cookie `Secure` (HTTPS only)
    pub secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            expiry_minutes: DEFAULT_SESSION_EXPIRY_MINUTES,
            secure: false,
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Maximum number of addresses a user may keep
    pub address_max_count: u64,
    pub session: SessionSettings,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("address_max_count", &self.address_max_count)
            .field("session", &self.session)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            address_max_count: DEFAULT_ADDRESS_MAX_COUNT,
            session: SessionSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
            address_max_count: parse_var("USER_ADDRESS_MAX_COUNT")
                .unwrap_or(DEFAULT_ADDRESS_MAX_COUNT),
            session: SessionSettings {
                expiry_minutes: parse_var("SESSION_EXPIRY_MINUTES")
                    .unwrap_or(DEFAULT_SESSION_EXPIRY_MINUTES),
                secure: parse_var("SESSION_COOKIE_SECURE").unwrap_or(false),
            },
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
