/*
 * Responsibility
 * - Load settings from the environment (.env supported): listen port, DATABASE_URL,
 *   session secret/lifetime, cookie flags, static dir, pool sizing
 * - Validate them (missing or malformed values fail startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// Cookie and lifetime settings shared by the session layer and CSRF cookie.
#[derive(Clone)]
pub struct SessionSettings {
    pub secret: Vec<u8>,
    pub lifetime: Duration,
    pub secure: bool,
}

impl fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSettings")
            .field("lifetime", &self.lifetime)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub static_dir: PathBuf,
    pub session: SessionSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match std::env::var("PORT") {
            Ok(v) => v.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 4000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(100);

        let db_min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5)
            .min(db_max_connections);

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./ui/static"));

        let secret = std::env::var("SESSION_SECRET")
            .map_err(|_| ConfigError::Missing("SESSION_SECRET"))?
            .into_bytes();
        if secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::Invalid("SESSION_SECRET"));
        }

        let lifetime_hours = std::env::var("SESSION_LIFETIME_HOURS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(12);

        // Plain-http local development needs COOKIE_SECURE=false; TLS is terminated upstream.
        let secure = match std::env::var("COOKIE_SECURE") {
            Ok(v) => parse_bool(&v).ok_or(ConfigError::Invalid("COOKIE_SECURE"))?,
            Err(_) => true,
        };

        Ok(Self {
            addr,
            app_env,
            database_url,
            db_max_connections,
            db_min_connections,
            static_dir,
            session: SessionSettings {
                secret,
                lifetime: Duration::from_secs(lifetime_hours * 60 * 60),
                secure,
            },
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, parse_bool};

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn config_errors_name_the_variable() {
        assert_eq!(
            ConfigError::Missing("DATABASE_URL").to_string(),
            "missing configuration: DATABASE_URL"
        );
        assert_eq!(
            ConfigError::Invalid("SESSION_SECRET").to_string(),
            "invalid configuration: SESSION_SECRET"
        );
    }
}
