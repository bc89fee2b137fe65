/*
 * Responsibility
 * - Environment / configuration loading (store address, service URLs)
 * - Validation of values (startup fails on invalid ones)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

// Well-known defaults for local development; every deployment overrides
// these through the environment.
const DEFAULT_STORE_URL: &str = "postgres://0.0.0.0:5432/consignments";
const DEFAULT_AUTH_SERVICE_URL: &str = "http://0.0.0.0:50051";
const DEFAULT_VESSEL_SERVICE_URL: &str = "http://0.0.0.0:50052";

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

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    /// Datastore address. Unset means the well-known local default.
    pub store_url: String,

    pub app_env: AppEnv,

    pub auth_service_url: String,
    pub vessel_service_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let store_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_STORE_URL.to_string());

        let app_env = AppEnv::from_env();

        let auth_service_url = std::env::var("AUTH_SERVICE_URL")
            .unwrap_or_else(|_| DEFAULT_AUTH_SERVICE_URL.to_string());

        let vessel_service_url = std::env::var("VESSEL_SERVICE_URL")
            .unwrap_or_else(|_| DEFAULT_VESSEL_SERVICE_URL.to_string());

        Ok(Self {
            addr,
            store_url,
            app_env,
            auth_service_url,
            vessel_service_url,
        })
    }
}
