//! Process configuration from environment variables (optionally seeded from a `.env` file).

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Full Postgres URL. When set, the `DB_*` pieces are ignored.
    pub database_url: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: Option<String>,
    pub db_name: String,
    pub max_connections: u32,
    pub listen_addr: String,
    pub port: u16,
    pub auto_migrate: bool,
    pub seed_demo: bool,
    /// Serve from an in-process store loaded with demo data instead of Postgres.
    pub in_memory: bool,
    /// Browser origin allowed by CORS. `None` allows any origin.
    pub cors_origin: Option<String>,
    pub body_limit_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: None,
            db_host: "localhost".into(),
            db_port: 5432,
            db_user: "postgres".into(),
            db_password: None,
            db_name: "stockroom".into(),
            max_connections: 5,
            listen_addr: "0.0.0.0".into(),
            port: 5050,
            auto_migrate: true,
            seed_demo: false,
            in_memory: false,
            cors_origin: None,
            body_limit_bytes: 64 * 1024,
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| vars.get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let d = AppConfig::default();
        Ok(AppConfig {
            database_url: get("DATABASE_URL"),
            db_host: get("DB_HOST").unwrap_or(d.db_host),
            db_port: parse_or("DB_PORT", get("DB_PORT"), d.db_port)?,
            db_user: get("DB_USER").unwrap_or(d.db_user),
            db_password: get("DB_PASSWORD"),
            db_name: get("DB_NAME").unwrap_or(d.db_name),
            max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), d.max_connections)?,
            listen_addr: get("LISTEN_ADDR").unwrap_or(d.listen_addr),
            port: parse_or("PORT", get("PORT"), d.port)?,
            auto_migrate: parse_bool("AUTO_MIGRATE", get("AUTO_MIGRATE"), d.auto_migrate)?,
            seed_demo: parse_bool("SEED_DEMO", get("SEED_DEMO"), d.seed_demo)?,
            in_memory: parse_bool("IN_MEMORY", get("IN_MEMORY"), d.in_memory)?,
            cors_origin: get("CORS_ORIGIN"),
            body_limit_bytes: parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), d.body_limit_bytes)?,
        })
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.database_url {
            return PgConnectOptions::from_str(url).map_err(|e| ConfigError::DatabaseUrl(e.to_string()));
        }
        let mut opts = PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .database(&self.db_name);
        if let Some(password) = &self.db_password {
            opts = opts.password(password);
        }
        Ok(opts)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.listen_addr, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            key: "LISTEN_ADDR",
            value: raw,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_bool(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let lowered = raw.as_deref().map(str::to_ascii_lowercase);
    match lowered.as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            key,
            value: raw.unwrap_or_default(),
        }),
    }
}
