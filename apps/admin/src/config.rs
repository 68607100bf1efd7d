use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if a required database variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub db: DatabaseConfig,
    /// Connection URI of the resume document store. `None` leaves uploads and
    /// downloads permanently unavailable.
    pub document_store_url: Option<String>,
    pub port: u16,
    pub static_dir: PathBuf,
    pub reconnect_delay: Duration,
    pub health_check_interval: Duration,
    pub upload_limit_bytes: usize,
    pub rust_log: String,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl: bool,
    pub max_connections: u32,
}

// Hand-written so the password never reaches the logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("ssl", &self.ssl)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let db = DatabaseConfig {
            host: require("DB_HOST")?,
            port: parse_or(&lookup, "DB_PORT", 5432)?,
            user: require("DB_USER")?,
            password: require("DB_PASS")?,
            name: require("DB_NAME")?,
            ssl: parse_flag(lookup("DB_SSL").as_deref()),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
        };

        let document_store_url =
            lookup("DOCUMENT_STORE_URL").filter(|uri| !uri.trim().is_empty());

        Ok(Config {
            db,
            document_store_url,
            port: parse_or(&lookup, "PORT", 3000)?,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("admin_public")),
            reconnect_delay: Duration::from_secs(parse_or(&lookup, "RECONNECT_DELAY_SECS", 5)?),
            health_check_interval: Duration::from_secs(parse_or(
                &lookup,
                "HEALTH_CHECK_INTERVAL_SECS",
                10,
            )?),
            upload_limit_bytes: parse_or(&lookup, "UPLOAD_LIMIT_BYTES", 10 * 1024 * 1024)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "require")
    )
}
