use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use tracking_domain::{DbConfig, RuntimeConfig};

/// Optional knobs around the listener. Everything here has a default; the
/// database connection does not and lives in [`DbConfig`].
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_host: String,
    pub static_dir: String,
    pub max_body_bytes: u64,
    pub readiness_timeout_seconds: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            static_dir: "./static/js".to_string(),
            max_body_bytes: 1024 * 1024,
            readiness_timeout_seconds: 15,
        }
    }
}

impl ServerSettings {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid server settings file")
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("TRACKING_BIND_HOST") {
            self.bind_host = value;
        }
        if let Some(value) = lookup("TRACKING_STATIC_DIR") {
            self.static_dir = value;
        }
        if let Some(value) = lookup("TRACKING_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Some(value) = lookup("TRACKING_READINESS_TIMEOUT_SECONDS") {
            self.readiness_timeout_seconds = value.parse().unwrap_or(self.readiness_timeout_seconds);
        }
    }

    pub fn normalize(&mut self) {
        self.bind_host = self.bind_host.trim().to_string();
        if self.static_dir.trim().is_empty() {
            self.static_dir = ServerSettings::default().static_dir;
        }
    }

    pub fn bind_addr(&self, port: u16) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_host
            .parse()
            .map_err(|err| anyhow!("invalid bind_host '{}': {}", self.bind_host, err))?;
        Ok(SocketAddr::new(ip, port))
    }

    pub fn validate(&self, port: u16) -> Result<()> {
        self.bind_addr(port)?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.readiness_timeout_seconds == 0 {
            return Err(anyhow!("readiness_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub server: ServerSettings,
    pub database: DbConfig,
}

impl AppConfig {
    /// Reads the required `DATABASE_*` values from the environment and the
    /// optional server settings from `config_path` (or `TRACKING_CONFIG`).
    pub async fn load(port: u16, config_path: Option<&str>) -> Result<Self> {
        let database = load_db_config(|key| env::var(key).ok())?;

        let path = config_path
            .map(ToString::to_string)
            .or_else(|| env::var("TRACKING_CONFIG").ok());
        let mut server = match path {
            Some(path) if Path::new(&path).exists() => {
                let content = fs::read_to_string(&path).await?;
                ServerSettings::from_toml(&content)?
            }
            Some(path) => {
                warn!("{} not found, using default server settings", path);
                ServerSettings::default()
            }
            None => ServerSettings::default(),
        };
        server.apply_overrides(|key| env::var(key).ok());
        server.normalize();
        server.validate(port)?;

        Ok(Self {
            port,
            server,
            database,
        })
    }

    pub fn to_runtime_config(&self) -> Result<RuntimeConfig> {
        Ok(RuntimeConfig {
            bind_addr: self.server.bind_addr(self.port)?.to_string(),
            static_dir: self.server.static_dir.clone(),
            max_body_bytes: self.server.max_body_bytes,
            readiness_timeout_seconds: self.server.readiness_timeout_seconds,
        })
    }

    pub fn to_db_config(&self) -> DbConfig {
        self.database.clone()
    }
}

/// All five connection values are mandatory; an empty value counts as present.
pub fn load_db_config<F>(lookup: F) -> Result<DbConfig>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(DbConfig {
        host: require_value(&lookup, "DATABASE_HOST")?,
        port: require_integer(&lookup, "DATABASE_PORT")?,
        database: require_value(&lookup, "DATABASE_DATABASE")?,
        user: require_value(&lookup, "DATABASE_USER")?,
        password: require_value(&lookup, "DATABASE_PASSWORD")?,
    })
}

fn require_value<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| anyhow!("required environment value {} not present", key))
}

fn require_integer<F>(lookup: &F, key: &str) -> Result<u16>
where
    F: Fn(&str) -> Option<String>,
{
    let value = require_value(lookup, key)?;
    value
        .trim()
        .parse()
        .map_err(|_| anyhow!("required environment value {} is not parsable as integer", key))
}
