use std::io;
use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::{Context, Result};
use serde::Deserialize;

/// Length in bytes of the stored API secret hash.
pub const API_SECRET_HASH_BYTES: usize = 32;
/// Argon2 refuses shorter salts.
pub const API_SECRET_MIN_SALT_BYTES: usize = 8;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir() }
    }
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }

impl StorageConfig {
    pub fn hotels_path(&self) -> PathBuf { self.data_dir.join("hotels.json") }
    pub fn rooms_path(&self) -> PathBuf { self.data_dir.join("rooms.json") }
    pub fn guests_path(&self) -> PathBuf { self.data_dir.join("guests.json") }
    pub fn bookings_path(&self) -> PathBuf { self.data_dir.join("bookings.json") }
}

/// Pre-provisioned API secret, stored only as a hex hash plus hex salt.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecurityConfig {
    #[serde(default)]
    pub api_secret_hash: String,
    #[serde(default)]
    pub api_secret_salt: String,
}

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Read and parse the TOML file at `path`. A missing file yields
/// [`from_env`]; unreadable or malformed files are errors.
pub fn load_or_env(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).with_context(|| format!("parse config {path}")),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(from_env()),
        Err(e) => Err(e).with_context(|| format!("read config {path}")),
    }
}

/// Build a configuration purely from environment variables.
pub fn from_env() -> AppConfig {
    let mut cfg = AppConfig::default();
    if let Ok(host) = std::env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
        cfg.server.worker_threads = Some(w);
    }
    if let Ok(dir) = std::env::var("DATA_DIR") {
        cfg.storage.data_dir = PathBuf::from(dir);
    }
    cfg
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to env-only config
    /// when the file does not exist, then normalize and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_or_env(&config_path())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.security.normalize_from_env();
        self.security.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SecurityConfig {
    pub fn normalize_from_env(&mut self) {
        if self.api_secret_hash.trim().is_empty() {
            if let Ok(v) = std::env::var("API_SECRET_HASH") {
                self.api_secret_hash = v;
            }
        }
        if self.api_secret_salt.trim().is_empty() {
            if let Ok(v) = std::env::var("API_SECRET_SALT") {
                self.api_secret_salt = v;
            }
        }
        self.api_secret_hash = self.api_secret_hash.trim().to_string();
        self.api_secret_salt = self.api_secret_salt.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_secret_hash.is_empty() || self.api_secret_salt.is_empty() {
            return Err(anyhow!(
                "security.api_secret_hash / api_secret_salt are not set; provide them in config.toml or API_SECRET_HASH / API_SECRET_SALT"
            ));
        }
        let hash = hex::decode(&self.api_secret_hash)
            .map_err(|_| anyhow!("security.api_secret_hash must be hexadecimal"))?;
        let salt = hex::decode(&self.api_secret_salt)
            .map_err(|_| anyhow!("security.api_secret_salt must be hexadecimal"))?;
        if hash.len() != API_SECRET_HASH_BYTES {
            return Err(anyhow!(
                "security.api_secret_hash must be {API_SECRET_HASH_BYTES} bytes ({} hex chars), got {} bytes",
                API_SECRET_HASH_BYTES * 2,
                hash.len()
            ));
        }
        if salt.len() < API_SECRET_MIN_SALT_BYTES {
            return Err(anyhow!(
                "security.api_secret_salt must be at least {API_SECRET_MIN_SALT_BYTES} bytes, got {}",
                salt.len()
            ));
        }
        Ok(())
    }
}
