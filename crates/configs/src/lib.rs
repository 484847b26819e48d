use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use anyhow::anyhow;

/// Local-file database used when neither `config.toml` nor `DATABASE_URL` names one.
pub const FALLBACK_DATABASE_URL: &str = "sqlite://companies.db?mode=rwc";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
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
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// `CONFIG_PATH`, or `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` when present, otherwise build from environment variables,
    /// then normalize and validate.
    pub fn load() -> Result<Self> {
        Self::load_from_path_or_env(&config_path())
    }

    /// Only a missing file falls back to the environment; an unreadable or
    /// malformed file is an error.
    pub fn load_from_path_or_env(path: &str) -> Result<Self> {
        let mut cfg = if Path::new(path).exists() {
            load_from_file(path).with_context(|| format!("invalid config file {path}"))?
        } else {
            Self::from_env()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Configuration assembled only from `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`.
    /// The database URL is filled in later by normalization.
    pub fn from_env() -> Self {
        let mut server = ServerConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            server.port = port;
        }
        server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());
        Self { server, database: DatabaseConfig::default() }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        // 归一化 database（支持从环境变量填充 URL，最后回退到本地 SQLite 文件）
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Configuration for the given URL with default pool settings.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }

    pub fn normalize_from_env(&mut self) {
        self.fill_url(std::env::var("DATABASE_URL").ok());
    }

    fn fill_url(&mut self, env_url: Option<String>) {
        // 若 TOML 中未提供 URL，则尝试从环境变量填充
        if self.url.trim().is_empty() {
            self.url = env_url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_DATABASE_URL.to_string());
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.to_lowercase().starts_with("sqlite:")
    }

    pub fn is_in_memory(&self) -> bool {
        self.is_sqlite() && self.url.contains(":memory:")
    }

    /// Filesystem path of a file-backed SQLite database, without query parameters.
    pub fn sqlite_path(&self) -> Option<&str> {
        if !self.is_sqlite() || self.is_in_memory() {
            return None;
        }
        let rest = &self.url["sqlite:".len()..];
        let rest = rest.strip_prefix("//").unwrap_or(rest);
        let path = rest.split('?').next().unwrap_or(rest);
        if path.is_empty() { None } else { Some(path) }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with sqlite:, postgres:// or postgresql://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [database]
            url = "postgres://localhost/companies"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.worker_threads, None);
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.database.acquire_timeout_secs, 30);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn empty_url_prefers_env_then_falls_back_to_sqlite_file() {
        let mut db = DatabaseConfig::default();
        db.fill_url(Some("postgres://db/x".into()));
        assert_eq!(db.url, "postgres://db/x");

        let mut db = DatabaseConfig::default();
        db.fill_url(None);
        assert_eq!(db.url, FALLBACK_DATABASE_URL);
        assert!(db.validate().is_ok());

        let mut db = DatabaseConfig::with_url("sqlite://other.db");
        db.fill_url(Some("postgres://ignored".into()));
        assert_eq!(db.url, "sqlite://other.db");
    }

    #[test]
    fn rejects_unknown_scheme_and_bad_pool() {
        assert!(DatabaseConfig::with_url("mysql://x").validate().is_err());

        let mut db = DatabaseConfig::with_url("sqlite::memory:");
        db.max_connections = 0;
        assert!(db.validate().is_err());
    }

    #[test]
    fn sqlite_path_extraction() {
        assert_eq!(DatabaseConfig::with_url(FALLBACK_DATABASE_URL).sqlite_path(), Some("companies.db"));
        assert_eq!(DatabaseConfig::with_url("sqlite:data/app.db").sqlite_path(), Some("data/app.db"));
        assert_eq!(DatabaseConfig::with_url("sqlite::memory:").sqlite_path(), None);
        assert_eq!(DatabaseConfig::with_url("postgres://h/db").sqlite_path(), None);
        assert!(DatabaseConfig::with_url("sqlite::memory:").is_in_memory());
    }

    fn write_temp_config(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("configs-{}-{}.toml", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn malformed_file_is_an_error_not_a_fallback() {
        // server.host has no default, so this file does not deserialize
        let missing_key = write_temp_config(
            "missing-key",
            "[server]\nport = 9000\n[database]\nurl = \"postgres://prod/db\"\n",
        );
        let res = AppConfig::load_from_path_or_env(missing_key.to_str().unwrap());
        assert!(res.is_err(), "got {res:?}");

        let syntax = write_temp_config("syntax", "[server\nhost = ");
        assert!(AppConfig::load_from_path_or_env(syntax.to_str().unwrap()).is_err());

        std::fs::remove_file(missing_key).unwrap();
        std::fs::remove_file(syntax).unwrap();
    }

    #[test]
    fn valid_file_is_used() {
        let path = write_temp_config(
            "valid",
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\n[database]\nurl = \"postgres://prod/db\"\n",
        );
        let cfg = AppConfig::load_from_path_or_env(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.database.url, "postgres://prod/db");
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_falls_back_to_env_defaults() {
        let path = std::env::temp_dir().join(format!("configs-{}-absent.toml", std::process::id()));
        let cfg = AppConfig::load_from_path_or_env(path.to_str().unwrap()).unwrap();
        assert!(!cfg.database.url.is_empty());
    }

    #[test]
    fn zero_worker_threads_normalized() {
        let mut s = ServerConfig { host: " ".into(), port: 1, worker_threads: Some(0) };
        s.normalize().unwrap();
        assert_eq!(s.host, "127.0.0.1");
        assert_eq!(s.worker_threads, Some(4));
    }
}
