//! Application configuration.
//!
//! Configuration is read from environment variables with sensible defaults.
//! The database connection string itself is resolved separately (secrets
//! file first, then environment) by the connection provider.

use std::path::PathBuf;
use std::str::FromStr;

/// Default schema naming prefix for experiment namespaces.
pub const DEFAULT_SCHEMA_PREFIX: &str = "kdm";

/// Application configuration shared by all components.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Service name used in logs and response metadata.
    pub service_name: String,

    /// Bind host for the HTTP server.
    pub host: String,

    /// Bind port for the HTTP server.
    pub port: u16,

    /// Path to the TOML secrets file holding `DATABASE_URL`.
    pub secrets_path: PathBuf,

    /// Prefix that experiment schemas must carry (case-sensitive).
    pub schema_prefix: String,

    /// Baseline number of pooled connections kept open.
    pub pool_size: u32,

    /// Additional connections allowed under burst load.
    pub pool_max_overflow: u32,

    /// Connections older than this many seconds are recycled.
    pub pool_recycle_secs: u64,

    /// Timeout for acquiring a connection from the pool.
    pub acquire_timeout_secs: u64,
}

impl AppConfig {
    /// Loads configuration from the environment for the given service.
    pub fn load_with_service(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            host: env_or("SERVER_HOST", "0.0.0.0".to_string()),
            port: env_or("SERVER_PORT", 8080),
            secrets_path: PathBuf::from(env_or(
                "SECRETS_FILE",
                "secrets.toml".to_string(),
            )),
            schema_prefix: env_or("SCHEMA_PREFIX", DEFAULT_SCHEMA_PREFIX.to_string()),
            pool_size: env_or("DB_POOL_SIZE", 3),
            pool_max_overflow: env_or("DB_POOL_MAX_OVERFLOW", 5),
            pool_recycle_secs: env_or("DB_POOL_RECYCLE_SECS", 300),
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 30),
        }
    }

    /// Hard ceiling of the connection pool (baseline + overflow).
    pub fn max_connections(&self) -> u32 {
        self.pool_size + self.pool_max_overflow
    }

    /// Resolves the database connection string.
    ///
    /// Priority: `DATABASE_URL` key in the secrets file, then the
    /// `DATABASE_URL` environment variable. A missing, unreadable or
    /// malformed secrets file counts as "absent", never as an error.
    pub fn database_url(&self) -> Option<String> {
        if let Some(url) = read_secret(&self.secrets_path, "DATABASE_URL") {
            if !url.is_empty() {
                return Some(url);
            }
        }
        std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty())
    }
}

/// Best-effort read of a string key from a TOML secrets file.
fn read_secret(path: &std::path::Path, key: &str) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let parsed: toml::Value = content.parse().ok()?;
    parsed.get(key)?.as_str().map(str::to_string)
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_apply_when_env_is_empty() {
        std::env::remove_var("DB_POOL_SIZE");
        std::env::remove_var("SCHEMA_PREFIX");

        let config = AppConfig::load_with_service("dashboard-service");
        assert_eq!(config.service_name, "dashboard-service");
        assert_eq!(config.schema_prefix, "kdm");
        assert_eq!(config.pool_size, 3);
        assert_eq!(config.pool_max_overflow, 5);
        assert_eq!(config.pool_recycle_secs, 300);
        assert_eq!(config.max_connections(), 8);
    }

    #[test]
    #[serial]
    fn env_overrides_are_honored() {
        std::env::set_var("DB_POOL_SIZE", "4");
        std::env::set_var("SCHEMA_PREFIX", "exp");

        let config = AppConfig::load_with_service("dashboard-service");
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.schema_prefix, "exp");

        std::env::remove_var("DB_POOL_SIZE");
        std::env::remove_var("SCHEMA_PREFIX");
    }

    #[test]
    #[serial]
    fn unparseable_values_fall_back_to_defaults() {
        std::env::set_var("DB_POOL_SIZE", "not-a-number");

        let config = AppConfig::load_with_service("dashboard-service");
        assert_eq!(config.pool_size, 3);

        std::env::remove_var("DB_POOL_SIZE");
    }

    fn config_with_secrets(path: std::path::PathBuf) -> AppConfig {
        let mut config = AppConfig::load_with_service("dashboard-service");
        config.secrets_path = path;
        config
    }

    #[test]
    #[serial]
    fn database_url_prefers_secrets_file_over_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(
            &path,
            "DATABASE_URL = \"postgres://secret@db/kdm\"\n",
        )
        .unwrap();
        std::env::set_var("DATABASE_URL", "postgres://env@db/kdm");

        let config = config_with_secrets(path);
        assert_eq!(
            config.database_url().as_deref(),
            Some("postgres://secret@db/kdm")
        );

        std::env::remove_var("DATABASE_URL");
    }

    #[test]
    #[serial]
    fn database_url_falls_back_to_env() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("DATABASE_URL", "postgres://env@db/kdm");

        let config = config_with_secrets(dir.path().join("missing.toml"));
        assert_eq!(
            config.database_url().as_deref(),
            Some("postgres://env@db/kdm")
        );

        std::env::remove_var("DATABASE_URL");
    }

    #[test]
    #[serial]
    fn malformed_secrets_file_counts_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(&path, "not [valid toml").unwrap();
        std::env::remove_var("DATABASE_URL");

        let config = config_with_secrets(path);
        assert_eq!(config.database_url(), None);
    }

    #[test]
    #[serial]
    fn empty_values_count_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(&path, "DATABASE_URL = \"\"\n").unwrap();
        std::env::remove_var("DATABASE_URL");

        let config = config_with_secrets(path);
        assert_eq!(config.database_url(), None);
    }
}
