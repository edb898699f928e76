use std::str::FromStr;
use std::time::Duration;

use crate::auth::JwtConfig;
use crate::auth::jwt::load_jwt_secret;
use crate::core::ServerError;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 8080 | HTTP listen port |
/// | DATABASE_URL | mem:// | `mem://` or `rocksdb://<path>` |
/// | DATABASE_NAMESPACE | staffing | SurrealDB namespace |
/// | DATABASE_NAME | main | SurrealDB database |
/// | JWT_SECRET | generated (debug only) | Signing secret, at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
/// | JWT_ISSUER | staffing-server | Token issuer |
/// | JWT_AUDIENCE | staffing-clients | Token audience |
/// | ENVIRONMENT | development | development, staging or production |
/// | LOG_LEVEL | info | Used when RUST_LOG is unset |
/// | LOG_DIR | unset | Daily rolling log files when set |
/// | RECONCILE_INTERVAL_SECS | 3600 | Reconciliation period, 0 disables |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | Grace period for background tasks |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub database_url: String,
    pub database_namespace: String,
    pub database_name: String,
    pub jwt: JwtConfig,
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub reconcile_interval_secs: u64,
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = JwtConfig::default();
        let secret = load_jwt_secret(lookup("JWT_SECRET").filter(|s| !s.is_empty()))
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            http_port: parse_or(&lookup, "HTTP_PORT", 8080)?,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "mem://".into()),
            database_namespace: lookup("DATABASE_NAMESPACE").unwrap_or_else(|| "staffing".into()),
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| "main".into()),
            jwt: JwtConfig {
                secret,
                expiration_minutes: parse_or(&lookup, "JWT_EXPIRATION_MINUTES", 1440)?,
                issuer: lookup("JWT_ISSUER").unwrap_or(defaults.issuer),
                audience: lookup("JWT_AUDIENCE").unwrap_or(defaults.audience),
            },
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|s| !s.is_empty()),
            reconcile_interval_secs: parse_or(&lookup, "RECONCILE_INTERVAL_SECS", 3600)?,
            shutdown_timeout_ms: parse_or(&lookup, "SHUTDOWN_TIMEOUT_MS", 10000)?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// `None` when periodic reconciliation is disabled
    pub fn reconcile_interval(&self) -> Option<Duration> {
        (self.reconcile_interval_secs > 0).then(|| Duration::from_secs(self.reconcile_interval_secs))
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

impl Default for Config {
    /// In-memory database, generated secret, reconciliation disabled
    fn default() -> Self {
        Self {
            http_port: 8080,
            database_url: "mem://".into(),
            database_namespace: "staffing".into(),
            database_name: "main".into(),
            jwt: JwtConfig::default(),
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            reconcile_interval_secs: 0,
            shutdown_timeout_ms: 10000,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ServerError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ServerError::Config(format!("{key} has an invalid value: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let secret = "s".repeat(32);
        let config = Config::from_lookup(lookup(&[("JWT_SECRET", secret.as_str())])).unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.database_url, "mem://");
        assert_eq!(config.database_namespace, "staffing");
        assert_eq!(config.jwt.expiration_minutes, 1440);
        assert_eq!(config.reconcile_interval(), Some(Duration::from_secs(3600)));
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let secret = "s".repeat(40);
        let config = Config::from_lookup(lookup(&[
            ("JWT_SECRET", secret.as_str()),
            ("HTTP_PORT", "9000"),
            ("DATABASE_URL", "rocksdb:///var/lib/staffing"),
            ("JWT_ISSUER", "issuer-x"),
            ("RECONCILE_INTERVAL_SECS", "0"),
            ("LOG_DIR", "/tmp/logs"),
        ]))
        .unwrap();
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.database_url, "rocksdb:///var/lib/staffing");
        assert_eq!(config.jwt.issuer, "issuer-x");
        assert_eq!(config.reconcile_interval(), None);
        assert_eq!(config.log_dir.as_deref(), Some("/tmp/logs"));
    }

    #[test]
    fn test_short_secret_rejected() {
        let err = Config::from_lookup(lookup(&[("JWT_SECRET", "short")])).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn test_bad_number_rejected() {
        let secret = "s".repeat(32);
        let err = Config::from_lookup(lookup(&[
            ("JWT_SECRET", secret.as_str()),
            ("HTTP_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("HTTP_PORT"));
    }
}
