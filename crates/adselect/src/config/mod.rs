use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub evaluator: EvaluatorConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let pool_size = env::var("APP_EVALUATOR_POOL_SIZE")
            .unwrap_or_else(|_| EvaluatorConfig::DEFAULT_POOL_SIZE.to_string())
            .parse::<usize>()
            .ok()
            .filter(|size| *size > 0)
            .ok_or(ConfigError::InvalidPoolSize)?;
        let predicate_timeout_ms = env::var("APP_PREDICATE_TIMEOUT_MS")
            .unwrap_or_else(|_| EvaluatorConfig::DEFAULT_PREDICATE_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or(ConfigError::InvalidPredicateTimeout)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            evaluator: EvaluatorConfig {
                pool_size,
                predicate_timeout: Duration::from_millis(predicate_timeout_ms),
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Sizing and timing of the shared predicate evaluator pool.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Upper bound on concurrently running predicate evaluations across the
    /// whole process, not per request.
    pub pool_size: usize,
    /// Maximum wait for a single predicate before it counts as failed.
    pub predicate_timeout: Duration,
}

impl EvaluatorConfig {
    pub const DEFAULT_POOL_SIZE: usize = 10;
    pub const DEFAULT_PREDICATE_TIMEOUT_MS: u64 = 250;
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            pool_size: Self::DEFAULT_POOL_SIZE,
            predicate_timeout: Duration::from_millis(Self::DEFAULT_PREDICATE_TIMEOUT_MS),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPoolSize,
    InvalidPredicateTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPoolSize => {
                write!(f, "APP_EVALUATOR_POOL_SIZE must be a positive integer")
            }
            ConfigError::InvalidPredicateTimeout => {
                write!(f, "APP_PREDICATE_TIMEOUT_MS must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_EVALUATOR_POOL_SIZE");
        env::remove_var("APP_PREDICATE_TIMEOUT_MS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.evaluator.pool_size, 10);
        assert_eq!(config.evaluator.predicate_timeout, Duration::from_millis(250));
    }

    #[test]
    fn load_reads_evaluator_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_EVALUATOR_POOL_SIZE", "32");
        env::set_var("APP_PREDICATE_TIMEOUT_MS", "1000");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.evaluator.pool_size, 32);
        assert_eq!(config.evaluator.predicate_timeout, Duration::from_secs(1));
        reset_env();
    }

    #[test]
    fn load_rejects_zero_pool_size() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_EVALUATOR_POOL_SIZE", "0");
        let result = AppConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidPoolSize)));
        reset_env();
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }
}
