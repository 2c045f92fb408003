//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Errores de configuración: valores presentes pero mal formados
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Fuente de variables. En producción es el entorno del proceso; en tests, un mapa.
pub(crate) trait VarSource {
    fn var(&self, name: &str) -> Option<String>;
}

pub(crate) struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }
}

impl VarSource for HashMap<&str, &str> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| v.to_string())
    }
}

pub(crate) fn parse_var<T: FromStr>(
    source: &dyn VarSource,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match source.var(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name,
            expected,
            value: raw,
        }),
        None => Ok(default),
    }
}

fn parse_bool(source: &dyn VarSource, name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match source.var(name) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                name,
                expected: "boolean",
                value: raw,
            }),
        },
        None => Ok(default),
    }
}

/// Backend de persistencia
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub store_backend: StoreBackend,
    pub default_list_limit: i64,
    pub seed_on_startup: bool,
    pub seed_file: PathBuf,
    pub request_timeout: Duration,
    pub cors_origins: Option<Vec<String>>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            store_backend: StoreBackend::Postgres,
            default_list_limit: 100,
            seed_on_startup: false,
            seed_file: PathBuf::from("data/vehicles.json"),
            request_timeout: Duration::from_secs(30),
            cors_origins: None,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&ProcessEnv)
    }

    pub(crate) fn from_source(source: &dyn VarSource) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let default_list_limit: i64 =
            parse_var(source, "DEFAULT_LIST_LIMIT", "positive integer", defaults.default_list_limit)?;
        if default_list_limit < 1 {
            return Err(ConfigError::InvalidValue {
                name: "DEFAULT_LIST_LIMIT",
                expected: "positive integer",
                value: default_list_limit.to_string(),
            });
        }

        let timeout_secs: u64 = parse_var(
            source,
            "REQUEST_TIMEOUT_SECS",
            "number of seconds",
            defaults.request_timeout.as_secs(),
        )?;

        Ok(Self {
            environment: source.var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var(source, "PORT", "port number", defaults.port)?,
            host: source.var("HOST").unwrap_or(defaults.host),
            store_backend: parse_var(
                source,
                "VEHICLE_STORE",
                "store backend (postgres|memory)",
                defaults.store_backend,
            )?,
            default_list_limit,
            seed_on_startup: parse_bool(source, "SEED_ON_STARTUP", defaults.seed_on_startup)?,
            seed_file: source
                .var("SEED_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.seed_file),
            request_timeout: Duration::from_secs(timeout_secs),
            cors_origins: source.var("CORS_ORIGINS").map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let vars: HashMap<&str, &str> = HashMap::new();
        let config = EnvironmentConfig::from_source(&vars).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.default_list_limit, 100);
        assert!(!config.seed_on_startup);
        assert!(config.cors_origins.is_none());
        assert!(config.is_development());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }

    #[test]
    fn test_reads_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORT", "8080"),
            ("VEHICLE_STORE", "memory"),
            ("SEED_ON_STARTUP", "true"),
            ("SEED_FILE", "/tmp/seed.json"),
            ("DEFAULT_LIST_LIMIT", "25"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
        ]);
        let config = EnvironmentConfig::from_source(&vars).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.seed_on_startup);
        assert_eq!(config.seed_file, PathBuf::from("/tmp/seed.json"));
        assert_eq!(config.default_list_limit, 25);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(
            config.cors_origins,
            Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );
    }

    #[test]
    fn test_rejects_malformed_values() {
        let vars: HashMap<&str, &str> = HashMap::from([("PORT", "eighty")]);
        assert!(matches!(
            EnvironmentConfig::from_source(&vars),
            Err(ConfigError::InvalidValue { name: "PORT", .. })
        ));

        let vars: HashMap<&str, &str> = HashMap::from([("SEED_ON_STARTUP", "maybe")]);
        assert!(EnvironmentConfig::from_source(&vars).is_err());

        let vars: HashMap<&str, &str> = HashMap::from([("DEFAULT_LIST_LIMIT", "0")]);
        assert!(EnvironmentConfig::from_source(&vars).is_err());

        let vars: HashMap<&str, &str> = HashMap::from([("VEHICLE_STORE", "mongo")]);
        assert!(EnvironmentConfig::from_source(&vars).is_err());
    }
}
