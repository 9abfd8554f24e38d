//! Configuración de variables de entorno
//!
//! Este módulo lee la configuración del entorno con valores por defecto
//! para desarrollo local. Los números mal formados son un error, no un panic.

use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a valid number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be one of {allowed}, got '{value}'")]
    InvalidChoice {
        key: &'static str,
        allowed: &'static str,
        value: String,
    },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Backend de persistencia
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub storage: StorageBackend,
    pub run_migrations: bool,
    pub session_secret: String,
    pub session_ttl_seconds: u64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    pub here_api_key: Option<String>,
}

const DEV_SESSION_SECRET: &str = "saathi-dev-session-secret";

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración a partir de una función de búsqueda
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = get("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let is_production = environment == "production";

        let storage = match get("STORAGE").as_deref() {
            None | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::InvalidChoice {
                    key: "STORAGE",
                    allowed: "postgres, memory",
                    value: other.to_string(),
                })
            }
        };

        let database_url = get("DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let session_secret = match get("SESSION_SECRET") {
            Some(secret) => secret,
            None if is_production => return Err(ConfigError::Missing("SESSION_SECRET")),
            None => DEV_SESSION_SECRET.to_string(),
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_number("PORT", get("PORT"), 5000)?,
            database_url,
            database_max_connections: parse_number(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                10,
            )?,
            storage,
            run_migrations: get("RUN_MIGRATIONS").map(|v| v != "false").unwrap_or(true),
            session_secret,
            session_ttl_seconds: parse_number("SESSION_TTL_SECONDS", get("SESSION_TTL_SECONDS"), 86_400)?,
            bcrypt_cost: parse_number("BCRYPT_COST", get("BCRYPT_COST"), bcrypt::DEFAULT_COST)?,
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            here_api_key: get("HERE_API_KEY"),
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configuración mínima para tests: store en memoria, sin claves externas
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: None,
            database_max_connections: 1,
            storage: StorageBackend::Memory,
            run_migrations: false,
            session_secret: "test-session-secret".to_string(),
            session_ttl_seconds: 3600,
            bcrypt_cost: 4,
            cors_origins: Vec::new(),
            here_api_key: None,
        }
    }
}

fn parse_number<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value: v }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn memory_storage_needs_no_database() {
        let config = EnvironmentConfig::from_lookup(lookup(&[("STORAGE", "memory")])).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.port, 5000);
        assert_eq!(config.session_ttl_seconds, 86_400);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(config.is_development());
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = EnvironmentConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = EnvironmentConfig::from_lookup(lookup(&[("STORAGE", "memory"), ("PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "PORT", .. }));
    }

    #[test]
    fn production_requires_session_secret() {
        let err = EnvironmentConfig::from_lookup(lookup(&[
            ("STORAGE", "memory"),
            ("ENVIRONMENT", "production"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SESSION_SECRET")));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = EnvironmentConfig::from_lookup(lookup(&[
            ("STORAGE", "memory"),
            ("CORS_ORIGINS", "http://localhost:5173, https://saathi.app ,"),
            ("RUN_MIGRATIONS", "false"),
        ]))
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://localhost:5173", "https://saathi.app"]);
        assert!(!config.run_migrations);
    }
}
