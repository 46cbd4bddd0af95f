//! Configuration loading and representation.
//!
//! Settings come from built-in defaults, an optional `jobdesk.toml` in the
//! working directory, and `JOBDESK__*` environment variables (highest priority),
//! e.g. `JOBDESK__SERVER__PORT=9000` or `JOBDESK__DATABASE__URL=postgres://...`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub security: SecuritySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Postgres connection URL. Without one the service runs on the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySettings {
    /// Let every API request through without access checks.
    pub permit_all: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,
    pub json: bool,
}

impl Settings {
    /// Load settings from defaults, `jobdesk.toml` (optional) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(env_source())
    }

    /// Load settings using the given environment source (tests inject their own).
    pub fn load_from(env: Environment) -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::with_name("jobdesk").required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

/// `JOBDESK__SECTION__KEY` environment variables.
pub fn env_source() -> Environment {
    Environment::with_prefix("JOBDESK")
        .separator("__")
        .try_parsing(true)
}

fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.max_connections", 5)?
        .set_default("security.permit_all", true)?
        .set_default("logging.level", "info")?
        .set_default("logging.json", true)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        env_source().source(Some(map))
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let settings = Settings::load_from(env(&[])).unwrap();

        assert_eq!(settings.server.bind_addr(), "0.0.0.0:8080");
        assert!(settings.database.url.is_none());
        assert_eq!(settings.database.max_connections, 5);
        assert!(settings.security.permit_all);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.json);
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::load_from(env(&[
            ("JOBDESK__SERVER__PORT", "9000"),
            ("JOBDESK__DATABASE__URL", "postgres://localhost/jobdesk"),
            ("JOBDESK__SECURITY__PERMIT_ALL", "false"),
            ("JOBDESK__LOGGING__JSON", "false"),
        ]))
        .unwrap();

        assert_eq!(settings.server.port, 9000);
        assert_eq!(
            settings.database.url.as_deref(),
            Some("postgres://localhost/jobdesk")
        );
        assert!(!settings.security.permit_all);
        assert!(!settings.logging.json);
    }
}
