use serde::Deserialize;
use std::env;
use config::builder::{ConfigBuilder, DefaultState};
use altis_ticketing::RetentionPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Path of the flight catalog text file
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct BusinessRules {
    /// Keep cancelled tickets in the ledger (inactive) instead of dropping them
    #[serde(default)]
    pub retain_cancelled_tickets: bool,
}

impl BusinessRules {
    pub fn retention(&self) -> RetentionPolicy {
        if self.retain_cancelled_tickets {
            RetentionPolicy::Retain
        } else {
            RetentionPolicy::Discard
        }
    }
}

impl Config {
    /// `config/default.toml` carries the port and catalog path; a
    /// `config/{RUN_MODE}` or `config/local` file may override either, and
    /// `ALTIS__CATALOG__PATH=/srv/flights.txt` style variables win over all files.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        Self::build(
            config::Config::builder()
                .add_source(config::File::with_name("config/default"))
                .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
                .add_source(config::File::with_name("config/local").required(false))
                .add_source(config::Environment::with_prefix("ALTIS").separator("__")),
        )
    }

    /// Build from a TOML document, without touching files or the environment
    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        Self::build(
            config::Config::builder().add_source(config::File::from_str(toml, config::FileFormat::Toml)),
        )
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, config::ConfigError> {
        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_toml() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 3000

            [catalog]
            path = "config/flights.txt"

            [business_rules]
            retain_cancelled_tickets = true
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.catalog.path, "config/flights.txt");
        assert_eq!(config.business_rules.retention(), RetentionPolicy::Retain);
    }

    #[test]
    fn test_business_rules_default_to_discard() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 3000

            [catalog]
            path = "flights.txt"
            "#,
        )
        .unwrap();

        assert!(!config.business_rules.retain_cancelled_tickets);
        assert_eq!(config.business_rules.retention(), RetentionPolicy::Discard);
    }

    #[test]
    fn test_missing_catalog_section_fails() {
        assert!(Config::from_toml("[server]\nport = 3000\n").is_err());
    }
}
