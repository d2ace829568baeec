//! Configuration loading from environment.

use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "memory://";
const DEFAULT_TABLE_NAME: &str = "PaymentsTable";

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub table_name: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Unset and empty values both fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT {:?}: {}", raw, e))?,
            None => DEFAULT_PORT,
        };

        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let table_name = var("PAYMENTS_TABLE_NAME").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());

        Ok(Self {
            port,
            database_url,
            table_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, "memory://");
        assert_eq!(config.table_name, "PaymentsTable");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite://payments.db?mode=rwc"),
            ("PAYMENTS_TABLE_NAME", "payments_test"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite://payments.db?mode=rwc");
        assert_eq!(config.table_name, "payments_test");
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let config = load(&[("PORT", ""), ("PAYMENTS_TABLE_NAME", " ")]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.table_name, "PaymentsTable");
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("invalid PORT"));
    }
}
