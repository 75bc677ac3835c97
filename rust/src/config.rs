//! Runtime configuration
//!
//! Read from environment variables, with a `.env` file picked up by
//! [`ReportConfig::from_env`] when present.

use std::path::PathBuf;

use crate::aggregator::BatchPolicy;
use crate::error::ConfigError;
use crate::routing::RoutingTable;
use crate::source::UNASSIGNED_COLLECTION;

pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost:5432/sfwb";
pub const DEFAULT_SCHEMA: &str = "sfwb";
pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_APP_ENV: &str = "dev";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_DIR: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub database_url: String,
    /// Postgres schema holding the case collections
    pub schema: String,
    pub http_port: u16,
    /// `production` turns console logging off
    pub app_env: String,
    /// Fallback filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Directory for `combined.log` and `error.log`
    pub log_dir: PathBuf,
    pub collection: String,
    pub routing_table_path: Option<PathBuf>,
    /// Serve collections from JSON files in this directory instead of Postgres
    pub json_dir: Option<PathBuf>,
    pub batch_policy: BatchPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            app_env: DEFAULT_APP_ENV.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            collection: UNASSIGNED_COLLECTION.to_string(),
            routing_table_path: None,
            json_dir: None,
            batch_policy: BatchPolicy::default(),
        }
    }
}

impl ReportConfig {
    /// Load from the process environment (and `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let http_port = match get("HTTP_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "HTTP_PORT".to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.http_port,
        };

        let batch_policy = match get("BATCH_POLICY") {
            Some(raw) => raw.parse::<BatchPolicy>()?,
            None => defaults.batch_policy,
        };

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            schema: get("CASE_DB_SCHEMA").unwrap_or(defaults.schema),
            http_port,
            app_env: get("APP_ENV").unwrap_or(defaults.app_env),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: get("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            collection: get("CASE_COLLECTION").unwrap_or(defaults.collection),
            routing_table_path: get("ROUTING_TABLE_PATH").map(PathBuf::from),
            json_dir: get("CASE_JSON_DIR").map(PathBuf::from),
            batch_policy,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// The override table when configured, the built-in one otherwise.
    pub fn load_routing_table(&self) -> Result<RoutingTable, ConfigError> {
        match &self.routing_table_path {
            Some(path) => RoutingTable::from_yaml_file(path),
            None => Ok(RoutingTable::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ReportConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ReportConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.collection, "unassigned");
        assert!(!config.is_production());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgresql://db:5432/cases"),
            ("CASE_DB_SCHEMA", "support"),
            ("HTTP_PORT", "8080"),
            ("APP_ENV", "production"),
            ("LOG_LEVEL", "debug"),
            ("BATCH_POLICY", "skip"),
            ("CASE_JSON_DIR", "/var/lib/cases"),
            ("LOG_DIR", "/var/log/case-report"),
        ])
        .unwrap();

        assert_eq!(config.database_url, "postgresql://db:5432/cases");
        assert_eq!(config.schema, "support");
        assert_eq!(config.http_port, 8080);
        assert!(config.is_production());
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.batch_policy, BatchPolicy::SkipAndReport);
        assert_eq!(config.json_dir, Some(PathBuf::from("/var/lib/cases")));
        assert_eq!(config.log_dir, PathBuf::from("/var/log/case-report"));
    }

    #[test]
    fn blank_value_counts_as_unset() {
        let config = config_from(&[("HTTP_PORT", "  "), ("LOG_LEVEL", "")]).unwrap();
        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config_from(&[("HTTP_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "HTTP_PORT"));
    }

    #[test]
    fn invalid_policy_is_rejected() {
        assert!(config_from(&[("BATCH_POLICY", "retry")]).is_err());
    }

    #[test]
    fn builtin_routing_without_override() {
        let table = ReportConfig::default().load_routing_table().unwrap();
        assert_eq!(table, RoutingTable::builtin());
    }

    #[test]
    fn routing_override_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.yaml");
        std::fs::write(&path, "- prefix: Kanaka\n  product: Condrey\n").unwrap();

        let config = ReportConfig {
            routing_table_path: Some(path),
            ..Default::default()
        };
        let table = config.load_routing_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("Kanaka"), Some("Condrey"));
    }
}
