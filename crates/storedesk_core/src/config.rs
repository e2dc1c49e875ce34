//! Runtime configuration resolved from the process environment.
//!
//! # Responsibility
//! - Resolve database path, logging settings and list display defaults.
//! - Normalize page size into the supported range.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - `min_rows` has no hidden default; padding only happens when configured.

use crate::listing::ListOptions;
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "STOREDESK_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "STOREDESK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "STOREDESK_LOG_DIR";
pub const ENV_PAGE_SIZE: &str = "STOREDESK_PAGE_SIZE";
pub const ENV_MIN_ROWS: &str = "STOREDESK_MIN_ROWS";

const DB_FILE_NAME: &str = "storedesk.sqlite3";
const PAGE_SIZE_DEFAULT: usize = 15;
const PAGE_SIZE_MAX: usize = 100;

/// Invalid environment value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidNumber { var: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { var, value } => {
                write!(f, "{var} must be a non-negative integer, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute log directory; file logging stays off when unset.
    pub log_dir: Option<String>,
    pub page_size: usize,
    pub min_rows: Option<usize>,
}

impl AppConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME));
        let log_level = read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string());
        let page_size = normalize_page_size(parse_number(ENV_PAGE_SIZE, read(ENV_PAGE_SIZE))?);
        let min_rows = parse_number(ENV_MIN_ROWS, read(ENV_MIN_ROWS))?;

        Ok(Self {
            db_path,
            log_level,
            log_dir: read(ENV_LOG_DIR),
            page_size,
            min_rows,
        })
    }

    /// List display options derived from this configuration.
    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            page_size: Some(self.page_size),
            min_rows: self.min_rows,
        }
    }
}

/// Normalizes a requested page size: missing or zero uses the default,
/// oversized requests clamp to the maximum.
pub fn normalize_page_size(page_size: Option<usize>) -> usize {
    match page_size {
        Some(0) | None => PAGE_SIZE_DEFAULT,
        Some(value) if value > PAGE_SIZE_MAX => PAGE_SIZE_MAX,
        Some(value) => value,
    }
}

fn parse_number(var: &'static str, value: Option<String>) -> Result<Option<usize>, ConfigError> {
    value
        .map(|raw| {
            raw.parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber { var, value: raw })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::{
        normalize_page_size, AppConfig, ConfigError, ENV_DB_PATH, ENV_LOG_LEVEL, ENV_MIN_ROWS,
        ENV_PAGE_SIZE,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("empty env is valid");
        assert_eq!(config.page_size, 15);
        assert_eq!(config.min_rows, None);
        assert_eq!(config.log_dir, None);
        assert!(config.db_path.ends_with("storedesk.sqlite3"));
    }

    #[test]
    fn explicit_values_are_used() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, " /srv/store.db "),
            (ENV_LOG_LEVEL, "warn"),
            (ENV_PAGE_SIZE, "20"),
            (ENV_MIN_ROWS, "15"),
        ]))
        .expect("valid env");
        assert_eq!(config.db_path, PathBuf::from("/srv/store.db"));
        assert_eq!(config.log_level, "warn");
        let options = config.list_options();
        assert_eq!(options.page_size, Some(20));
        assert_eq!(options.min_rows, Some(15));
    }

    #[test]
    fn invalid_number_is_reported() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_PAGE_SIZE, "many")]))
            .expect_err("non-numeric page size must fail");
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: ENV_PAGE_SIZE,
                value: "many".to_string()
            }
        );
    }

    #[test]
    fn page_size_is_normalized() {
        assert_eq!(normalize_page_size(None), 15);
        assert_eq!(normalize_page_size(Some(0)), 15);
        assert_eq!(normalize_page_size(Some(500)), 100);
        assert_eq!(normalize_page_size(Some(30)), 30);
    }
}
