//! Client configuration for batch indexing.

use crate::error::ConfigError;

/// Number of records sent per batch call unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

pub const APP_ID_ENV: &str = "ALGOLIA_APP_ID";
pub const API_KEY_ENV: &str = "ALGOLIA_API_KEY";
pub const BATCH_SIZE_ENV: &str = "ALGOLIA_BATCH_SIZE";

/// Settings shared by every index handle created from one client.
///
/// The batch builder only reads `batch_size`. The credentials are carried for
/// the [`BatchTransport`](crate::traits::BatchTransport) implementation, which
/// reads them through [`SearchIndex::config`](crate::index::SearchIndex::config)
/// when it signs requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexingConfig {
    /// Application identifier, passed through to the transport.
    pub app_id: Option<String>,
    /// API key with write access to the target indices, passed through to
    /// the transport.
    pub api_key: Option<String>,
    /// Maximum number of records per batch call. Always non-zero.
    pub batch_size: usize,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            api_key: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl IndexingConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBatchSize`] if `ALGOLIA_BATCH_SIZE` is set
    /// but is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBatchSize`] for a zero or unparseable
    /// batch size.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            app_id: lookup(APP_ID_ENV),
            api_key: lookup(API_KEY_ENV),
            ..Self::default()
        };
        if let Some(raw) = lookup(BATCH_SIZE_ENV) {
            config.batch_size = parse_batch_size(&raw)?;
        }
        Ok(config)
    }

    /// Returns a copy with a different batch size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBatchSize`] when `batch_size` is zero.
    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self, ConfigError> {
        if batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize {
                value: batch_size.to_string(),
            });
        }
        self.batch_size = batch_size;
        Ok(self)
    }
}

fn parse_batch_size(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::InvalidBatchSize {
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn indexing_config_defaults() {
        let config = IndexingConfig::default();
        assert!(config.app_id.is_none());
        assert!(config.api_key.is_none());
        assert_eq!(config.batch_size, 1000);
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let config = IndexingConfig::from_lookup(lookup_from(&[
            (APP_ID_ENV, "APP123"),
            (API_KEY_ENV, "secret"),
            (BATCH_SIZE_ENV, "250"),
        ]))
        .unwrap();
        assert_eq!(config.app_id.as_deref(), Some("APP123"));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.batch_size, 250);
    }

    #[test]
    fn from_lookup_keeps_defaults_when_unset() {
        let config = IndexingConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, IndexingConfig::default());
    }

    #[test]
    fn from_lookup_rejects_zero_batch_size() {
        let err = IndexingConfig::from_lookup(lookup_from(&[(BATCH_SIZE_ENV, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBatchSize {
                value: "0".to_string()
            }
        );
    }

    #[test]
    fn from_lookup_rejects_garbage_batch_size() {
        let err =
            IndexingConfig::from_lookup(lookup_from(&[(BATCH_SIZE_ENV, "lots")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid batch size 'lots': must be a positive integer");
    }

    #[test]
    fn with_batch_size_validates() {
        let config = IndexingConfig::default().with_batch_size(2).unwrap();
        assert_eq!(config.batch_size, 2);
        assert!(IndexingConfig::default().with_batch_size(0).is_err());
    }
}
