//! Named numeric parameters for the threshold-based strategies.
//!
//! There are no defaults: a strategy that needs a key and does not find it
//! fails, since a silently substituted value would change what an experiment
//! measures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

use crate::error::{EvalError, Result};

pub const CONSERVATIVE_INITIAL_THRESHOLD: &str = "conservative_strategy_initial_threshold";
pub const CONSERVATIVE_ALPHA: &str = "conservative_strategy_alpha";
pub const CONSERVATIVE_MIN_THRESHOLD: &str = "conservative_strategy_min_threshold";
pub const AGGRESSIVE_FIXED_INTERVAL: &str = "aggressive_pursuit_fixed_interval";
pub const AGGRESSIVE_DIVISOR: &str = "aggressive_pursuit_divisor";
pub const ADAPTIVE_DISAPPOINTMENT_THRESHOLD: &str = "adaptive_learning_disappointment_threshold";

/// Flat parameter map, deserialized from a JSON object of numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyConfig {
    values: BTreeMap<String, f64>,
}

impl StrategyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn from_reader(reader: impl Read) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Value of `key`, or [`EvalError::MissingConfig`].
    pub fn require(&self, key: &str) -> Result<f64> {
        self.get(key)
            .ok_or_else(|| EvalError::MissingConfig(key.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for StrategyConfig {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_json_object() {
        let cfg = StrategyConfig::from_json_str(
            r#"{"conservative_strategy_alpha": 0.2, "aggressive_pursuit_divisor": 3}"#,
        )
        .expect("valid config");

        assert_eq!(cfg.len(), 2);
        assert_eq!(cfg.get(CONSERVATIVE_ALPHA), Some(0.2));
        assert_eq!(cfg.require(AGGRESSIVE_DIVISOR), Ok(3.0));
    }

    #[test]
    fn require_reports_missing_key() {
        let cfg = StrategyConfig::new().with(CONSERVATIVE_ALPHA, 0.4);
        assert_eq!(
            cfg.require(CONSERVATIVE_MIN_THRESHOLD),
            Err(EvalError::MissingConfig(CONSERVATIVE_MIN_THRESHOLD.into()))
        );
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert!(StrategyConfig::from_json_str(r#"{"aggressive_pursuit_divisor": "two"}"#).is_err());
    }
}
