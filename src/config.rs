//! Comparison settings

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::env;

/// Ratio by which the flat tail extends past the largest finite expense
pub const DEFAULT_TAIL_MARGIN: f64 = 0.15;

/// Offset used to pick a representative point in an open-ended interval
pub const DEFAULT_TAIL_OFFSET: f64 = 1000.0;

/// Number of cheapest offers reported per expense range
pub const DEFAULT_TOP_N: usize = 3;

/// Upper bound on offers per comparison (the editor's row limit)
pub const DEFAULT_MAX_OFFERS: usize = 50;

/// Fewest offers that make a comparison meaningful
pub const MIN_OFFERS: usize = 2;

/// Settings shared by every step of a comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Right boundary = (1 + tail_margin) * largest finite expense
    #[serde(default = "default_tail_margin")]
    pub tail_margin: f64,

    /// Representative offset for an interval without a finite upper bound.
    /// Also the right boundary when every finite expense is 0.
    #[serde(default = "default_tail_offset")]
    pub tail_offset: f64,

    /// How many cheapest offers to report per range
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Maximum number of offers accepted in one comparison
    #[serde(default = "default_max_offers")]
    pub max_offers: usize,
}

fn default_tail_margin() -> f64 { DEFAULT_TAIL_MARGIN }
fn default_tail_offset() -> f64 { DEFAULT_TAIL_OFFSET }
fn default_top_n() -> usize { DEFAULT_TOP_N }
fn default_max_offers() -> usize { DEFAULT_MAX_OFFERS }

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            tail_margin: DEFAULT_TAIL_MARGIN,
            tail_offset: DEFAULT_TAIL_OFFSET,
            top_n: DEFAULT_TOP_N,
            max_offers: DEFAULT_MAX_OFFERS,
        }
    }
}

impl ComparisonConfig {
    /// Build a config from environment variables, falling back to defaults:
    ///   COMPARATOR_TAIL_MARGIN, COMPARATOR_TAIL_OFFSET,
    ///   COMPARATOR_TOP_N, COMPARATOR_MAX_OFFERS
    pub fn from_env() -> Self {
        Self {
            tail_margin: env_or("COMPARATOR_TAIL_MARGIN", DEFAULT_TAIL_MARGIN),
            tail_offset: env_or("COMPARATOR_TAIL_OFFSET", DEFAULT_TAIL_OFFSET),
            top_n: env_or("COMPARATOR_TOP_N", DEFAULT_TOP_N),
            max_offers: env_or("COMPARATOR_MAX_OFFERS", DEFAULT_MAX_OFFERS),
        }
    }

    /// Reject settings that would put the right boundary at or left of the
    /// largest finite expense: `tail_margin` must be finite and `>= 0`,
    /// `tail_offset` finite and `> 0`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.tail_margin.is_finite() || self.tail_margin < 0.0 {
            return Err(ValidationError::InvalidSetting {
                name: "tail_margin",
                value: self.tail_margin,
            });
        }
        if !self.tail_offset.is_finite() || self.tail_offset <= 0.0 {
            return Err(ValidationError::InvalidSetting {
                name: "tail_offset",
                value: self.tail_offset,
            });
        }
        Ok(())
    }

    /// Same config with a different number of reported offers
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ComparisonConfig = serde_json::from_str(r#"{"top_n": 5}"#).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.tail_margin, DEFAULT_TAIL_MARGIN);
        assert_eq!(config.tail_offset, DEFAULT_TAIL_OFFSET);
        assert_eq!(config.max_offers, DEFAULT_MAX_OFFERS);
    }

    #[test]
    fn test_env_fallback_on_garbage() {
        assert_eq!(env_or("COMPARATOR_TEST_UNSET_VARIABLE", 7usize), 7);

        env::set_var("COMPARATOR_TEST_GARBAGE_TOP_N", "three");
        assert_eq!(env_or("COMPARATOR_TEST_GARBAGE_TOP_N", 7usize), 7);

        env::set_var("COMPARATOR_TEST_PARSED_MARGIN", "0.25");
        assert_eq!(env_or("COMPARATOR_TEST_PARSED_MARGIN", 0.15), 0.25);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(ComparisonConfig::default().validate(), Ok(()));

        let zero_margin = ComparisonConfig { tail_margin: 0.0, ..ComparisonConfig::default() };
        assert_eq!(zero_margin.validate(), Ok(()));
    }

    #[test]
    fn test_tail_margin_must_be_finite_and_non_negative() {
        for margin in [-0.5, -1.0, f64::INFINITY] {
            let config = ComparisonConfig { tail_margin: margin, ..ComparisonConfig::default() };
            assert_eq!(
                config.validate(),
                Err(ValidationError::InvalidSetting { name: "tail_margin", value: margin })
            );
        }

        let config = ComparisonConfig { tail_margin: f64::NAN, ..ComparisonConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSetting { name: "tail_margin", .. })
        ));
    }

    #[test]
    fn test_tail_offset_must_be_positive() {
        for offset in [0.0, -1000.0, f64::INFINITY] {
            let config = ComparisonConfig { tail_offset: offset, ..ComparisonConfig::default() };
            assert_eq!(
                config.validate(),
                Err(ValidationError::InvalidSetting { name: "tail_offset", value: offset })
            );
        }

        let config = ComparisonConfig { tail_offset: f64::NAN, ..ComparisonConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSetting { name: "tail_offset", .. })
        ));
    }
}
