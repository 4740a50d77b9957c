//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `siphon-config.yaml` at the
//! workspace root. This module defines strongly-typed structs mirroring
//! the YAML structure and a loader that reads, parses, and clamps the
//! file. Tunables are validated at load time, never at runtime: an
//! out-of-range value is clamped to its documented bound with a warning,
//! and the rest of the system trusts the result.
//!
//! Documented ranges:
//!
//! - inventory capacity: 0.1 to 100
//! - amount moved per action: 0.25 to 60
//! - action repeat interval: 0.25 to 60 seconds

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use siphon_types::{ActionStyles, LoadStyles};
use tracing::warn;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level session configuration.
///
/// Mirrors the structure of `siphon-config.yaml`. All fields have
/// defaults, so an empty or missing file yields a usable session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiphonConfig {
    /// The actor that selects targets and runs the periodic action.
    #[serde(default)]
    pub actor: ActorConfig,

    /// Supply nodes available as targets.
    #[serde(default = "default_nodes")]
    pub nodes: Vec<NodeConfig>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SiphonConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and clamp every tunable to
    /// its documented range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.clamp_all();
        Ok(config)
    }

    /// Clamp every tunable in place.
    fn clamp_all(&mut self) {
        self.actor.capacity = clamp_range(
            "actor.capacity",
            self.actor.capacity,
            min_capacity(),
            max_capacity(),
        );
        self.actor.amount_per_action = clamp_range(
            "actor.amount_per_action",
            self.actor.amount_per_action,
            min_amount(),
            max_amount(),
        );
        self.actor.repeat_interval_secs = clamp_range(
            "actor.repeat_interval_secs",
            self.actor.repeat_interval_secs,
            min_interval_secs(),
            max_interval_secs(),
        );
        for node in &mut self.nodes {
            node.capacity =
                clamp_range("node.capacity", node.capacity, min_capacity(), max_capacity());
        }
    }
}

impl Default for SiphonConfig {
    fn default() -> Self {
        Self {
            actor: ActorConfig::default(),
            nodes: default_nodes(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration for the actor side of the interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActorConfig {
    /// Maximum load the actor's inventory can hold.
    #[serde(default = "default_capacity")]
    pub capacity: Decimal,

    /// Amount withdrawn from the target on each action firing.
    #[serde(default = "default_amount_per_action")]
    pub amount_per_action: Decimal,

    /// Seconds between action firings (also the delay before the first).
    #[serde(default = "default_repeat_interval_secs")]
    pub repeat_interval_secs: Decimal,

    /// Display styles for the action dimension.
    #[serde(default)]
    pub action_styles: ActionStyles,

    /// Display styles for the load dimension.
    #[serde(default)]
    pub load_styles: LoadStyles,
}

impl ActorConfig {
    /// The repeat interval converted to whole milliseconds.
    ///
    /// The fractional remainder below one millisecond is truncated; with
    /// the interval clamped to at least 0.25 s the error is at most one
    /// part in 250.
    pub fn period_ms(&self) -> u64 {
        self.repeat_interval_secs
            .checked_mul(Decimal::ONE_THOUSAND)
            .and_then(|ms| ms.to_u64())
            .unwrap_or(DEFAULT_PERIOD_MS)
    }
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            amount_per_action: default_amount_per_action(),
            repeat_interval_secs: default_repeat_interval_secs(),
            action_styles: ActionStyles::default(),
            load_styles: LoadStyles::default(),
        }
    }
}

/// Configuration for one supply node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeConfig {
    /// Display name used by sinks when this node is the target.
    pub name: String,

    /// Maximum (and starting) load of the node's inventory.
    #[serde(default = "default_capacity")]
    pub capacity: Decimal,

    /// Display styles for the node's load dimension.
    #[serde(default)]
    pub load_styles: LoadStyles,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is not set
    /// (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Fallback repeat period when conversion fails (one second).
const DEFAULT_PERIOD_MS: u64 = 1000;

/// Clamp `value` into `[min, max]`, warning when it was out of range.
fn clamp_range(field: &'static str, value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    if value < min {
        warn!(field, %value, %min, "Config value below minimum, clamping");
        return min;
    }
    if value > max {
        warn!(field, %value, %max, "Config value above maximum, clamping");
        return max;
    }
    value
}

fn min_capacity() -> Decimal {
    Decimal::new(1, 1) // 0.1
}

fn max_capacity() -> Decimal {
    Decimal::ONE_HUNDRED
}

fn min_amount() -> Decimal {
    Decimal::new(25, 2) // 0.25
}

fn max_amount() -> Decimal {
    Decimal::new(60, 0)
}

fn min_interval_secs() -> Decimal {
    Decimal::new(25, 2) // 0.25
}

fn max_interval_secs() -> Decimal {
    Decimal::new(60, 0)
}

fn default_capacity() -> Decimal {
    Decimal::ONE
}

fn default_amount_per_action() -> Decimal {
    Decimal::ONE
}

fn default_repeat_interval_secs() -> Decimal {
    Decimal::ONE
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_nodes() -> Vec<NodeConfig> {
    vec![
        NodeConfig {
            name: String::from("North Cache"),
            capacity: Decimal::TEN,
            load_styles: LoadStyles::default(),
        },
        NodeConfig {
            name: String::from("South Cache"),
            capacity: Decimal::TEN,
            load_styles: LoadStyles::default(),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = SiphonConfig::parse("{}").unwrap();
        assert_eq!(config.actor.capacity, Decimal::ONE);
        assert_eq!(config.actor.amount_per_action, Decimal::ONE);
        assert_eq!(config.actor.repeat_interval_secs, Decimal::ONE);
        assert_eq!(config.nodes.len(), 2);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn full_document_parses() {
        let yaml = r"
actor:
  capacity: 10
  amount_per_action: 3
  repeat_interval_secs: 0.5
nodes:
  - name: Quarry
    capacity: 25
logging:
  level: debug
";
        let config = SiphonConfig::parse(yaml).unwrap();
        assert_eq!(config.actor.capacity, dec!(10));
        assert_eq!(config.actor.amount_per_action, dec!(3));
        assert_eq!(config.actor.period_ms(), 500);
        assert_eq!(config.nodes.len(), 1);
        assert_eq!(config.nodes.first().unwrap().name, "Quarry");
        assert_eq!(config.nodes.first().unwrap().capacity, dec!(25));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let yaml = r"
actor:
  capacity: 500
  amount_per_action: 0.01
  repeat_interval_secs: 100
nodes:
  - name: Sliver
    capacity: 0.01
";
        let config = SiphonConfig::parse(yaml).unwrap();
        assert_eq!(config.actor.capacity, dec!(100));
        assert_eq!(config.actor.amount_per_action, dec!(0.25));
        assert_eq!(config.actor.repeat_interval_secs, dec!(60));
        assert_eq!(config.nodes.first().unwrap().capacity, dec!(0.1));
    }

    #[test]
    fn in_range_boundary_values_pass_through() {
        let yaml = r"
actor:
  capacity: 0.1
  amount_per_action: 60
  repeat_interval_secs: 0.25
";
        let config = SiphonConfig::parse(yaml).unwrap();
        assert_eq!(config.actor.capacity, dec!(0.1));
        assert_eq!(config.actor.amount_per_action, dec!(60));
        assert_eq!(config.actor.period_ms(), 250);
    }

    #[test]
    fn period_truncates_below_one_millisecond() {
        let config = SiphonConfig {
            actor: ActorConfig {
                repeat_interval_secs: dec!(0.2505),
                ..ActorConfig::default()
            },
            ..SiphonConfig::default()
        };
        assert_eq!(config.actor.period_ms(), 250);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = SiphonConfig::parse(": not yaml [");
        assert!(result.is_err());
    }
}
