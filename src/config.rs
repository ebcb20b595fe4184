//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! The browser build reads optional overrides from `localStorage` under
//! [`STORAGE_KEY`]; nothing is ever written back.

use serde::{Deserialize, Serialize};

/// localStorage key holding a JSON [`GameConfig`].
pub const STORAGE_KEY: &str = "the_ascent_config";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Wall-clock period between passive-income ticks.
    pub tick_interval_ms: u32,
    pub starting_cash: f64,
    pub starting_click_value: f64,
    /// How many notifications the session keeps for display.
    pub log_capacity: usize,
    /// tracing filter level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            starting_cash: 10.0,
            starting_click_value: 1.0,
            log_capacity: 30,
            log_level: "info".into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl GameConfig {
    /// Parse a JSON document, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_interval_ms",
                reason: "must be positive",
            });
        }
        if !self.starting_cash.is_finite() || self.starting_cash < 0.0 {
            return Err(ConfigError::Invalid {
                field: "starting_cash",
                reason: "must be a non-negative number",
            });
        }
        if !self.starting_click_value.is_finite() || self.starting_click_value < 0.0 {
            return Err(ConfigError::Invalid {
                field: "starting_click_value",
                reason: "must be a non-negative number",
            });
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "log_capacity",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

/// Read overrides from localStorage. `Ok(None)` when nothing is stored.
#[cfg(target_arch = "wasm32")]
pub fn load_overrides() -> Result<Option<GameConfig>, ConfigError> {
    let storage = match web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        Some(s) => s,
        None => return Ok(None),
    };
    match storage.get_item(STORAGE_KEY) {
        Ok(Some(json)) => GameConfig::from_json(&json).map(Some),
        _ => Ok(None),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_overrides() -> Result<Option<GameConfig>, ConfigError> {
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_game() {
        let c = GameConfig::default();
        assert_eq!(c.tick_interval_ms, 1000);
        assert_eq!(c.starting_cash, 10.0);
        assert_eq!(c.starting_click_value, 1.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_object_is_all_defaults() {
        let c = GameConfig::from_json("{}").unwrap();
        assert_eq!(c, GameConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let c = GameConfig::from_json(r#"{"tick_interval_ms": 250, "log_level": "debug"}"#)
            .unwrap();
        assert_eq!(c.tick_interval_ms, 250);
        assert_eq!(c.log_level, "debug");
        assert_eq!(c.starting_cash, 10.0);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = GameConfig::from_json("{tick_interval_ms:").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_tick_interval_rejected() {
        let err = GameConfig::from_json(r#"{"tick_interval_ms": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "tick_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn negative_starting_cash_rejected() {
        let err = GameConfig::from_json(r#"{"starting_cash": -5}"#).unwrap_err();
        assert!(err.to_string().contains("starting_cash"));
    }

    #[test]
    fn zero_log_capacity_rejected() {
        assert!(GameConfig::from_json(r#"{"log_capacity": 0}"#).is_err());
    }

    #[test]
    fn native_build_has_no_overrides() {
        assert!(matches!(load_overrides(), Ok(None)));
    }
}
