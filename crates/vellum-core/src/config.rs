//! Widget layer configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upper bound on how long an animated activation may wait for its
    /// transition-end signal before completing anyway
    pub transition_fallback_ms: u64,
}

impl Config {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn transition_fallback(&self) -> Duration {
        Duration::from_millis(self.transition_fallback_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transition_fallback_ms: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_with_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.transition_fallback_ms, 300);

        let config = Config::from_json(r#"{"transition_fallback_ms": 150}"#).unwrap();
        assert_eq!(config.transition_fallback(), Duration::from_millis(150));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(Config::from_json("not json").is_err());
    }
}
