//! Configuration types for settlement engines.

use serde::{Deserialize, Serialize};

use crate::{constants, OpenswapError, Result};

/// Limits applied during order validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Maximum fee legs per order.
    pub max_fee_legs: usize,
    /// Maximum unique assets on either side of a swap.
    pub max_swap_assets: usize,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            max_fee_legs: constants::DEFAULT_MAX_FEE_LEGS,
            max_swap_assets: constants::DEFAULT_MAX_SWAP_ASSETS,
        }
    }
}

impl SettlementConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns `Configuration` if any limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_fee_legs == 0 {
            return Err(OpenswapError::Configuration(
                "max_fee_legs must be > 0".into(),
            ));
        }
        if self.max_swap_assets == 0 {
            return Err(OpenswapError::Configuration(
                "max_swap_assets must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SettlementConfig::default();
        assert_eq!(cfg.max_fee_legs, 32);
        assert_eq!(cfg.max_swap_assets, 64);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn from_json_fills_defaults() {
        let cfg = SettlementConfig::from_json_str(r#"{"max_fee_legs": 4}"#).unwrap();
        assert_eq!(cfg.max_fee_legs, 4);
        assert_eq!(cfg.max_swap_assets, constants::DEFAULT_MAX_SWAP_ASSETS);
    }

    #[test]
    fn zero_limit_rejected() {
        let err = SettlementConfig::from_json_str(r#"{"max_swap_assets": 0}"#).unwrap_err();
        assert!(matches!(err, OpenswapError::Configuration(_)));
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = SettlementConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, OpenswapError::Serialization(_)));
    }
}
