//! Configuration types for the router

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Fee scale: fees are expressed in basis points out of this value
pub const FEE_SCALE: u32 = 10_000;

/// Default pool fee: 30 bps = 0.3%
pub const DEFAULT_FEE_BPS: u32 = 30;

/// Routing and scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Pool fee in basis points (30 = 0.3%)
    #[serde(default = "default_fee_bps")]
    pub fee_bps: u32,

    /// Longest route explored by the enumerator
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,

    /// Routes priced per round (each one costs reserve fetches)
    #[serde(default = "default_max_routes")]
    pub max_routes: usize,

    /// Size of the ranked best-trades list
    #[serde(default = "default_max_trades")]
    pub max_trades: usize,

    /// Per-pair timeout for reserve fetches
    #[serde(default = "default_reserve_timeout_secs")]
    pub reserve_timeout_secs: u64,
}

fn default_fee_bps() -> u32 {
    DEFAULT_FEE_BPS
}

fn default_max_hops() -> usize {
    2
}

fn default_max_routes() -> usize {
    5
}

fn default_max_trades() -> usize {
    5
}

fn default_reserve_timeout_secs() -> u64 {
    10
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            fee_bps: default_fee_bps(),
            max_hops: default_max_hops(),
            max_routes: default_max_routes(),
            max_trades: default_max_trades(),
            reserve_timeout_secs: default_reserve_timeout_secs(),
        }
    }
}

impl RouterConfig {
    /// Reject values the router cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.fee_bps >= FEE_SCALE {
            return Err(Error::Config(format!(
                "fee_bps must be below {}, got {}",
                FEE_SCALE, self.fee_bps
            )));
        }
        if self.max_hops == 0 {
            return Err(Error::Config("max_hops must be at least 1".to_string()));
        }
        if self.max_routes == 0 {
            return Err(Error::Config("max_routes must be at least 1".to_string()));
        }
        if self.max_trades == 0 {
            return Err(Error::Config("max_trades must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouterConfig::default();
        assert_eq!(config.fee_bps, DEFAULT_FEE_BPS);
        assert_eq!(config.fee_bps, 30);
        assert_eq!(config.max_hops, 2);
        assert_eq!(config.max_routes, 5);
        assert_eq!(config.max_trades, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = RouterConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: RouterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.fee_bps, config.fee_bps);
        assert_eq!(parsed.reserve_timeout_secs, config.reserve_timeout_secs);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: RouterConfig = serde_json::from_str(r#"{"max_hops": 3}"#).unwrap();
        assert_eq!(parsed.max_hops, 3);
        assert_eq!(parsed.fee_bps, 30);
        assert_eq!(parsed.max_routes, 5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = RouterConfig {
            fee_bps: 10_000,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = RouterConfig {
            max_hops: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
