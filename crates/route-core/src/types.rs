//! Core type definitions for the router

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::errors::RouteError;

/// Normalize an asset identifier for comparison.
///
/// Strips a single `0x` prefix and then any leading zeros, so that
/// `0x2::coin::COIN` and `0x0000…0002::coin::COIN` compare equal.
pub fn normalize_asset(raw: &str) -> &str {
    raw.strip_prefix("0x").unwrap_or(raw).trim_start_matches('0')
}

/// Fungible asset identifier (coin type).
///
/// Keeps the caller's spelling for display while equality and hashing go
/// through [`normalize_asset`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AssetId {
    raw: String,
    normalized: String,
}

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        let raw = id.into();
        let normalized = normalize_asset(&raw).to_string();
        Self { raw, normalized }
    }

    /// Identifier as given by the caller
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Prefix- and leading-zero-insensitive form used for comparisons
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl PartialEq for AssetId {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for AssetId {}

impl Hash for AssetId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl From<String> for AssetId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for AssetId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.raw
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// A trading pair `{asset_x, asset_y}` backed by one liquidity pool.
///
/// Orientation matters: the pool for `(X, Y)` is keyed separately from
/// `(Y, X)`. Equality and hashing follow [`AssetId`] normalization, so the
/// pair doubles as the lookup key for reserve snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PairFields", into = "PairFields")]
pub struct PoolPair {
    asset_x: AssetId,
    asset_y: AssetId,
}

#[derive(Serialize, Deserialize)]
struct PairFields {
    asset_x: AssetId,
    asset_y: AssetId,
}

impl PoolPair {
    /// Create a pair; both sides must name different assets.
    pub fn new(
        asset_x: impl Into<AssetId>,
        asset_y: impl Into<AssetId>,
    ) -> Result<Self, RouteError> {
        let asset_x = asset_x.into();
        let asset_y = asset_y.into();
        if asset_x == asset_y {
            return Err(RouteError::InvalidPair {
                asset: asset_x.to_string(),
            });
        }
        Ok(Self { asset_x, asset_y })
    }

    pub fn asset_x(&self) -> &AssetId {
        &self.asset_x
    }

    pub fn asset_y(&self) -> &AssetId {
        &self.asset_y
    }

    /// Check whether either side of the pair is `asset`
    pub fn touches(&self, asset: &AssetId) -> bool {
        self.asset_x == *asset || self.asset_y == *asset
    }

    /// The asset on the opposite side from `asset`, if the pair touches it
    pub fn other(&self, asset: &AssetId) -> Option<&AssetId> {
        if self.asset_x == *asset {
            Some(&self.asset_y)
        } else if self.asset_y == *asset {
            Some(&self.asset_x)
        } else {
            None
        }
    }
}

impl TryFrom<PairFields> for PoolPair {
    type Error = RouteError;

    fn try_from(fields: PairFields) -> Result<Self, Self::Error> {
        Self::new(fields.asset_x, fields.asset_y)
    }
}

impl From<PoolPair> for PairFields {
    fn from(pair: PoolPair) -> Self {
        Self {
            asset_x: pair.asset_x,
            asset_y: pair.asset_y,
        }
    }
}

impl fmt::Display for PoolPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.asset_x, self.asset_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_normalize_strips_prefix_and_zeros() {
        assert_eq!(normalize_asset("0x2::sui::SUI"), "2::sui::SUI");
        assert_eq!(
            normalize_asset("0x0000000000000000000000000000000000000002::sui::SUI"),
            "2::sui::SUI"
        );
        assert_eq!(normalize_asset("2::sui::SUI"), "2::sui::SUI");
        assert_eq!(normalize_asset("00af::usdc::USDC"), "af::usdc::USDC");
    }

    #[test]
    fn test_asset_equality_is_normalized() {
        let short = AssetId::new("0x2::sui::SUI");
        let padded = AssetId::new("0x0000000000000000000000000000000000000002::sui::SUI");
        let bare = AssetId::new("2::sui::SUI");
        assert_eq!(short, padded);
        assert_eq!(short, bare);
        assert_ne!(short, AssetId::new("0x3::sui::SUI"));

        let set: HashSet<AssetId> = [short, padded, bare].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_asset_keeps_raw_spelling() {
        let id = AssetId::new("0x02::coin::COIN");
        assert_eq!(id.as_str(), "0x02::coin::COIN");
        assert_eq!(id.normalized(), "2::coin::COIN");
        assert_eq!(id.to_string(), "0x02::coin::COIN");
    }

    #[test]
    fn test_pair_rejects_same_asset() {
        let err = PoolPair::new("0x2::sui::SUI", "0x002::sui::SUI").unwrap_err();
        assert_eq!(err.error_code(), "invalid_pair");
    }

    #[test]
    fn test_pair_other_side() {
        let pair = PoolPair::new("0xa::a::A", "0xb::b::B").unwrap();
        assert_eq!(pair.other(&"a::a::A".into()), Some(&AssetId::new("0xb::b::B")));
        assert_eq!(pair.other(&"0x0b::b::B".into()), Some(&AssetId::new("0xa::a::A")));
        assert!(pair.other(&"0xc::c::C".into()).is_none());
        assert!(pair.touches(&"0xa::a::A".into()));
    }

    #[test]
    fn test_pair_orientation_matters() {
        let xy = PoolPair::new("0xa::a::A", "0xb::b::B").unwrap();
        let yx = PoolPair::new("0xb::b::B", "0xa::a::A").unwrap();
        assert_ne!(xy, yx);
        assert_eq!(xy, PoolPair::new("a::a::A", "0x0b::b::B").unwrap());
    }

    #[test]
    fn test_pair_serde_roundtrip_validates() {
        let pair = PoolPair::new("0xa::a::A", "0xb::b::B").unwrap();
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, r#"{"asset_x":"0xa::a::A","asset_y":"0xb::b::B"}"#);
        let parsed: PoolPair = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pair);

        let bad = r#"{"asset_x":"0xa::a::A","asset_y":"0x0a::a::A"}"#;
        assert!(serde_json::from_str::<PoolPair>(bad).is_err());
    }
}
