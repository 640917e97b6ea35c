//! Validated numeric sort keys.
//!
//! Records hand the index a raw `f64`. Before that value takes part in any
//! comparison it is wrapped in a [`SortKey`], which only exists for finite
//! values. That makes the ordering total, so the tree never has to decide
//! which way a NaN should fall.

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::IndexError;
use crate::error::Result;

/// A finite `f64` with a total order.
#[derive(Clone, Copy, PartialEq)]
pub struct SortKey(f64);

impl SortKey {
    /// Validate a raw key. NaN and the infinities are rejected.
    pub fn new(value: f64) -> Result<SortKey> {
        if !value.is_finite() {
            tracing::warn!(value, "rejecting non-finite sort key");
            return Err(IndexError::NonFiniteKey { value });
        }
        // -0.0 == 0.0 already, but keep the bits identical too.
        let value = if value == 0.0 { 0.0 } else { value };
        return Ok(SortKey(value));
    }

    /// The underlying value.
    pub fn get(self) -> f64 {
        return self.0;
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        return Some(self.cmp(other));
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Both sides are finite, so total_cmp agrees with the numeric order.
        return self.0.total_cmp(&other.0);
    }
}

impl TryFrom<f64> for SortKey {
    type Error = IndexError;

    fn try_from(value: f64) -> Result<SortKey> {
        return SortKey::new(value);
    }
}

impl From<u32> for SortKey {
    fn from(value: u32) -> SortKey {
        return SortKey(value as f64);
    }
}

impl From<SortKey> for f64 {
    fn from(key: SortKey) -> f64 {
        return key.0;
    }
}

impl fmt::Debug for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "SortKey({})", self.0);
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        return serializer.serialize_f64(self.0);
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<SortKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        return SortKey::new(raw).map_err(serde::de::Error::custom);
    }
}
