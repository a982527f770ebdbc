//! # Identifiers
//!
//! The per-screen session identifier and the per-attempt merchant
//! transaction identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prefix of every generated merchant transaction identifier
pub const ORDER_ID_PREFIX: &str = "sdk-";

/// Number of hex characters kept from the random part
pub const ORDER_ID_RANDOM_PART_LENGTH: usize = 10;

/// Correlation id generated once per screen and passed through to the
/// hosted checkout (`myriadFlowId` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh session identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Client-generated order reference, unique per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchantTxId(String);

impl MerchantTxId {
    /// Generate `sdk-` plus the last 10 hex digits of a random 64-bit value
    pub fn generate() -> Self {
        Self::from_random(rand::random::<u64>())
    }

    fn from_random(value: u64) -> Self {
        // Zero-padded so the slice is always full length.
        let hex = format!("{:016x}", value);
        let tail = &hex[hex.len() - ORDER_ID_RANDOM_PART_LENGTH..];
        Self(format!("{}{}", ORDER_ID_PREFIX, tail))
    }

    /// Generate an id guaranteed to differ from `previous`
    pub fn regenerate(previous: &str) -> Self {
        loop {
            let next = Self::generate();
            if next.as_str() != previous {
                return next;
            }
        }
    }

    /// Check the `sdk-` + 10 lowercase hex digits shape
    pub fn is_well_formed(value: &str) -> bool {
        value
            .strip_prefix(ORDER_ID_PREFIX)
            .map(|rest| {
                rest.len() == ORDER_ID_RANDOM_PART_LENGTH
                    && rest.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
            })
            .unwrap_or(false)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for MerchantTxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_well_formed() {
        for _ in 0..1000 {
            let id = MerchantTxId::generate();
            assert!(MerchantTxId::is_well_formed(id.as_str()), "bad id {}", id);
        }
    }

    #[test]
    fn test_small_values_are_padded() {
        assert_eq!(MerchantTxId::from_random(0).as_str(), "sdk-0000000000");
        assert_eq!(MerchantTxId::from_random(0xabc).as_str(), "sdk-0000000abc");
    }

    #[test]
    fn test_keeps_last_ten_digits() {
        let id = MerchantTxId::from_random(0x0123_4567_89ab_cdef);
        assert_eq!(id.as_str(), "sdk-6789abcdef");
    }

    #[test]
    fn test_regenerate_differs() {
        let first = MerchantTxId::generate();
        let second = MerchantTxId::regenerate(first.as_str());
        assert_ne!(first, second);
    }

    #[test]
    fn test_well_formed_rejects() {
        assert!(!MerchantTxId::is_well_formed("sdk-123"));
        assert!(!MerchantTxId::is_well_formed("abc-0123456789"));
        assert!(!MerchantTxId::is_well_formed("sdk-012345678g"));
        assert!(!MerchantTxId::is_well_formed("sdk-0123456789a"));
    }

    #[test]
    fn test_session_ids_are_distinct() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_session_id_serializes_as_plain_string() {
        let id = SessionId::generate();
        let json = serde_json::to_value(&id).unwrap();

        assert_eq!(json, serde_json::Value::String(id.as_str().to_string()));
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }
}
