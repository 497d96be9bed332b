//! Store-generated record identifiers
//!
//! Identifiers are 12 bytes rendered as 24 lowercase hex characters: a 4-byte
//! big-endian unix timestamp (seconds) followed by 8 random bytes. Ids created
//! in later seconds therefore sort after earlier ones.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;

const RECORD_ID_BYTES: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh identifier for a new record
    pub fn generate() -> Self {
        let mut bytes = [0u8; RECORD_ID_BYTES];
        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let (head, tail) = bytes.split_at_mut(4);
        head.copy_from_slice(&seconds.to_be_bytes());
        rand::thread_rng().fill(tail);
        Self(hex::encode(bytes))
    }

    /// Parse an identifier received from a caller
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::InvalidRecordId`] unless the input is exactly
    /// 24 hex characters.
    pub fn parse(raw: &str) -> Result<Self, DatabaseError> {
        let decoded = hex::decode(raw).map_err(|_| DatabaseError::InvalidRecordId(raw.to_string()))?;
        if decoded.len() != RECORD_ID_BYTES {
            return Err(DatabaseError::InvalidRecordId(raw.to_string()));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RecordId {
    type Error = DatabaseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_24_hex_chars() {
        let id = RecordId::generate();
        assert_eq!(id.as_str().len(), 24);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, RecordId::generate());
    }

    #[test]
    fn test_parse_accepts_zero_id() {
        let id = RecordId::parse("000000000000000000000000").unwrap();
        assert_eq!(id.to_string(), "000000000000000000000000");
    }

    #[test]
    fn test_parse_normalizes_case() {
        let id = RecordId::parse("65A1B2C3D4E5F60718293A4B").unwrap();
        assert_eq!(id.as_str(), "65a1b2c3d4e5f60718293a4b");
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        assert!(RecordId::parse("not-an-id").is_err());
        assert!(RecordId::parse("").is_err());
        assert!(RecordId::parse("00000000000000000000000").is_err());
        assert!(RecordId::parse("0000000000000000000000000000").is_err());
        assert!(RecordId::parse("zz0000000000000000000000").is_err());
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let id = RecordId::parse("65a1b2c3d4e5f60718293a4b").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"65a1b2c3d4e5f60718293a4b\"");
        assert!(serde_json::from_str::<RecordId>("\"bogus\"").is_err());
    }
}
