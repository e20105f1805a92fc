//! Record identifiers.
//!
//! Identifiers follow the document-database object-id layout so that
//! clients see the familiar 24-character hex form:
//!
//! ```text
//! | 4 bytes timestamp (BE secs) | 5 bytes process random | 3 bytes counter (BE) |
//! ```
//!
//! Byte order sorts ids by creation second, then by counter within a process.

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

const ID_LEN: usize = 12;
const COUNTER_MASK: u32 = 0x00ff_ffff;

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| {
    let mut bytes = [0u8; 5];
    bytes.iter_mut().for_each(|b| *b = fastrand::u8(..));
    bytes
});

static COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(fastrand::u32(..) & COUNTER_MASK));

/// Error returned when a string is not a valid identifier encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid person id \"{0}\"")]
pub struct IdParseError(pub String);

/// Unique identifier of a stored person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId([u8; ID_LEN]);

impl PersonId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as u32;
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; ID_LEN];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Seconds since the epoch at which this id was generated.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl FromStr for PersonId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ID_LEN * 2 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(IdParseError(s.to_string()));
        }

        let mut bytes = [0u8; ID_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| IdParseError(s.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for PersonId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PersonId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parse() {
        let id = PersonId::generate();
        let text = id.to_string();
        assert_eq!(text.len(), 24);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(text.parse::<PersonId>().unwrap(), id);
    }

    #[test]
    fn test_uppercase_accepted() {
        let id: PersonId = "5F1A2B3C4D5E6F7A8B9C0D1E".parse().unwrap();
        assert_eq!(id.to_string(), "5f1a2b3c4d5e6f7a8b9c0d1e");
    }

    #[test]
    fn test_malformed_rejected() {
        let bad_ids = [
            "not-an-id",
            "",
            "5f1a2b3c4d5e6f7a8b9c0d1",
            "5f1a2b3c4d5e6f7a8b9c0d1ez",
            "zz1a2b3c4d5e6f7a8b9c0d1e",
            "+f1a2b3c4d5e6f7a8b9c0d1e",
            "ü1a2b3c4d5e6f7a8b9c0d1",
        ];
        for bad in bad_ids {
            assert_eq!(bad.parse::<PersonId>(), Err(IdParseError(bad.to_string())), "{bad}");
        }
    }

    #[test]
    fn test_ids_unique_and_ordered() {
        let a = PersonId::generate();
        let b = PersonId::generate();
        assert_ne!(a, b);
        assert!(b.timestamp() >= a.timestamp());
    }

    #[test]
    fn test_serde_as_string() {
        let id: PersonId = "5f1a2b3c4d5e6f7a8b9c0d1e".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"5f1a2b3c4d5e6f7a8b9c0d1e\"");
        let back: PersonId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<PersonId>("\"nope\"").is_err());
    }
}
