use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;
use crate::hash::decode_hex32;

/// Content-addressed reference returned by the content store.
///
/// The digest of the stored bytes; identical content always produces the
/// same reference, which is what makes re-anchoring converge instead of
/// duplicating blobs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentRef([u8; 32]);

impl ContentRef {
    /// Create from a pre-computed 32-byte digest.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        Ok(Self(decode_hex32(s)?))
    }
}

impl fmt::Debug for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentRef({})", self.short_hex())
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for ContentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Position of an anchor entry in the append-only ledger.
///
/// Carries both the 1-based sequence number and the content hash of the
/// entry itself, so a holder can locate the entry *and* detect tampering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerRef {
    /// 1-based position in the ledger.
    pub seq: u64,
    /// Digest of the anchored entry's content.
    #[serde(with = "entry_hash_hex")]
    pub entry_hash: [u8; 32],
}

impl LedgerRef {
    /// Create a new ledger reference.
    pub fn new(seq: u64, entry_hash: [u8; 32]) -> Self {
        Self { seq, entry_hash }
    }

    /// Short hex representation of the entry hash.
    pub fn short_hash(&self) -> String {
        hex::encode(&self.entry_hash[..4])
    }
}

impl fmt::Display for LedgerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l#{} [{}]", self.seq, self.short_hash())
    }
}

mod entry_hash_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::hash::decode_hex32;

    pub fn serialize<S: Serializer>(hash: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(hash))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_hex32(&s).map_err(serde::de::Error::custom)
    }
}
