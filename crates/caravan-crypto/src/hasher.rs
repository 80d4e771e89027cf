use caravan_types::{ContentRef, IntegrityHash, SubjectHash, SubjectId};

/// Domain-separated BLAKE3 hasher.
///
/// Each hasher carries a domain tag (e.g. `"caravan-record-v1"`) that is
/// prepended to every computation. This prevents cross-type collisions: a
/// record body and a ledger entry with identical bytes produce different
/// digests.
pub struct DomainHasher {
    domain: &'static str,
}

impl DomainHasher {
    /// Hasher for record logical content (integrity hashes).
    pub const RECORD: Self = Self {
        domain: "caravan-record-v1",
    };
    /// Hasher for subject identifier blinding.
    pub const SUBJECT: Self = Self {
        domain: "caravan-subject-v1",
    };
    /// Hasher for content-store addressing.
    pub const CONTENT: Self = Self {
        domain: "caravan-content-v1",
    };
    /// Hasher for ledger entries.
    pub const ENTRY: Self = Self {
        domain: "caravan-entry-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        *hasher.finalize().as_bytes()
    }

    /// Hash a serializable value as JSON with domain separation.
    pub fn hash_json<T: serde::Serialize>(&self, value: &T) -> Result<[u8; 32], HasherError> {
        let data =
            serde_json::to_vec(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(self.hash(&data))
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &[u8; 32]) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

/// Integrity digest of a record's unencrypted logical content.
///
/// Deterministic: the same logical content always produces the same hash,
/// independent of any encryption nondeterminism in the payload.
pub fn integrity_hash_of(logical_content: &[u8]) -> IntegrityHash {
    IntegrityHash::from_hash(DomainHasher::RECORD.hash(logical_content))
}

/// One-way blinding of a subject identifier.
///
/// Two records about the same subject blind to the same value; the raw
/// identifier is unrecoverable from the hash.
pub fn subject_hash_of(subject: &SubjectId) -> SubjectHash {
    SubjectHash::from_hash(DomainHasher::SUBJECT.hash(subject.as_str().as_bytes()))
}

/// Content-addressed reference for stored bytes.
pub fn content_ref_of(data: &[u8]) -> ContentRef {
    ContentRef::from_hash(DomainHasher::CONTENT.hash(data))
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}
