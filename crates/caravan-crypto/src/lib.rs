//! Cryptographic primitives for Caravan.
//!
//! Provides the pluggable hash and signature capabilities the rest of the
//! system consumes: domain-separated BLAKE3 digests for record integrity,
//! subject blinding, and content addressing, plus ed25519 keys for author
//! provenance and gateway attestation.
//!
//! The sync core treats signatures as opaque byte strings; this crate is
//! where those bytes are actually produced (and can be checked).

pub mod hasher;
pub mod signer;

pub use hasher::{
    content_ref_of, integrity_hash_of, subject_hash_of, DomainHasher, HasherError,
};
pub use signer::{Signature, SignatureError, SigningKey, VerifyingKey};
