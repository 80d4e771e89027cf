use crate::error::QueueResult;

/// Capability that seals a record's logical content into the opaque payload
/// blob.
///
/// Field-level encryption is an external collaborator: the queue hands the
/// unencrypted logical content in and stores whatever comes out, without
/// ever inspecting it again. The integrity hash is computed over the input,
/// not the output, so nondeterministic ciphers do not disturb it.
pub trait PayloadEncryptor: Send + Sync {
    fn seal(&self, plaintext: &[u8]) -> QueueResult<Vec<u8>>;
}

/// Stand-in encryptor that passes content through unchanged.
///
/// For tests and deployments where at-rest encryption happens in an outer
/// layer. Production devices inject their real cipher at this seam.
pub struct PassthroughEncryptor;

impl PayloadEncryptor for PassthroughEncryptor {
    fn seal(&self, plaintext: &[u8]) -> QueueResult<Vec<u8>> {
        Ok(plaintext.to_vec())
    }
}
