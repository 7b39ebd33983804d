//! Session-owned bedrock hash
//!
//! The current bedrock hash is explicit session state, never module state.
//! It is replaced atomically as a whole value, and every signing or
//! verification call reads it from the session that owns it.

use crate::aggregate::BedrockHash;
use crate::error::BedrockError;
use crate::pair::{match_pair, NamedFile, SIGNATURE_SUFFIX};
use crate::signer::{sign, Signature};
use crate::verifier::{verify, VerificationResult};
use serde::Serialize;
use tracing::debug;

/// Owner of the current bedrock hash for one logical caller.
#[derive(Debug, Default)]
pub struct Session {
    bedrock: Option<BedrockHash>,
}

/// A verification outcome naming the artifact it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairVerdict {
    pub artifact: String,
    #[serde(flatten)]
    pub result: VerificationResult,
}

impl Session {
    /// Session with no bedrock hash established.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with a bedrock hash already established.
    pub fn with_bedrock(bedrock: BedrockHash) -> Self {
        Self {
            bedrock: Some(bedrock),
        }
    }

    /// Replace the current bedrock hash, returning the previous one.
    pub fn establish(&mut self, bedrock: BedrockHash) -> Option<BedrockHash> {
        debug!(bedrock = %bedrock, "Establishing session bedrock hash");
        self.bedrock.replace(bedrock)
    }

    /// Drop the current bedrock hash.
    pub fn clear(&mut self) {
        self.bedrock = None;
    }

    pub fn bedrock(&self) -> Option<&BedrockHash> {
        self.bedrock.as_ref()
    }

    pub fn is_established(&self) -> bool {
        self.bedrock.is_some()
    }

    /// Sign artifact bytes under the session's bedrock hash.
    ///
    /// Fails fast before any hashing work when no hash is established.
    pub fn sign(&self, artifact: &[u8]) -> Result<Signature, BedrockError> {
        let bedrock = self
            .bedrock
            .as_ref()
            .ok_or(BedrockError::MissingBedrockHash)?;
        Ok(sign(artifact, bedrock))
    }

    /// Verify artifact bytes against a claimed signature.
    ///
    /// An unestablished session is a could-not-check `Error`, not a
    /// verification failure.
    pub fn verify(&self, artifact: &[u8], claimed_signature: &str) -> VerificationResult {
        match &self.bedrock {
            Some(bedrock) => verify(artifact, claimed_signature, bedrock),
            None => VerificationResult::Error("no bedrock hash established".to_string()),
        }
    }

    /// Match an (artifact, signature) pair out of `files`, then verify it.
    pub fn verify_pair(&self, files: &[NamedFile]) -> Result<PairVerdict, BedrockError> {
        let pair = match_pair(files, SIGNATURE_SUFFIX)?;
        let result = self.verify(pair.artifact.bytes(), &pair.claimed_signature());
        Ok(PairVerdict {
            artifact: pair.artifact.name().to_string(),
            result,
        })
    }
}
