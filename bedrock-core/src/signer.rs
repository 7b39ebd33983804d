//! Artifact signing - binding an artifact digest to a bedrock hash
//!
//! A signature is `digest(digest(artifact) + bedrock)`: plain string
//! concatenation of the two hex digests, artifact digest first. The
//! verifier recomputes the same derivation, so the operand order here is
//! part of the protocol.

use crate::aggregate::BedrockHash;
use crate::digest::digest;
use serde::Serialize;
use std::fmt;

/// Hex digest binding one artifact to one bedrock hash.
///
/// Valid only under the exact bedrock hash that produced it: re-aggregating
/// the principle set invalidates every previously issued signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    /// The signature as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sign artifact bytes under the given bedrock hash.
///
/// Deterministic: identical artifact and bedrock hash always yield the
/// identical signature. There is no randomness or salt.
pub fn sign(artifact: &[u8], bedrock: &BedrockHash) -> Signature {
    sign_digest(&digest(artifact), bedrock)
}

/// Sign from a precomputed artifact digest.
///
/// Lets callers that stream large artifacts digest them once and derive
/// the signature from the digest.
pub fn sign_digest(artifact_digest: &str, bedrock: &BedrockHash) -> Signature {
    let combined = format!("{}{}", artifact_digest, bedrock.as_str());
    Signature(digest(combined.as_bytes()))
}
