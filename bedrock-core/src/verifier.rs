//! Signature verification
//!
//! Verification recomputes the signature derivation and compares it against
//! the claimed value. The outcome distinguishes a completed check that came
//! back negative (`Failed`) from a check that could not run at all
//! (`Error`): a tampered artifact fails, an empty signature file errors.

use crate::aggregate::BedrockHash;
use crate::digest::digest;
use crate::signer::sign_digest;
use serde::Serialize;

/// Outcome of checking one artifact against one claimed signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum VerificationResult {
    /// The claimed signature matches the recomputed one.
    Verified,
    /// The check ran to completion and the signatures differ.
    Failed(String),
    /// The check could not be performed.
    Error(String),
}

impl VerificationResult {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationResult::Verified)
    }

    /// The failure or error reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            VerificationResult::Verified => None,
            VerificationResult::Failed(reason) | VerificationResult::Error(reason) => Some(reason),
        }
    }
}

/// Verify artifact bytes against a claimed signature under a bedrock hash.
///
/// Surrounding whitespace on the claimed signature is ignored, so a
/// signature file with a trailing newline verifies cleanly.
pub fn verify(
    artifact: &[u8],
    claimed_signature: &str,
    bedrock: &BedrockHash,
) -> VerificationResult {
    verify_digest(&digest(artifact), claimed_signature, bedrock)
}

/// Verify from a precomputed artifact digest.
pub fn verify_digest(
    artifact_digest: &str,
    claimed_signature: &str,
    bedrock: &BedrockHash,
) -> VerificationResult {
    let claimed = claimed_signature.trim();
    if claimed.is_empty() {
        return VerificationResult::Error("claimed signature is empty".to_string());
    }

    let expected = sign_digest(artifact_digest, bedrock);
    if claimed == expected.as_str() {
        VerificationResult::Verified
    } else {
        VerificationResult::Failed("signature mismatch".to_string())
    }
}
