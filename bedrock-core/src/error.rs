//! Bedrock error types with clear, actionable messages

use std::path::PathBuf;
use thiserror::Error;

/// Protocol and store specific errors
///
/// A signature mismatch is deliberately not represented here: it is a
/// normal `VerificationResult::Failed` outcome, not an error.
#[derive(Error, Debug)]
pub enum BedrockError {
    /// No aggregate digest has been established yet
    #[error("No bedrock hash established.\n\nAggregate the principle store first:\n  bedrock principles hash")]
    MissingBedrockHash,

    /// Artifact or signature absent from the supplied input
    #[error("Could not find a matching artifact and signature pair.\n\nExpected an artifact together with its companion \"{expected}\".")]
    MissingCompanionFile { expected: String },

    /// More than one complete pair in the input set
    #[error("Ambiguous input: {} complete artifact/signature pairs present ({}).\n\nSupply exactly one artifact with its companion signature.", .candidates.len(), .candidates.join(", "))]
    AmbiguousPair { candidates: Vec<String> },

    /// Persisted bedrock hash failed store-boundary validation
    #[error("Malformed bedrock hash: expected a 64-character lowercase hex digest, found {found:?}.\n\nRegenerate it with:\n  bedrock principles hash")]
    MalformedBedrockHash { found: String },

    /// Unreadable or unwritable file at the I/O boundary
    #[error("I/O failure at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Note: We don't implement From<BedrockError> for anyhow::Error because
// anyhow already has a blanket implementation for all Error types.
