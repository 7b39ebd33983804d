//! Bedrock aggregation - collapsing a set of principle documents into one
//! digest
//!
//! Each document is digested, the digests are sorted lexicographically, and
//! the sorted concatenation is digested again. Sorting the digests (not the
//! documents or their names) is what makes the aggregate a pure function of
//! the document *set*: supply order and file names never affect the result.

use crate::digest::{digest, DIGEST_HEX_LEN};
use crate::error::BedrockError;
use serde::Serialize;
use std::fmt;

/// Aggregate digest of the empty principle set (SHA-256 of the empty
/// string). Aggregating zero documents is well-defined, not an error.
pub const EMPTY_SET_DIGEST: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// The aggregate fingerprint of a set of principle documents.
///
/// Always a 64-character lowercase hex digest. Immutable once computed;
/// when the principle set changes the hash is recomputed from scratch and
/// replaced as a whole value.
///
/// Construction goes through [`aggregate`] or [`BedrockHash::parse`], so a
/// value of this type is always well-formed (serde support is
/// serialize-only for the same reason).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BedrockHash(String);

impl BedrockHash {
    /// Validate an externally supplied hash, e.g. the content of a
    /// `bedrock.hash` file. Incidental whitespace is trimmed.
    ///
    /// Anything that is not a 64-character lowercase hex digest is
    /// rejected: a variable-width value must never enter the fixed-width
    /// digest concatenation the signer relies on.
    pub fn parse(input: &str) -> Result<Self, BedrockError> {
        let trimmed = input.trim();
        let well_formed = trimmed.len() == DIGEST_HEX_LEN
            && trimmed.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !well_formed {
            return Err(BedrockError::MalformedBedrockHash {
                found: trimmed.to_string(),
            });
        }
        Ok(BedrockHash(trimmed.to_string()))
    }

    /// The hash as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BedrockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aggregate a set of principle documents into a [`BedrockHash`].
pub fn aggregate<I, B>(documents: I) -> BedrockHash
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let digests = documents
        .into_iter()
        .map(|doc| digest(doc.as_ref()))
        .collect();
    aggregate_digests(digests)
}

/// Aggregate from already computed document digests.
///
/// Used by callers that stream large documents through
/// [`digest_file_sync`](crate::digest::digest_file_sync) instead of holding
/// them in memory. Digests are sorted here, so any supply order yields the
/// same hash.
pub fn aggregate_digests(mut digests: Vec<String>) -> BedrockHash {
    digests.sort();
    BedrockHash(digest(digests.concat().as_bytes()))
}
