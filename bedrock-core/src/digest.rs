//! SHA-256 digest primitives for the bedrock protocol
//!
//! Every hash in the protocol is a 64-character lowercase hex SHA-256
//! digest. The fixed width is what keeps separator-free digest
//! concatenation in the aggregator and signer unambiguous.

use crate::error::BedrockError;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Width of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Compute the SHA-256 digest of a byte sequence as lowercase hex.
///
/// Pure and total: any byte sequence, including the empty one, has a
/// digest.
pub fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Digest a file's contents.
pub async fn digest_file(path: &Path) -> Result<String, BedrockError> {
    let contents = tokio::fs::read(path).await.map_err(|e| BedrockError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(digest(&contents))
}

/// Digest a file's contents synchronously (for non-async contexts).
///
/// Reads in 8 KiB chunks so large artifacts are never loaded whole.
pub fn digest_file_sync(path: &Path) -> Result<String, BedrockError> {
    let mut file = std::fs::File::open(path).map_err(|e| BedrockError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = file.read(&mut buffer).map_err(|e| BedrockError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}
