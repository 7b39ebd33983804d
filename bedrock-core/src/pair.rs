//! File-pair matching - resolving an artifact and its companion signature
//! out of an unordered collection of files
//!
//! The canonical strategy is exact-companion: a file pairs with the file
//! named exactly `<name><suffix>`. Pairing by suffix alone is kept as a
//! fallback, applied only when exactly two files are supplied. With no
//! unambiguous pair the matcher refuses to guess.

use crate::error::BedrockError;
use std::path::Path;

/// Conventional suffix for companion signature files.
pub const SIGNATURE_SUFFIX: &str = ".sig";

/// A named byte sequence, typically a dropped or selected file.
#[derive(Debug, Clone)]
pub struct NamedFile {
    name: String,
    bytes: Vec<u8>,
}

impl NamedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, naming it after its final path component.
    pub async fn from_path(path: &Path) -> Result<Self, BedrockError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| BedrockError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// An artifact and its companion signature, borrowed from the matcher input.
#[derive(Debug)]
pub struct FilePair<'a> {
    pub artifact: &'a NamedFile,
    pub signature: &'a NamedFile,
}

impl FilePair<'_> {
    /// The signature file content decoded as text, trimmed.
    pub fn claimed_signature(&self) -> String {
        String::from_utf8_lossy(&self.signature.bytes)
            .trim()
            .to_string()
    }
}

/// Decide which files form the (artifact, signature) pair.
///
/// Exact-companion matching tolerates unrelated extra files: three files
/// where only two form a complete pair resolve to that pair. More than one
/// complete pair is `AmbiguousPair`. No complete pair falls back to
/// suffix-only matching when exactly two files were supplied, and is
/// `MissingCompanionFile` otherwise.
pub fn match_pair<'a>(files: &'a [NamedFile], suffix: &str) -> Result<FilePair<'a>, BedrockError> {
    let mut pairs: Vec<FilePair<'a>> = Vec::new();
    for artifact in files.iter().filter(|f| !f.name.ends_with(suffix)) {
        let companion = format!("{}{}", artifact.name, suffix);
        if let Some(signature) = files.iter().find(|f| f.name == companion) {
            pairs.push(FilePair {
                artifact,
                signature,
            });
        }
    }

    match pairs.len() {
        1 => Ok(pairs.remove(0)),
        0 => match_two_by_suffix(files, suffix),
        _ => Err(BedrockError::AmbiguousPair {
            candidates: pairs.iter().map(|p| p.artifact.name.clone()).collect(),
        }),
    }
}

/// Two-file fallback: whichever file carries the suffix signs the other.
fn match_two_by_suffix<'a>(
    files: &'a [NamedFile],
    suffix: &str,
) -> Result<FilePair<'a>, BedrockError> {
    if let [a, b] = files {
        match (a.name.ends_with(suffix), b.name.ends_with(suffix)) {
            (false, true) => {
                return Ok(FilePair {
                    artifact: a,
                    signature: b,
                })
            }
            (true, false) => {
                return Ok(FilePair {
                    artifact: b,
                    signature: a,
                })
            }
            _ => {}
        }
    }
    Err(BedrockError::MissingCompanionFile {
        expected: expected_companion(files, suffix),
    })
}

/// Name of the companion the caller most plausibly meant to supply.
fn expected_companion(files: &[NamedFile], suffix: &str) -> String {
    files
        .iter()
        .find(|f| !f.name.ends_with(suffix))
        .map(|f| format!("{}{}", f.name, suffix))
        .unwrap_or_else(|| format!("<artifact>{}", suffix))
}
