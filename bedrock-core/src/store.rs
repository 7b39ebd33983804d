//! On-disk bedrock store
//!
//! Layout, rooted at a project directory:
//!
//! ```text
//! <root>/.bedrock/
//!     principles/    copies of added principle documents
//!     bedrock.hash   64-char lowercase hex, trailing newline
//! <artifact>.sig     sidecar next to the artifact it signs
//! ```
//!
//! Reads trim trailing whitespace and writes append a single newline, so
//! the persisted hex files round-trip either way.

use crate::aggregate::{aggregate_digests, BedrockHash};
use crate::digest::digest_file_sync;
use crate::error::BedrockError;
use crate::pair::SIGNATURE_SUFFIX;
use crate::signer::{sign_digest, Signature};
use crate::verifier::{verify_digest, VerificationResult};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const BEDROCK_DIR: &str = ".bedrock";
pub const PRINCIPLES_DIR: &str = "principles";
pub const HASH_FILE: &str = "bedrock.hash";

/// A freshly written signature together with its sidecar path.
#[derive(Debug)]
pub struct SignedArtifact {
    pub signature: Signature,
    pub sidecar: PathBuf,
}

/// Filesystem-backed principle store and bedrock hash.
#[derive(Debug, Clone)]
pub struct BedrockStore {
    root: PathBuf,
}

impl BedrockStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bedrock_dir(&self) -> PathBuf {
        self.root.join(BEDROCK_DIR)
    }

    pub fn principles_dir(&self) -> PathBuf {
        self.bedrock_dir().join(PRINCIPLES_DIR)
    }

    pub fn hash_file(&self) -> PathBuf {
        self.bedrock_dir().join(HASH_FILE)
    }

    pub fn is_initialized(&self) -> bool {
        self.principles_dir().is_dir()
    }

    /// Create the store directories. Idempotent.
    pub fn init(&self) -> Result<(), BedrockError> {
        let principles = self.principles_dir();
        fs::create_dir_all(&principles).map_err(|e| BedrockError::Io {
            path: principles.clone(),
            source: e,
        })?;
        debug!(root = %self.root.display(), "Bedrock store initialized");
        Ok(())
    }

    /// Copy a document into the principle store, preserving its file name.
    pub fn add_principle(&self, source: &Path) -> Result<PathBuf, BedrockError> {
        self.init()?;
        let name = source.file_name().ok_or_else(|| BedrockError::Io {
            path: source.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file path"),
        })?;
        let dest = self.principles_dir().join(name);
        fs::copy(source, &dest).map_err(|e| BedrockError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        debug!(principle = %dest.display(), "Added principle document");
        Ok(dest)
    }

    /// Principle file paths, sorted by file name.
    ///
    /// The sort gives a stable listing; aggregation orders by digest, so
    /// file names never influence the bedrock hash.
    pub fn principles(&self) -> Result<Vec<PathBuf>, BedrockError> {
        let dir = self.principles_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&dir).map_err(|e| BedrockError::Io {
            path: dir.clone(),
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BedrockError::Io {
                path: dir.clone(),
                source: e,
            })?;
            if entry.path().is_file() {
                paths.push(entry.path());
            }
        }
        paths.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
        Ok(paths)
    }

    /// Digest every principle document, aggregate, and persist the result.
    ///
    /// An empty store still writes the well-defined empty-set digest.
    pub fn hash_principles(&self) -> Result<BedrockHash, BedrockError> {
        self.init()?;
        let principles = self.principles()?;
        if principles.is_empty() {
            warn!("No principle documents in store; hashing the empty set");
        }

        let mut digests = Vec::with_capacity(principles.len());
        for path in &principles {
            digests.push(digest_file_sync(path)?);
        }
        let bedrock = aggregate_digests(digests);
        self.write_bedrock_hash(&bedrock)?;
        debug!(bedrock = %bedrock, principles = principles.len(), "Aggregated principle store");
        Ok(bedrock)
    }

    /// The persisted bedrock hash, validated on the way in.
    pub fn read_bedrock_hash(&self) -> Result<BedrockHash, BedrockError> {
        let path = self.hash_file();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BedrockError::MissingBedrockHash);
            }
            Err(e) => return Err(BedrockError::Io { path, source: e }),
        };
        if content.trim().is_empty() {
            return Err(BedrockError::MissingBedrockHash);
        }
        BedrockHash::parse(&content)
    }

    fn write_bedrock_hash(&self, bedrock: &BedrockHash) -> Result<(), BedrockError> {
        let path = self.hash_file();
        fs::write(&path, format!("{}\n", bedrock.as_str())).map_err(|e| BedrockError::Io {
            path,
            source: e,
        })
    }

    /// Sign an artifact under the persisted bedrock hash and write the
    /// `<artifact>.sig` sidecar.
    pub fn sign_artifact(&self, artifact: &Path) -> Result<SignedArtifact, BedrockError> {
        // Precondition first, before any hashing work.
        let bedrock = self.read_bedrock_hash()?;

        let artifact_digest = digest_file_sync(artifact)?;
        let signature = sign_digest(&artifact_digest, &bedrock);

        let sidecar = sidecar_path(artifact);
        fs::write(&sidecar, format!("{}\n", signature.as_str())).map_err(|e| {
            BedrockError::Io {
                path: sidecar.clone(),
                source: e,
            }
        })?;
        debug!(artifact = %artifact.display(), sidecar = %sidecar.display(), "Signed artifact");
        Ok(SignedArtifact { signature, sidecar })
    }

    /// Verify an artifact against its `<artifact>.sig` sidecar.
    ///
    /// A signature mismatch is an `Ok(Failed(..))`. `Err` means the check
    /// could not run at all: no bedrock hash, no sidecar, unreadable file.
    pub fn verify_artifact(&self, artifact: &Path) -> Result<VerificationResult, BedrockError> {
        let bedrock = self.read_bedrock_hash()?;

        let sidecar = sidecar_path(artifact);
        let claimed = match fs::read_to_string(&sidecar) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BedrockError::MissingCompanionFile {
                    expected: sidecar.display().to_string(),
                });
            }
            Err(e) => {
                return Err(BedrockError::Io {
                    path: sidecar,
                    source: e,
                })
            }
        };

        let artifact_digest = digest_file_sync(artifact)?;
        Ok(verify_digest(&artifact_digest, &claimed, &bedrock))
    }
}

/// The conventional sidecar path for an artifact: `<path>.sig`.
pub fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut path = OsString::from(artifact.as_os_str());
    path.push(SIGNATURE_SUFFIX);
    PathBuf::from(path)
}
