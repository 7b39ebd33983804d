//! Bedrock - content-addressed trust chain over principle documents
//!
//! A set of principle documents is collapsed into one aggregate digest (the
//! bedrock hash); artifacts are signed against that digest and verified
//! later by recomputing the signature.
//!
//! Design principles:
//! - Pure protocol core - digesting, aggregation, signing and verification
//!   never touch the filesystem
//! - Explicit state - the current bedrock hash is owned by a [`Session`] or
//!   persisted by a [`BedrockStore`], never held in module-level globals
//! - Industry standard crypto - SHA-256 hashing, hex-encoded digests

pub mod aggregate;
pub mod digest;
pub mod error;
pub mod pair;
pub mod session;
pub mod signer;
pub mod store;
pub mod verifier;

pub use aggregate::BedrockHash;
pub use error::BedrockError;
pub use session::Session;
pub use signer::Signature;
pub use store::BedrockStore;
pub use verifier::VerificationResult;
