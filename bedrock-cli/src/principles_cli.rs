//! Principle store CLI commands
//!
//! Provides the user interface for managing the trusted baseline: add
//! documents, aggregate them into bedrock.hash, list the store.

use anyhow::{bail, Context, Result};
use bedrock_core::digest::digest_file;
use bedrock_core::{BedrockError, BedrockStore};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
pub enum PrinciplesCommand {
    /// Add a principle document to the store
    Add {
        /// Document to add
        file: PathBuf,

        /// Project directory (default: current directory)
        #[clap(long, default_value = ".")]
        root: PathBuf,
    },

    /// Aggregate the principle store into bedrock.hash
    Hash {
        /// Project directory (default: current directory)
        #[clap(long, default_value = ".")]
        root: PathBuf,
    },

    /// List principle documents and the current bedrock hash
    List {
        /// Project directory (default: current directory)
        #[clap(long, default_value = ".")]
        root: PathBuf,

        /// Show document digests
        #[clap(long)]
        hashes: bool,
    },
}

impl PrinciplesCommand {
    /// Execute the principles command
    pub async fn execute(&self) -> Result<()> {
        match self {
            PrinciplesCommand::Add { file, root } => principles_add(file, root).await,
            PrinciplesCommand::Hash { root } => principles_hash(root).await,
            PrinciplesCommand::List { root, hashes } => principles_list(root, *hashes).await,
        }
    }
}

/// Copy a document into the principle store
async fn principles_add(file: &Path, root: &Path) -> Result<()> {
    if !file.is_file() {
        bail!("File not found at {}", file.display());
    }

    let store = BedrockStore::new(root);
    let dest = store
        .add_principle(file)
        .with_context(|| format!("Failed to add {}", file.display()))?;

    println!("✅ Added principle: {}", file_name(&dest));
    println!("   Run 'bedrock principles hash' to update the bedrock hash");
    Ok(())
}

/// Aggregate the store and persist bedrock.hash
async fn principles_hash(root: &Path) -> Result<()> {
    let store = BedrockStore::new(root);

    let principles = store
        .principles()
        .context("Failed to list the principle store")?;
    if principles.is_empty() {
        println!("⚠️  No principle documents in store; hashing the empty set");
    }

    let bedrock = store
        .hash_principles()
        .context("Failed to aggregate the principle store")?;

    println!("✅ Generated bedrock.hash: {bedrock}");
    println!("   Written to: {}", store.hash_file().display());
    Ok(())
}

/// List principle documents and the current bedrock hash
async fn principles_list(root: &Path, show_hashes: bool) -> Result<()> {
    let store = BedrockStore::new(root);
    let principles = store
        .principles()
        .context("Failed to list the principle store")?;

    println!("📜 Principle documents:");
    println!("   Store: {}", store.principles_dir().display());

    if principles.is_empty() {
        println!("   (no principle documents)");
    }

    for path in &principles {
        if show_hashes {
            let digest = digest_file(path)
                .await
                .with_context(|| format!("Failed to digest {}", path.display()))?;
            println!("   {} [{}...]", file_name(path), &digest[..16]);
        } else {
            println!("   {}", file_name(path));
        }
    }

    match store.read_bedrock_hash() {
        Ok(bedrock) => println!("\n   Bedrock hash: {bedrock}"),
        Err(BedrockError::MissingBedrockHash) => {
            println!("\n   Bedrock hash: (not established; run 'bedrock principles hash')");
        }
        Err(e) => return Err(e).context("Failed to read bedrock.hash"),
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
