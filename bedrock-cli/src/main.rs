//! Bedrock - content-addressed trust chain over principle documents
//!
//! Main entry point: principle store management, artifact signing and
//! verification against the aggregate bedrock hash.

use anyhow::{Context, Result};
use bedrock_core::pair::NamedFile;
use bedrock_core::session::PairVerdict;
use bedrock_core::verifier::VerificationResult;
use bedrock_core::{BedrockStore, Session};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod principles_cli;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "bedrock",
    about = "Content-addressed trust chain over principle documents",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "info", global = true)]
    log_level: LogLevel,
}

#[derive(Parser, Debug)]
enum Command {
    /// Initialize the principle store
    Init {
        /// Project directory (default: current directory)
        #[clap(long, default_value = ".")]
        root: PathBuf,
    },

    /// Manage principle documents and the bedrock hash
    Principles {
        #[clap(subcommand)]
        command: principles_cli::PrinciplesCommand,
    },

    /// Sign an artifact under the current bedrock hash
    Sign {
        /// Artifact to sign
        artifact: PathBuf,

        /// Project directory (default: current directory)
        #[clap(long, default_value = ".")]
        root: PathBuf,
    },

    /// Verify an artifact against its signature
    Verify {
        /// One artifact path (sidecar convention), or several files to
        /// resolve into an artifact/signature pair
        #[clap(required = true)]
        paths: Vec<PathBuf>,

        /// Project directory (default: current directory)
        #[clap(long, default_value = ".")]
        root: PathBuf,

        /// Output the outcome as JSON
        #[clap(long)]
        json: bool,
    },
}

/// Initialize tracing with CLI flags
fn initialize_tracing(log_level: &LogLevel) {
    let filter = EnvFilter::new(log_level.to_filter_directive());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Logs to stderr; stdout is reserved for command output
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    match cli.command {
        Command::Init { root } => init_command(root).await,
        Command::Principles { command } => command.execute().await,
        Command::Sign { artifact, root } => sign_command(artifact, root).await,
        Command::Verify { paths, root, json } => verify_command(paths, root, json).await,
    }
}

async fn init_command(root: PathBuf) -> Result<()> {
    let store = BedrockStore::new(&root);

    if store.is_initialized() {
        println!("✅ Bedrock already initialized");
        println!("   Principle store: {}", store.principles_dir().display());
        return Ok(());
    }

    store
        .init()
        .context("Failed to initialize the bedrock store")?;

    println!("✅ Bedrock initialized");
    println!("   Principle store: {}", store.principles_dir().display());
    println!("   Add principle documents with 'bedrock principles add <file>'");
    Ok(())
}

async fn sign_command(artifact: PathBuf, root: PathBuf) -> Result<()> {
    debug!("Signing {:?} against bedrock store in {:?}", artifact, root);
    let store = BedrockStore::new(&root);

    let signed = store
        .sign_artifact(&artifact)
        .with_context(|| format!("Failed to sign {}", artifact.display()))?;

    println!("✅ Signed {}", artifact.display());
    println!("   Signature: {}", signed.signature);
    println!("   Sidecar:   {}", signed.sidecar.display());
    Ok(())
}

async fn verify_command(paths: Vec<PathBuf>, root: PathBuf, json: bool) -> Result<()> {
    debug!("Verifying {} path(s) against bedrock store in {:?}", paths.len(), root);
    let store = BedrockStore::new(&root);

    let verdict = if let [artifact] = paths.as_slice() {
        // Single path: the artifact's <name>.sig sidecar is the signature.
        let result = store
            .verify_artifact(artifact)
            .with_context(|| format!("Failed to verify {}", artifact.display()))?;
        PairVerdict {
            artifact: artifact.display().to_string(),
            result,
        }
    } else {
        // Several paths: resolve the artifact/signature pair by name.
        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            let file = NamedFile::from_path(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            files.push(file);
        }

        let bedrock = store
            .read_bedrock_hash()
            .context("Failed to load the bedrock hash")?;
        Session::with_bedrock(bedrock).verify_pair(&files)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        match &verdict.result {
            VerificationResult::Verified => {
                println!("✅ VERIFIED: {} is aligned.", verdict.artifact);
            }
            VerificationResult::Failed(_) => {
                println!("❌ FAILED: {} is NOT aligned.", verdict.artifact);
            }
            VerificationResult::Error(reason) => {
                println!("❌ ERROR: could not verify {}: {}", verdict.artifact, reason);
            }
        }
    }

    if !verdict.result.is_verified() {
        std::process::exit(1);
    }
    Ok(())
}
