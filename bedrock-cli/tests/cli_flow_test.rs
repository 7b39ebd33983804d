//! Integration test suite for the bedrock binary
//!
//! Drives the compiled binary end to end: init, add principles, aggregate,
//! sign, verify. Every test targets a fresh temporary project directory
//! through --root, so tests stay independent and parallel-safe.

use anyhow::Result;
use bedrock_core::aggregate::EMPTY_SET_DIGEST;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the bedrock binary with the given arguments.
fn bedrock(args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_bedrock"))
        .args(args)
        .output()?;
    Ok(output)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Initialize a project with one principle document and a bedrock hash.
fn establish_project(root: &Path) -> Result<()> {
    let root_arg = root.to_str().unwrap();
    let principle = root.join("honesty.md");
    fs::write(&principle, "Always be honest.")?;

    let add = bedrock(&[
        "principles",
        "add",
        principle.to_str().unwrap(),
        "--root",
        root_arg,
    ])?;
    assert!(add.status.success(), "add failed: {}", stderr(&add));

    let hash = bedrock(&["principles", "hash", "--root", root_arg])?;
    assert!(hash.status.success(), "hash failed: {}", stderr(&hash));
    Ok(())
}

#[test]
fn test_init_creates_store_and_is_idempotent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root_arg = temp_dir.path().to_str().unwrap();

    let first = bedrock(&["init", "--root", root_arg])?;
    assert!(first.status.success(), "init failed: {}", stderr(&first));
    assert!(stdout(&first).contains("Bedrock initialized"));
    assert!(temp_dir.path().join(".bedrock/principles").is_dir());

    let second = bedrock(&["init", "--root", root_arg])?;
    assert!(second.status.success());
    assert!(stdout(&second).contains("already initialized"));
    Ok(())
}

#[test]
fn test_hash_output_matches_the_persisted_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root_arg = temp_dir.path().to_str().unwrap();
    establish_project(temp_dir.path())?;

    let output = bedrock(&["principles", "hash", "--root", root_arg])?;
    let printed = stdout(&output)
        .lines()
        .find_map(|line| {
            line.split("Generated bedrock.hash: ")
                .nth(1)
                .map(str::to_string)
        })
        .expect("hash line missing from output");

    let persisted = fs::read_to_string(temp_dir.path().join(".bedrock/bedrock.hash"))?;
    assert_eq!(persisted.trim(), printed.trim());
    Ok(())
}

#[test]
fn test_add_missing_file_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root_arg = temp_dir.path().to_str().unwrap();

    let output = bedrock(&["principles", "add", "no-such-file.md", "--root", root_arg])?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("File not found"));
    Ok(())
}

#[test]
fn test_hash_of_empty_store_warns_and_writes_the_empty_set_digest() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root_arg = temp_dir.path().to_str().unwrap();

    let output = bedrock(&["principles", "hash", "--root", root_arg])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("No principle documents in store"));
    assert!(stdout(&output).contains(EMPTY_SET_DIGEST));
    Ok(())
}

#[test]
fn test_sign_without_bedrock_hash_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root_arg = temp_dir.path().to_str().unwrap();
    let artifact = temp_dir.path().join("report.md");
    fs::write(&artifact, "output")?;

    let output = bedrock(&["sign", artifact.to_str().unwrap(), "--root", root_arg])?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No bedrock hash established"));
    Ok(())
}

#[test]
fn test_sign_then_verify_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root_arg = temp_dir.path().to_str().unwrap();
    establish_project(temp_dir.path())?;

    let artifact = temp_dir.path().join("report.md");
    fs::write(&artifact, "Model output under review.")?;

    let sign = bedrock(&["sign", artifact.to_str().unwrap(), "--root", root_arg])?;
    assert!(sign.status.success(), "sign failed: {}", stderr(&sign));
    assert!(temp_dir.path().join("report.md.sig").is_file());

    let verify = bedrock(&["verify", artifact.to_str().unwrap(), "--root", root_arg])?;
    assert!(verify.status.success());
    assert!(stdout(&verify).contains("VERIFIED"));
    assert!(stdout(&verify).contains("is aligned."));
    Ok(())
}

#[test]
fn test_tampered_artifact_fails_with_exit_code_one() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root_arg = temp_dir.path().to_str().unwrap();
    establish_project(temp_dir.path())?;

    let artifact = temp_dir.path().join("report.md");
    fs::write(&artifact, "original output")?;
    let sign = bedrock(&["sign", artifact.to_str().unwrap(), "--root", root_arg])?;
    assert!(sign.status.success());

    fs::write(&artifact, "tampered output")?;

    let verify = bedrock(&["verify", artifact.to_str().unwrap(), "--root", root_arg])?;
    assert_eq!(verify.status.code(), Some(1));
    assert!(stdout(&verify).contains("FAILED"));
    assert!(stdout(&verify).contains("is NOT aligned."));
    Ok(())
}

#[test]
fn test_verify_without_sidecar_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root_arg = temp_dir.path().to_str().unwrap();
    establish_project(temp_dir.path())?;

    let artifact = temp_dir.path().join("report.md");
    fs::write(&artifact, "output")?;

    let output = bedrock(&["verify", artifact.to_str().unwrap(), "--root", root_arg])?;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("companion"));
    Ok(())
}

#[test]
fn test_verify_json_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root_arg = temp_dir.path().to_str().unwrap();
    establish_project(temp_dir.path())?;

    let artifact = temp_dir.path().join("report.md");
    fs::write(&artifact, "output")?;
    let sign = bedrock(&["sign", artifact.to_str().unwrap(), "--root", root_arg])?;
    assert!(sign.status.success());

    let verify = bedrock(&[
        "verify",
        artifact.to_str().unwrap(),
        "--root",
        root_arg,
        "--json",
    ])?;
    assert!(verify.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&verify))?;
    assert_eq!(value["status"], "verified");
    assert_eq!(value["artifact"], artifact.to_str().unwrap());
    Ok(())
}

#[test]
fn test_verify_resolves_an_explicit_file_pair() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root_arg = temp_dir.path().to_str().unwrap();
    establish_project(temp_dir.path())?;

    let artifact = temp_dir.path().join("report.md");
    fs::write(&artifact, "output")?;
    let sign = bedrock(&["sign", artifact.to_str().unwrap(), "--root", root_arg])?;
    assert!(sign.status.success());

    let sidecar = temp_dir.path().join("report.md.sig");
    let verify = bedrock(&[
        "verify",
        artifact.to_str().unwrap(),
        sidecar.to_str().unwrap(),
        "--root",
        root_arg,
    ])?;
    assert!(verify.status.success(), "verify failed: {}", stderr(&verify));
    assert!(stdout(&verify).contains("VERIFIED: report.md is aligned."));
    Ok(())
}

#[test]
fn test_rehashing_the_store_invalidates_existing_signatures() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root_arg = temp_dir.path().to_str().unwrap();
    establish_project(temp_dir.path())?;

    let artifact = temp_dir.path().join("report.md");
    fs::write(&artifact, "output")?;
    let sign = bedrock(&["sign", artifact.to_str().unwrap(), "--root", root_arg])?;
    assert!(sign.status.success());

    // Grow the trusted baseline and re-aggregate.
    let extra = temp_dir.path().join("safety.md");
    fs::write(&extra, "First, do no harm.")?;
    let add = bedrock(&["principles", "add", extra.to_str().unwrap(), "--root", root_arg])?;
    assert!(add.status.success());
    let hash = bedrock(&["principles", "hash", "--root", root_arg])?;
    assert!(hash.status.success());

    let verify = bedrock(&["verify", artifact.to_str().unwrap(), "--root", root_arg])?;
    assert_eq!(verify.status.code(), Some(1));
    assert!(stdout(&verify).contains("is NOT aligned."));
    Ok(())
}

#[test]
fn test_principles_list_shows_documents_and_hash_status() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root_arg = temp_dir.path().to_str().unwrap();
    establish_project(temp_dir.path())?;

    let list = bedrock(&["principles", "list", "--root", root_arg])?;
    assert!(list.status.success());
    assert!(stdout(&list).contains("honesty.md"));
    assert!(stdout(&list).contains("Bedrock hash:"));

    let with_hashes = bedrock(&["principles", "list", "--hashes", "--root", root_arg])?;
    assert!(with_hashes.status.success());
    assert!(stdout(&with_hashes).contains("honesty.md ["));
    Ok(())
}
