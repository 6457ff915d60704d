//! Custom cargo commands for the widget crate.
//!
//! Usage:
//!   cargo xtask build-wasm  - Build the browser bundle into pkg/
//!   cargo xtask test        - Run all tests
//!   cargo xtask check       - Quick check (fmt, clippy, tests, wasm target)
//!   cargo xtask safelist    - Regenerate the CSS class safelist

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Where the CSS build picks up classes that only exist inside the WASM.
const SAFELIST_PATH: &str = "static/sifter-safelist.txt";

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("build-wasm") => build_wasm()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("safelist") => safelist()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  build-wasm  Build the browser bundle (wasm-pack, --target web) into pkg/
  test        Run all Rust tests
  check       Quick check (cargo check for wasm32 + tests + clippy)
  safelist    Write the result template's CSS classes to {SAFELIST_PATH}
"#
    );
}

/// Build the browser bundle
fn build_wasm() -> Result<()> {
    let root = project_root()?;

    let status = Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-name",
            "sifter",
            "--no-default-features",
            "--features",
            "wasm",
        ])
        .current_dir(&root)
        .status()
        .context("Failed to run wasm-pack. Install it with: cargo install wasm-pack")?;

    if !status.success() {
        bail!("wasm-pack build failed");
    }

    println!("✓ Browser bundle written to pkg/");
    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check (wasm32)...");
    run_cargo(&[
        "check",
        "--lib",
        "--target",
        "wasm32-unknown-unknown",
        "--features",
        "wasm",
    ])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Regenerate the safelist through the CLI so it always matches the template
fn safelist() -> Result<()> {
    let root = project_root()?;
    let target = root.join(SAFELIST_PATH);
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let target = target.to_string_lossy().into_owned();
    run_cargo(&["run", "--quiet", "--bin", "sifter", "--", "safelist", "--output", &target])?;
    println!("✓ Safelist written to {}", SAFELIST_PATH);
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
