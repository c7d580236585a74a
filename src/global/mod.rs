use anyhow::{Context, Result};
use std::path::PathBuf;

const OUTPUT_DIR: &str = "outputfiles";

/// Directory containing the running executable.
pub fn install_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to resolve current executable")?;
    exe.parent()
        .map(|dir| dir.to_path_buf())
        .context("Unable to determine executable directory")
}

/// Default destination for generated SQL files, next to the executable.
pub fn output_dir() -> Result<PathBuf> {
    Ok(install_dir()?.join(OUTPUT_DIR))
}
