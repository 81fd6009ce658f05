//! Home directory and configuration path resolution.

use std::path::PathBuf;

use crate::error::{ConnectError, Result};

/// File name of the skiff configuration file, resolved under the home
/// directory. The contents are owned by the CLI's config layer.
pub const CONFIG_FILE_NAME: &str = ".skiffrc";

/// Returns the path to the user's home directory.
///
/// Reads `HOME` first (*nix), then `USERPROFILE` (Windows); an empty value
/// counts as unset.
pub fn resolve_home_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var("USERPROFILE").ok().filter(|v| !v.is_empty()))
        .ok_or(ConnectError::HomeNotFound)?;

    Ok(PathBuf::from(home))
}

/// Returns the path to the skiff configuration file.
pub fn resolve_config_path() -> Result<PathBuf> {
    Ok(resolve_home_dir()?.join(CONFIG_FILE_NAME))
}
