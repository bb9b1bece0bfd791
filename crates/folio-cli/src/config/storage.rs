//! Config file and cache directory locations.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::FileConfig;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Environment variable pointing at an explicit config file.
const CONFIG_ENV: &str = "FOLIO_CONFIG";

/// Environment variable pointing at an explicit cache directory.
const CACHE_DIR_ENV: &str = "FOLIO_CACHE_DIR";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "folio").context("Could not determine config directory")
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(project_dirs()?.config_dir().join("config.json"))
}

/// Get the cache directory.
pub fn cache_dir() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CACHE_DIR_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(project_dirs()?.cache_dir().to_path_buf())
}

/// Load the config file. A missing file is an empty config.
pub fn load_config() -> Result<FileConfig> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let json = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Write the config file, creating its directory.
pub fn save_config(config: &FileConfig) -> Result<PathBuf> {
    let path = config_path()?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Failed to create config directory")?;
    }

    let json = serde_json::to_string_pretty(config)?;
    fs::write(&path, json).context("Failed to write config file")?;

    // The file may hold an API token (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(path)
}
