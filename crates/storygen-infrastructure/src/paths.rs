//! Unified path management for StoryGen configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/storygen/          # Config directory
//! └── config.toml              # Service endpoints and keys
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for StoryGen.
pub struct StorygenPaths;

impl StorygenPaths {
    /// Returns the StoryGen configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("storygen"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path of the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
