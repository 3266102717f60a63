//! Configuration loading.
//!
//! The TOML file at the platform config location supplies service endpoints
//! and keys; environment variables override the secrets so keys never have
//! to live on disk.

use crate::paths::StorygenPaths;
use storygen_core::config::AppConfig;
use storygen_core::error::{Result, StorygenError};

/// Environment variable overriding the Gemini API key.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Environment variable overriding the Supabase project URL.
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
/// Environment variable overriding the Supabase anon key.
pub const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";

/// Loads the application configuration from the default location, applying
/// environment overrides.
pub fn load_config() -> Result<AppConfig> {
    let path = StorygenPaths::config_file()
        .map_err(|e| StorygenError::internal(format!("Config path resolution failed: {e}")))?;
    let contents = std::fs::read_to_string(&path).map_err(|e| {
        StorygenError::internal(format!("Failed to read {}: {e}", path.display()))
    })?;
    let mut config = parse_config(&contents)?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Parses a TOML configuration document.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| StorygenError::Serialization {
        format: "TOML".to_string(),
        message: e.to_string(),
    })
}

/// Applies environment overrides from the given lookup.
pub fn apply_env_overrides(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(key) = lookup(ENV_GEMINI_API_KEY) {
        config.gemini.api_key = key;
    }
    if let Some(url) = lookup(ENV_SUPABASE_URL) {
        config.supabase.project_url = url;
    }
    if let Some(key) = lookup(ENV_SUPABASE_ANON_KEY) {
        config.supabase.anon_key = key;
    }
}
