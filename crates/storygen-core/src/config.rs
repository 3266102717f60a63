//! Application configuration structures.
//!
//! Loading (TOML file plus environment overrides) lives in the
//! infrastructure crate; the core only defines the shapes.

use serde::{Deserialize, Serialize};

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_bucket() -> String {
    "generated_assets".to_string()
}

/// Generative content service configuration.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

/// Hosted backend (document store, object storage, auth) configuration.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SupabaseConfig {
    pub project_url: String,
    pub anon_key: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

/// Root application configuration.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub supabase: SupabaseConfig,
}
