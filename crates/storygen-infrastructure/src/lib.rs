//! Infrastructure implementations for StoryGen.
//!
//! This crate provides the concrete backends behind the traits defined in
//! `storygen-core`:
//!
//! - `gemini` — Gemini image/video/structured-text generation client
//! - `resolver` — HTTP reference image resolver
//! - `supabase` — auth session, session document store, media storage
//! - `config_loader` — TOML configuration with environment overrides
//! - `paths` — platform config file locations

pub mod config_loader;
pub mod gemini;
pub mod paths;
pub mod resolver;
pub mod supabase;

pub use config_loader::load_config;
pub use gemini::GeminiClient;
pub use paths::StorygenPaths;
pub use resolver::HttpReferenceResolver;
pub use supabase::{AccountSession, SupabaseAuth, SupabaseSessionRepository, SupabaseStorage};
