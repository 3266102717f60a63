//! Domain layer for StoryGen.
//!
//! This crate contains the storyboard domain models, the consumed-service
//! interfaces (generative content, object storage, document store, auth),
//! prompt composition, and the shared error type. It performs no I/O.

pub mod auth;
pub mod config;
pub mod error;
pub mod genai;
pub mod session;
pub mod storage;

// Re-export common error type
pub use error::StorygenError;
