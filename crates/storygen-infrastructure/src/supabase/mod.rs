//! Supabase-backed integrations: auth session, document store, storage.

mod auth;
pub mod dto;
mod repository;
mod storage;

pub use auth::{AccountSession, SupabaseAuth};
pub use repository::SupabaseSessionRepository;
pub use storage::SupabaseStorage;
