//! Object storage service interface.
//!
//! Generated media is uploaded to external object storage and referenced by
//! its public URL afterwards. Paths are caller-generated as
//! `prefix/timestamp_random.ext`, which guarantees no collisions without
//! server coordination.

use crate::error::Result;
use async_trait::async_trait;
use rand::Rng;

/// Uploads encoded media and returns its public URL.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, mime_type: &str, path: &str) -> Result<String>;
}

/// Generates a unique storage path of the form `prefix/timestamp_random.ext`.
pub fn media_path(prefix: &str, ext: &str) -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let timestamp = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let random: String = (0..7)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("{}/{}_{}.{}", prefix, timestamp, random, ext)
}
