//! Cooperative cancellation and stale-response guards.
//!
//! Generation calls cannot be aborted once they are in flight; cancellation
//! only suppresses the side effect of a result that is no longer wanted.
//! Two mechanisms cover the two failure shapes:
//!
//! - [`CancellationRegistry`] holds per-entity cancellation markers that are
//!   set by a user "stop" request and checked after the call resolves.
//! - [`RequestTokens`] issues a monotonic token per entity so that when two
//!   generations for the same entity overlap, only the latest one is allowed
//!   to commit its result.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Per-entity cancellation marker set.
#[derive(Default)]
pub struct CancellationRegistry {
    cancelled: Mutex<HashSet<String>>,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cancellation request for the given entity.
    pub fn request(&self, id: &str) {
        self.cancelled.lock().unwrap().insert(id.to_string());
    }

    /// Removes any stale marker before a new generation starts.
    pub fn clear(&self, id: &str) {
        self.cancelled.lock().unwrap().remove(id);
    }

    /// Consumes the marker for the given entity, returning whether
    /// cancellation was requested while the call was in flight.
    pub fn take(&self, id: &str) -> bool {
        self.cancelled.lock().unwrap().remove(id)
    }
}

/// Monotonic request tokens, one counter per entity.
///
/// A caller takes a token with [`issue`](Self::issue) before starting a
/// generation and checks [`is_latest`](Self::is_latest) when the response
/// arrives. A response holding a superseded token must not write media or
/// clear transient flags; the newer request owns both.
#[derive(Default)]
pub struct RequestTokens {
    latest: Mutex<HashMap<String, u64>>,
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next token for the given entity.
    pub fn issue(&self, id: &str) -> u64 {
        let mut latest = self.latest.lock().unwrap();
        let counter = latest.entry(id.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Whether the given token is still the latest issued for the entity.
    pub fn is_latest(&self, id: &str, token: u64) -> bool {
        self.latest.lock().unwrap().get(id).copied() == Some(token)
    }
}
