//! Application layer for StoryGen.
//!
//! Hosts the [`StoryboardOrchestrator`] use case plus the pieces it owns:
//! the debounced autosave timer, cooperative cancellation, and the
//! production-sheet export.

pub mod autosave;
pub mod cancel;
pub mod export;
pub mod orchestrator;

#[cfg(test)]
mod orchestrator_test;

pub use autosave::{AUTOSAVE_DELAY, Autosaver};
pub use cancel::{CancellationRegistry, RequestTokens};
pub use export::production_sheet;
pub use orchestrator::{Lifecycle, MoveDirection, StoryboardOrchestrator};
