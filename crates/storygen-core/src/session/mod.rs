//! Session domain module.
//!
//! This module contains the storyboard session domain models, the style
//! catalog, and the repository interface for session persistence.

mod model;
mod repository;
pub mod style;

pub use model::{Asset, AssetKind, AspectRatio, ProjectConfig, Session, Shot, UNTITLED_TITLE};
pub use repository::SessionRepository;
pub use style::{STORY_STYLES, StoryStyle, style_by_id};
