//! Prompt composition.
//!
//! Each generation kind (asset, frame, video, shotlist, bridge shot) has a
//! pure composition function so the exact strings sent to the generator are
//! independently testable.

use crate::session::{Asset, Shot, StoryStyle};

/// Composes the descriptive prompt for a cast asset image.
pub fn compose_asset_prompt(asset: &Asset, style: &StoryStyle) -> String {
    let user_part = if asset.prompt.is_empty() {
        String::new()
    } else {
        format!("{}. ", asset.prompt)
    };
    format!(
        "Professional {} design: {}{}. Style: {}. Full body view, neutral background.",
        asset.kind.as_str(),
        user_part,
        asset.name,
        style.prompt
    )
}

/// Composes the prompt for a storyboard frame, instructing the generator to
/// stay consistent with the supplied references.
pub fn compose_frame_prompt(shot: &Shot, style: &StoryStyle) -> String {
    format!(
        "Storyboard frame: {}. Context: {}. Style: {}. Please ensure visual consistency with the provided character/object references.",
        shot.frame_description, shot.scene_description, style.prompt
    )
}

/// Composes the cinematic prompt for a shot's video clip.
pub fn compose_video_prompt(shot: &Shot, style: &StoryStyle) -> String {
    format!(
        "Cinematic video: {}. Narrative: {}. Style: {}.",
        shot.frame_description, shot.scene_description, style.name
    )
}

/// Composes the shotlist synthesis instruction.
///
/// The duration and count constraints are spelled out explicitly: a given
/// target duration is a hard ceiling, a given shot count is exact.
pub fn compose_shotlist_prompt(
    concept: &str,
    asset_names: &str,
    target_duration: Option<u32>,
    num_shots: Option<u32>,
) -> String {
    let duration_instruction = match target_duration {
        Some(secs) => format!(
            "The total duration of all shots combined MUST NOT exceed {} seconds.",
            secs
        ),
        None => "Estimate a reasonable total duration for this concept based on its complexity."
            .to_string(),
    };
    let count_instruction = match num_shots {
        Some(count) => format!("You MUST generate EXACTLY {} shots.", count),
        None => "Generate a suitable number of shots (typically 4-8) to cover the narrative arc."
            .to_string(),
    };
    format!(
        "Create a professional storyboard shotlist for the following story concept: \"{}\". Relevant characters/objects: {}. {} {} Return as a clean JSON array.",
        concept, asset_names, duration_instruction, count_instruction
    )
}

/// Composes the instruction for a single bridge shot connecting the story
/// flow before and after a position.
pub fn compose_bridge_prompt(
    concept: &str,
    asset_names: &str,
    flow_before: &str,
    flow_after: &str,
) -> String {
    let before = if flow_before.is_empty() {
        "Beginning of story"
    } else {
        flow_before
    };
    let after = if flow_after.is_empty() {
        "End of story"
    } else {
        flow_after
    };
    format!(
        "We are building a storyboard for: \"{}\". Assets: {}. The story flow before this shot is: [{}]. The story flow after this shot is: [{}]. Generate a logical bridge shot that connects these segments seamlessly. Return as a clean JSON object.",
        concept, asset_names, before, after
    )
}
