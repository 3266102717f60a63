//! Fixed visual style catalog.
//!
//! Each style pairs a display name with the style-prompt string appended to
//! image generation prompts. The catalog is fixed; a session's
//! `ProjectConfig::style` selects an entry by id.

/// A visual style preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub prompt: &'static str,
}

/// The available style presets, in display order.
pub const STORY_STYLES: &[StoryStyle] = &[
    StoryStyle {
        id: "cinematic",
        name: "Cinematic Movie",
        prompt: "Cinematic lighting, high fidelity, professional film storyboard, anamorphic lens flares",
    },
    StoryStyle {
        id: "anime",
        name: "Modern Anime",
        prompt: "Studio Ghibli meets Makoto Shinkai style, vibrant lighting, highly detailed cel shading",
    },
    StoryStyle {
        id: "noir",
        name: "Film Noir",
        prompt: "High contrast black and white, dramatic shadows, moody lighting, smoke and rain textures",
    },
    StoryStyle {
        id: "3d",
        name: "Pixar-like 3D",
        prompt: "High-end 3D character animation render, soft shadows, subsurface scattering, cute aesthetics",
    },
    StoryStyle {
        id: "sketch",
        name: "Traditional Sketch",
        prompt: "Rough pencil sketch on paper, charcoal textures, artistic, rough storyboard lines",
    },
];

/// Looks up a style by id, falling back to the first catalog entry for
/// unknown ids.
pub fn style_by_id(id: &str) -> &'static StoryStyle {
    STORY_STYLES
        .iter()
        .find(|s| s.id == id)
        .unwrap_or(&STORY_STYLES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_style_is_found() {
        assert_eq!(style_by_id("noir").name, "Film Noir");
    }

    #[test]
    fn unknown_style_falls_back_to_first() {
        assert_eq!(style_by_id("vaporwave").id, "cinematic");
    }
}
