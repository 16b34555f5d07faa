// SPDX-License-Identifier: MIT OR Apache-2.0
//! Prompt composition for asset generation.
//!
//! Turns an [`AssetRequest`] into the structured prompt a text-to-image
//! provider consumes: type-specific guidance, the node description,
//! upstream context, a style fragment rendered from the Style DNA, plus
//! aspect ratio and fine-grained controls.

use gameforge_graph::{GameMode, StyleDna};

use crate::provider::AssetRequest;

/// Default negative constraints when the style carries none.
pub const DEFAULT_NEGATIVE_PROMPT: &str = "blurry, low quality, distorted, deformed";
/// Default style strength when the style carries none.
pub const DEFAULT_STYLE_STRENGTH: f32 = 0.75;
/// Default inference step count when the style carries none.
pub const DEFAULT_INFERENCE_STEPS: u32 = 30;

/// Optimal aspect ratio for a target type, with a game-mode fallback for
/// unknown vocabulary.
pub fn aspect_ratio_for(target: &str, mode: GameMode) -> &'static str {
    match target {
        // Environments read wide
        "world" | "tilemap" | "level" | "skybox" | "terrain" | "zone" | "biome" | "scene"
        | "key_art" => "16:9",
        "parallax" => "21:9",
        // Characters read tall
        "protagonist" | "npc" | "villain" | "creature" | "boss" | "portrait" | "character" => "3:4",
        "sprite_sheet" | "mesh" => "1:1",
        // Props read square
        "weapon" | "prop" | "icon" | "pickup" | "material" => "1:1",
        "vehicle" => "4:3",
        // Interface and mechanics read wide
        "hud" | "menu" | "inventory" | "ui" | "mechanic" | "system" | "loop" | "physics"
        | "platforming" => "16:9",
        _ => match mode {
            GameMode::TwoD => "16:9",
            GameMode::ThreeD => "4:3",
        },
    }
}

/// Structural guidance per target type, phrased for image generation.
pub fn type_guidance(target: &str) -> Option<&'static str> {
    let guidance = match target {
        // 2D
        "tilemap" => "2D orthogonal tile grid, modular seamless tiles, ground and wall variants",
        "sprite_sheet" => {
            "character sprite animation frames, uniform scale, transparent background style"
        }
        "parallax" => "wide seamless horizontal background layer, atmospheric depth",
        "level" => "top-down level layout, clear paths and obstacles, game design blueprint",
        "icon" => "2D game item icon, square composition, high contrast, small size readability",
        "portrait" => "expressive character face, detailed facial features, portrait framing",
        // 3D
        "terrain" => "3D terrain with elevation, textured landscape, heightmap style",
        "mesh" => "3D character model render, clean geometry, model sheet view",
        "skybox" => "panoramic sky environment, seamless horizon, atmospheric lighting",
        "rig" => "3D character skeleton and joints visible, technical wireframe overlay",
        // Universal
        "protagonist" => "hero character design, full body, distinctive silhouette, equipment visible",
        "npc" => "non-player character, standing pose, profession-appropriate attire",
        "boss" => "intimidating boss design, larger scale, dramatic pose",
        "weapon" => "detailed weapon concept, clear mechanism, side profile view",
        "vehicle" => "vehicle design concept, functional form, dynamic angle",
        "hud" => "game HUD overlay design, UI elements, health bars, mini-map frame",
        "menu" => "game menu interface, button layout, title placement, panel design",
        _ => return None,
    };
    Some(guidance)
}

/// Camera guidance for a perspective override, when one applies.
pub fn perspective_guidance(perspective: &str) -> Option<&'static str> {
    match perspective {
        "Isometric" => Some("3/4 isometric view, parallel projection, no vanishing point"),
        "Top-Down" => Some("directly overhead view, map perspective"),
        "VR" => Some("wide-angle immersive view, VR-ready composition"),
        _ => None,
    }
}

/// Render the Style DNA into a comma-separated prompt fragment.
pub fn style_prompt(style: &StyleDna, mode: GameMode) -> String {
    let mut elements = vec![
        format!("{} style", style.art.era),
        format!("{} rendering", style.art.rendering),
        format!("{} textures", style.art.texture),
    ];

    let intensity = if style.lighting.intensity > 0.7 {
        "bright"
    } else if style.lighting.intensity > 0.4 {
        "balanced"
    } else {
        "dim"
    };
    elements.push(format!(
        "{} {} lighting",
        style.lighting.style.as_str(),
        intensity
    ));

    elements.push(format!(
        "{} color mood with {} tones",
        style.palette.mood.as_str(),
        style.palette.primary.join(", ")
    ));

    elements.push(format!("{} camera angle", style.camera.angle.as_prompt()));

    elements.push(match mode {
        GameMode::TwoD => "flat 2D composition, no perspective distortion".to_owned(),
        GameMode::ThreeD => "3D perspective with depth".to_owned(),
    });

    if !style.art.influences.is_empty() {
        elements.push(format!("inspired by {}", style.art.influences.join(", ")));
    }

    elements.join(", ")
}

/// A fully composed generation prompt plus per-call parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetPrompt {
    /// The prompt text
    pub text: String,
    /// Target aspect ratio
    pub aspect_ratio: &'static str,
    /// What the generator must avoid
    pub negative_prompt: String,
    /// How strongly to apply the style, `0..=1`
    pub style_strength: f32,
    /// Quality/speed tradeoff
    pub inference_steps: u32,
    /// Seed for reproducibility, when the style pins one
    pub seed: Option<u64>,
}

impl AssetPrompt {
    /// Compose the prompt for one asset request.
    ///
    /// Order matters for generation quality: perspective override first
    /// (when it differs from the game mode), then structural guidance,
    /// the description, upstream context, and the style fragment last.
    pub fn compose(request: &AssetRequest<'_>) -> Self {
        let target = request.target_kind();

        let mut parts: Vec<String> = Vec::new();
        if let Some(guidance) = type_guidance(target) {
            parts.push(guidance.to_owned());
        }
        parts.push(request.description.to_owned());
        if !request.context.trim().is_empty() {
            parts.push(format!("Context: {}", request.context));
        }
        parts.push(style_prompt(request.style, request.game_mode));

        let mut text = parts.join(". ");
        if let Some(guidance) = request
            .perspective
            .filter(|p| *p != request.game_mode.to_string())
            .and_then(perspective_guidance)
        {
            text = format!("{guidance}. {text}");
        }

        let detail = request.style.detail.clone().unwrap_or_default();
        Self {
            text,
            aspect_ratio: aspect_ratio_for(target, request.game_mode),
            negative_prompt: detail
                .negative_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_NEGATIVE_PROMPT.to_owned()),
            style_strength: detail.style_strength.unwrap_or(DEFAULT_STYLE_STRENGTH),
            inference_steps: detail.inference_steps.unwrap_or(DEFAULT_INFERENCE_STEPS),
            seed: detail.seed,
        }
    }
}
