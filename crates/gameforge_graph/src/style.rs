// SPDX-License-Identifier: MIT OR Apache-2.0
//! Style DNA: the per-session art-direction descriptor.
//!
//! A [`StyleDna`] is a value object read (never mutated in place) at the
//! moment each generation call is issued. Editing the style means
//! replacing the whole value; an in-flight generation batch keeps the
//! snapshot it started with.

use serde::{Deserialize, Serialize};

/// Whether the project targets 2D or 3D assets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Flat 2D assets (sprites, tilemaps, parallax layers)
    #[serde(rename = "2D")]
    TwoD,
    /// 3D assets (meshes, terrain, skyboxes)
    #[default]
    #[serde(rename = "3D")]
    ThreeD,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            GameMode::TwoD => "2D",
            GameMode::ThreeD => "3D",
        })
    }
}

/// Overall color temperature of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Reds, oranges, golds
    Warm,
    /// Blues, teals, violets
    Cool,
    /// Desaturated, balanced
    Neutral,
    /// High saturation
    Vibrant,
    /// Low saturation
    Muted,
}

impl Mood {
    /// Lowercase name for prompt text.
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Warm => "warm",
            Mood::Cool => "cool",
            Mood::Neutral => "neutral",
            Mood::Vibrant => "vibrant",
            Mood::Muted => "muted",
        }
    }
}

/// Primary and accent colors plus mood.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Dominant hex colors
    pub primary: Vec<String>,
    /// Highlight hex colors
    pub accent: Vec<String>,
    /// Overall temperature
    pub mood: Mood,
}

/// Lighting treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightingStyle {
    /// Outdoor, sun-driven
    Natural,
    /// Even, controlled
    Studio,
    /// High contrast, directional
    Dramatic,
    /// Diffused, low contrast
    Soft,
    /// Sharp shadows
    Hard,
}

impl LightingStyle {
    /// Lowercase name for prompt text.
    pub fn as_str(self) -> &'static str {
        match self {
            LightingStyle::Natural => "natural",
            LightingStyle::Studio => "studio",
            LightingStyle::Dramatic => "dramatic",
            LightingStyle::Soft => "soft",
            LightingStyle::Hard => "hard",
        }
    }
}

/// Lighting style plus intensity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lighting {
    /// Treatment
    pub style: LightingStyle,
    /// Intensity in `0..=1`
    pub intensity: f32,
}

/// Camera angle relative to the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraAngle {
    /// Straight on
    EyeLevel,
    /// Looking up at the subject
    LowAngle,
    /// Looking down at the subject
    HighAngle,
}

impl CameraAngle {
    /// Space-separated name for prompt text.
    pub fn as_prompt(self) -> &'static str {
        match self {
            CameraAngle::EyeLevel => "eye level",
            CameraAngle::LowAngle => "low angle",
            CameraAngle::HighAngle => "high angle",
        }
    }
}

/// Virtual camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRig {
    /// Field of view in degrees
    pub fov: f32,
    /// Angle relative to the subject
    pub angle: CameraAngle,
}

/// Rendering technique, era and influences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtStyle {
    /// Rendering technique (e.g. `"painterly"`)
    pub rendering: String,
    /// Era framing (e.g. `"8-bit"`, `"PS1-era"`, `"Next-Gen"`)
    pub era: String,
    /// Texture treatment (e.g. `"Pixelated"`, `"Hand-painted"`)
    pub texture: String,
    /// Reference works
    pub influences: Vec<String>,
}

/// Framing of the subject inside the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Composition {
    /// Subject centered
    #[default]
    Centered,
    /// Classic thirds grid
    RuleOfThirds,
    /// Off-axis, motion-heavy
    Dynamic,
    /// Vertical framing
    Portrait,
    /// Horizontal framing
    Landscape,
}

/// Requested rendering fidelity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Rough blockout
    Low,
    /// Balanced
    Medium,
    /// Production quality
    #[default]
    High,
    /// Maximum fidelity
    Ultra,
}

/// Fine-grained generation controls. All optional; consumers supply
/// defaults when a field is absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailControls {
    /// Subject framing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<Composition>,
    /// Rendering fidelity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_level: Option<DetailLevel>,
    /// How strongly to apply the style, `0..=1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_strength: Option<f32>,
    /// Constraints the generator must avoid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    /// Seed for reproducibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Quality/speed tradeoff
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inference_steps: Option<u32>,
}

/// The complete style descriptor ("Style DNA") for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleDna {
    /// Preset name
    pub name: String,
    /// Preset version
    pub version: String,
    /// Palette
    pub palette: ColorPalette,
    /// Lighting
    pub lighting: Lighting,
    /// Camera
    pub camera: CameraRig,
    /// Art style
    pub art: ArtStyle,
    /// Optional fine-grained generation controls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailControls>,
}

impl Default for StyleDna {
    /// The "Dark Fantasy" preset every session starts with.
    fn default() -> Self {
        Self {
            name: "Dark Fantasy - Default".to_owned(),
            version: "1.0".to_owned(),
            palette: ColorPalette {
                primary: vec![
                    "#2C1810".to_owned(),
                    "#8B4513".to_owned(),
                    "#D4A574".to_owned(),
                ],
                accent: vec!["#FFD700".to_owned(), "#FF4500".to_owned()],
                mood: Mood::Warm,
            },
            lighting: Lighting {
                style: LightingStyle::Dramatic,
                intensity: 0.7,
            },
            camera: CameraRig {
                fov: 65.0,
                angle: CameraAngle::LowAngle,
            },
            art: ArtStyle {
                rendering: "painterly".to_owned(),
                era: "Modern Fantasy".to_owned(),
                texture: "Detailed Digital Painting".to_owned(),
                influences: vec!["Dark Souls".to_owned(), "Elden Ring".to_owned()],
            },
            detail: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset() {
        let style = StyleDna::default();
        assert_eq!(style.palette.mood, Mood::Warm);
        assert_eq!(style.lighting.style, LightingStyle::Dramatic);
        assert_eq!(style.camera.angle, CameraAngle::LowAngle);
        assert!(style.detail.is_none());
    }

    #[test]
    fn test_game_mode_wire_names() {
        assert_eq!(serde_json::to_string(&GameMode::TwoD).unwrap(), "\"2D\"");
        assert_eq!(serde_json::to_string(&GameMode::ThreeD).unwrap(), "\"3D\"");
    }

    #[test]
    fn test_style_serialization() {
        let mut style = StyleDna::default();
        style.detail = Some(DetailControls {
            style_strength: Some(0.9),
            seed: Some(42),
            ..DetailControls::default()
        });
        let json = serde_json::to_string(&style).unwrap();
        let loaded: StyleDna = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.detail.unwrap().seed, Some(42));
    }
}
