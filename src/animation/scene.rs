use crate::{
    animation::tween::Lerp,
    foundation::core::{Rect, Rgba8},
};

/// CSS-style image filter applied to a panel's picture.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Filter {
    /// `saturate()` factor.
    pub saturation: f64,
    /// `brightness()` factor.
    pub brightness: f64,
}

impl Lerp for Filter {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            saturation: f64::lerp(&a.saturation, &b.saturation, t),
            brightness: f64::lerp(&a.brightness, &b.brightness, t),
        }
    }
}

/// Visual state of one image panel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PanelPose {
    /// Panel box in viewport coordinates.
    pub rect: Rect,
    /// Panel opacity in `[0, 1]`.
    pub opacity: f64,
    /// Filter applied to the panel's image.
    pub filter: Filter,
}

/// Where and how large a word is drawn.
///
/// `x_percent` shifts the word horizontally by a percentage of its own rendered width, which
/// only the host knows; `-50` centres the word on `left`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WordBox {
    /// Left edge (before the `x_percent` shift).
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Horizontal self-relative shift in percent.
    pub x_percent: f64,
    /// Font size in CSS pixels.
    pub font_size: f64,
}

impl Lerp for WordBox {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            left: f64::lerp(&a.left, &b.left, t),
            top: f64::lerp(&a.top, &b.top, t),
            x_percent: f64::lerp(&a.x_percent, &b.x_percent, t),
            font_size: f64::lerp(&a.font_size, &b.font_size, t),
        }
    }
}

/// Entrance state of a word: opacity and the vertical offset it rises from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WordReveal {
    /// Word opacity in `[0, 1]`.
    pub opacity: f64,
    /// Downward offset in pixels, `0` when settled.
    pub rise: f64,
}

impl Lerp for WordReveal {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
            rise: f64::lerp(&a.rise, &b.rise, t),
        }
    }
}

/// Visual state of one word token.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WordPose {
    /// Token text.
    pub text: String,
    /// Position and size.
    pub placement: WordBox,
    /// Entrance state.
    pub reveal: WordReveal,
    /// Text colour.
    pub color: Rgba8,
}

/// Snapshot of everything the overlay draws at one instant.
///
/// The overlay is a single unit: `opacity` multiplies every panel and word, so fading it never
/// exposes a seam between elements.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayScene {
    /// Opacity of the whole overlay (background plane included).
    pub opacity: f64,
    /// Image panels, index-aligned with the asset manifest.
    pub panels: Vec<PanelPose>,
    /// Word tokens, index-aligned with the word sequence.
    pub words: Vec<WordPose>,
}
