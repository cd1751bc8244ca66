//! Explicit configuration for one handoff.
//!
//! Everything the sequencer needs is passed in here at construction: the assets to gate on, the
//! words to reveal, where their destinations live in the page, and every timing and layout
//! constant. [`HandoffConfig::default`] reproduces the landing page the sequencer was built for.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    animation::ease::Ease,
    animation::scene::Filter,
    foundation::core::{Millis, Rgba8},
    foundation::error::{HandoffError, HandoffResult},
};

const DEFAULT_IMAGES: [&str; 3] = [
    "https://res.cloudinary.com/startplatz/image/upload/f_auto,q_auto,w_800/v1767662279/ai-hub/website/website_stock_images/EVENT-01.png",
    "https://res.cloudinary.com/startplatz/image/upload/f_auto,q_auto,w_800/v1767662282/ai-hub/website/website_stock_images/EVENT-03.png",
    "https://res.cloudinary.com/startplatz/image/upload/f_auto,q_auto,w_800/v1767662288/ai-hub/website/website_stock_images/EVENT-04.png",
];

/// Ordered, immutable list of image locators the overlay shows.
///
/// Panel `i` shows image `i`, so the manifest length is also the panel count.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AssetManifest {
    images: Vec<String>,
}

impl AssetManifest {
    /// Build a manifest from image locators.
    pub fn new<I, S>(images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            images: images.into_iter().map(Into::into).collect(),
        }
    }

    /// Image locators in panel order.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Number of images (and panels).
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the manifest lists no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGES)
    }
}

/// Semantic role of a word, picking its destination colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordRole {
    /// Default text colour.
    #[default]
    Normal,
    /// Accent colour.
    Highlighted,
    /// Muted colour.
    Dimmed,
}

/// One token of the word sequence.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Word {
    /// Token text as displayed.
    pub text: String,
    /// Colour role at the destination.
    #[serde(default)]
    pub role: WordRole,
}

impl Word {
    /// Build a word.
    pub fn new(text: impl Into<String>, role: WordRole) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }
}

/// Ordered word tokens, index-aligned with the page's word anchors.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct WordSequence {
    words: Vec<Word>,
}

impl WordSequence {
    /// Build a sequence from words.
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// Words in reveal order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for WordSequence {
    fn default() -> Self {
        Self::new(vec![
            Word::new("STARTE", WordRole::Normal),
            Word::new("DEINE", WordRole::Normal),
            Word::new("KARRIERE", WordRole::Highlighted),
            Word::new("JETZT.", WordRole::Dimmed),
        ])
    }
}

/// Durations and curves of every phase.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Timings {
    /// Readiness is forced this long after the gate starts.
    pub safety_timeout: Millis,
    /// Pause before the first word starts revealing.
    pub reveal_delay: Millis,
    /// Offset between consecutive word reveals.
    pub reveal_stagger: Millis,
    /// Duration of one word reveal.
    pub reveal_duration: Millis,
    /// Pause between the last reveal and the morph.
    pub hold: Millis,
    /// Duration of panel and word moves toward the destination.
    pub morph_duration: Millis,
    /// Duration of the panel slide-out used when no destination region exists.
    pub slide_out_duration: Millis,
    /// Delay of the panel desaturation after the morph starts.
    pub desaturate_delay: Millis,
    /// Duration of the panel desaturation.
    pub desaturate_duration: Millis,
    /// Duration of the overlay cross-fade.
    pub fade_duration: Millis,
    /// Curve of the word reveals.
    pub reveal_ease: Ease,
    /// Curve of the morph and slide-out moves.
    pub morph_ease: Ease,
    /// Curve of the panel desaturation.
    pub desaturate_ease: Ease,
    /// Curve of the overlay cross-fade.
    pub fade_ease: Ease,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            safety_timeout: Millis(4000),
            reveal_delay: Millis(300),
            reveal_stagger: Millis(90),
            reveal_duration: Millis(550),
            hold: Millis(600),
            morph_duration: Millis(1200),
            slide_out_duration: Millis(1000),
            desaturate_delay: Millis(600),
            desaturate_duration: Millis(600),
            fade_duration: Millis(500),
            reveal_ease: Ease::Power3Out,
            morph_ease: Ease::Power3InOut,
            desaturate_ease: Ease::Power1Out,
            fade_ease: Ease::Power2InOut,
        }
    }
}

/// Colours used by the overlay and the destination roles.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Palette {
    /// Word colour while on the overlay.
    pub overlay_text: Rgba8,
    /// Destination colour for [`WordRole::Normal`].
    pub text: Rgba8,
    /// Destination colour for [`WordRole::Highlighted`].
    pub accent: Rgba8,
    /// Destination colour for [`WordRole::Dimmed`].
    pub muted: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            overlay_text: Rgba8::WHITE,
            text: Rgba8::rgb(0x0f, 0x0f, 0x0f),
            accent: Rgba8::rgb(0x7c, 0x3a, 0xed),
            muted: Rgba8::rgb(0x9c, 0xa3, 0xaf),
        }
    }
}

impl Palette {
    /// Destination colour of a role.
    pub fn role_color(&self, role: WordRole) -> Rgba8 {
        match role {
            WordRole::Normal => self.text,
            WordRole::Highlighted => self.accent,
            WordRole::Dimmed => self.muted,
        }
    }
}

/// Geometry constants of the start pose and the fallback destination.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutParams {
    /// Start font size as a fraction of viewport width.
    pub start_font_ratio: f64,
    /// Start font size cap in pixels.
    pub start_font_max: f64,
    /// Start line height as a multiple of the font size.
    pub start_line_height: f64,
    /// Distance words rise during the reveal.
    pub reveal_rise: f64,
    /// Extra width added to each start panel so neighbours overlap.
    pub panel_bleed: f64,
    /// Horizontal gap between panels at the destination.
    pub panel_gap: f64,
    /// Panel image filter before the morph.
    pub start_filter: Filter,
    /// Panel image filter after the morph.
    pub morph_filter: Filter,
    /// Fallback font size as a fraction of viewport width.
    pub fallback_font_ratio: f64,
    /// Fallback font size cap in pixels.
    pub fallback_font_max: f64,
    /// Fallback left inset in pixels.
    pub fallback_left: f64,
    /// Fallback first-line top as a fraction of viewport height.
    pub fallback_top_ratio: f64,
    /// Fallback line height as a multiple of the font size.
    pub fallback_line_height: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            start_font_ratio: 0.1,
            start_font_max: 120.0,
            start_line_height: 1.05,
            reveal_rise: 50.0,
            panel_bleed: 1.0,
            panel_gap: 3.0,
            start_filter: Filter {
                saturation: 0.25,
                brightness: 0.55,
            },
            morph_filter: Filter {
                saturation: 0.05,
                brightness: 0.5,
            },
            fallback_font_ratio: 0.12,
            fallback_font_max: 60.0,
            fallback_left: 24.0,
            fallback_top_ratio: 0.25,
            fallback_line_height: 1.1,
        }
    }
}

/// Complete configuration of one handoff.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct HandoffConfig {
    /// Images to gate on and show in the panels.
    pub asset_manifest: AssetManifest,
    /// Words to reveal and morph.
    pub word_sequence: WordSequence,
    /// Selector of the region the panels morph into.
    pub destination_selector: String,
    /// Attribute holding a word anchor's positional index.
    pub word_anchor_attribute: String,
    /// Selector of a static loading indicator to remove when the overlay takes over.
    pub legacy_indicator_selector: Option<String>,
    /// Phase durations and curves.
    pub timings: Timings,
    /// Colours.
    pub palette: Palette,
    /// Geometry constants.
    pub layout: LayoutParams,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            asset_manifest: AssetManifest::default(),
            word_sequence: WordSequence::default(),
            destination_selector: "#hero-persona-reveal".to_owned(),
            word_anchor_attribute: "data-hero-word".to_owned(),
            legacy_indicator_selector: Some("#preloader".to_owned()),
            timings: Timings::default(),
            palette: Palette::default(),
            layout: LayoutParams::default(),
        }
    }
}

impl HandoffConfig {
    /// Parse and validate a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HandoffResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| HandoffError::serde(format!("parse handoff config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> HandoffResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse and validate a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HandoffResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HandoffError::config(format!("open handoff config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check static invariants.
    pub fn validate(&self) -> HandoffResult<()> {
        if self.asset_manifest.is_empty() {
            return Err(HandoffError::config("assetManifest must list at least one image"));
        }
        if self.asset_manifest.images().iter().any(|s| s.trim().is_empty()) {
            return Err(HandoffError::config("assetManifest entries must be non-empty"));
        }
        if self.word_sequence.is_empty() {
            return Err(HandoffError::config("wordSequence must contain at least one word"));
        }
        if self.destination_selector.trim().is_empty() {
            return Err(HandoffError::config("destinationSelector must be non-empty"));
        }
        if self.word_anchor_attribute.trim().is_empty() {
            return Err(HandoffError::config("wordAnchorAttribute must be non-empty"));
        }
        if self.timings.safety_timeout == Millis::ZERO {
            return Err(HandoffError::config("timings.safetyTimeout must be > 0"));
        }
        if self.timings.fade_duration == Millis::ZERO {
            return Err(HandoffError::config("timings.fadeDuration must be > 0"));
        }
        self.layout.validate()
    }
}

impl LayoutParams {
    fn validate(&self) -> HandoffResult<()> {
        let positive = [
            ("startFontRatio", self.start_font_ratio),
            ("startFontMax", self.start_font_max),
            ("startLineHeight", self.start_line_height),
            ("fallbackFontRatio", self.fallback_font_ratio),
            ("fallbackFontMax", self.fallback_font_max),
            ("fallbackLineHeight", self.fallback_line_height),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(HandoffError::config(format!(
                    "layout.{name} must be finite and > 0"
                )));
            }
        }
        let non_negative = [
            ("revealRise", self.reveal_rise),
            ("panelBleed", self.panel_bleed),
            ("panelGap", self.panel_gap),
            ("fallbackLeft", self.fallback_left),
            ("fallbackTopRatio", self.fallback_top_ratio),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(HandoffError::config(format!(
                    "layout.{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
