use crate::foundation::core::{Rect, Viewport};

/// Measured destination of one word: its box and computed font size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WordAnchor {
    /// Bounding box in viewport coordinates.
    pub rect: Rect,
    /// Computed font size in CSS pixels.
    pub font_size: f64,
}

/// Read-only access to live page geometry.
///
/// Implementations must not mutate what they measure. Absence is not an error: a hidden or
/// missing destination simply yields `None` and the measurer picks the fallback branch.
pub trait LayoutProvider {
    /// Current viewport.
    fn viewport(&self) -> Viewport;

    /// Bounding box of the region the image panels morph into.
    fn destination_region(&self) -> Option<Rect>;

    /// Destination of the word at positional `index`.
    fn word_anchor(&self, index: usize) -> Option<WordAnchor>;
}

impl<P: LayoutProvider + ?Sized> LayoutProvider for &P {
    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }

    fn destination_region(&self) -> Option<Rect> {
        (**self).destination_region()
    }

    fn word_anchor(&self, index: usize) -> Option<WordAnchor> {
        (**self).word_anchor(index)
    }
}

/// Fixed in-memory page geometry.
///
/// Used by the planner CLI and by tests; also handy for hosts that measure once themselves.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaticLayout {
    /// Viewport to report.
    pub viewport: Viewport,
    /// Destination region, if the page shows one.
    #[serde(default)]
    pub region: Option<Rect>,
    /// Word anchors by positional index; `None` entries are missing anchors.
    #[serde(default)]
    pub anchors: Vec<Option<WordAnchor>>,
}

impl StaticLayout {
    /// Layout with a viewport only: no region, no anchors.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            region: None,
            anchors: Vec::new(),
        }
    }

    /// Set the destination region.
    pub fn with_region(mut self, region: Rect) -> Self {
        self.region = Some(region);
        self
    }

    /// Append a word anchor at the next index.
    pub fn with_anchor(mut self, rect: Rect, font_size: f64) -> Self {
        self.anchors.push(Some(WordAnchor { rect, font_size }));
        self
    }

    /// Append a missing anchor at the next index.
    pub fn with_missing_anchor(mut self) -> Self {
        self.anchors.push(None);
        self
    }
}

impl LayoutProvider for StaticLayout {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn destination_region(&self) -> Option<Rect> {
        self.region
    }

    fn word_anchor(&self, index: usize) -> Option<WordAnchor> {
        self.anchors.get(index).copied().flatten()
    }
}
