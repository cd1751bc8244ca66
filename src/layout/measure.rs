use crate::{
    animation::scene::WordBox,
    config::{HandoffConfig, LayoutParams, Palette, WordRole},
    foundation::core::{Rect, Rgba8, Viewport},
    layout::provider::LayoutProvider,
};

/// Where the image panels go during the morph.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImageDestination {
    /// Panels morph into equal slices of a measured region.
    Region {
        /// Measured region.
        region: Rect,
        /// Per-panel destination boxes, index-aligned with the manifest.
        panels: Vec<Rect>,
    },
    /// No usable region: panels slide up by `lift` pixels and fade out.
    SlideOut {
        /// Upward travel in pixels.
        lift: f64,
    },
}

/// How a word destination was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorSource {
    /// Measured from the page anchor with the same index.
    Anchor,
    /// Synthesized left-aligned stack.
    Fallback,
}

/// Destination of one word.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct WordDestination {
    /// Target placement.
    pub placement: WordBox,
    /// Target colour from the word's role.
    pub color: Rgba8,
    /// Where the placement came from.
    pub source: AnchorSource,
}

/// Complete destination pose measured at the start of the morph.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DestinationPose {
    /// Viewport at measurement time.
    pub viewport: Viewport,
    /// Image panel destination.
    pub images: ImageDestination,
    /// Word destinations, index-aligned with the word sequence.
    pub words: Vec<WordDestination>,
}

impl DestinationPose {
    /// Number of words placed from real anchors.
    pub fn anchored_words(&self) -> usize {
        self.words
            .iter()
            .filter(|w| w.source == AnchorSource::Anchor)
            .count()
    }
}

/// Computes the morph destination from live page geometry.
///
/// Images and words degrade independently: a missing region only affects the panels, and each
/// word falls back on its own when its anchor is missing.
#[derive(Clone, Debug)]
pub struct LayoutMeasurer {
    panel_count: usize,
    roles: Vec<WordRole>,
    layout: LayoutParams,
    palette: Palette,
}

impl LayoutMeasurer {
    /// Measurer for the panels and words described by `config`.
    pub fn from_config(config: &HandoffConfig) -> Self {
        Self {
            panel_count: config.asset_manifest.len(),
            roles: config
                .word_sequence
                .words()
                .iter()
                .map(|w| w.role)
                .collect(),
            layout: config.layout,
            palette: config.palette,
        }
    }

    /// Measure the destination pose now.
    #[tracing::instrument(skip_all)]
    pub fn measure<P: LayoutProvider + ?Sized>(&self, provider: &P) -> DestinationPose {
        let viewport = provider.viewport();
        let images = self.image_destination(provider, viewport);
        let words = (0..self.roles.len())
            .map(|i| self.word_destination(provider, viewport, i))
            .collect::<Vec<_>>();

        let pose = DestinationPose {
            viewport,
            images,
            words,
        };
        tracing::debug!(
            region = matches!(pose.images, ImageDestination::Region { .. }),
            anchored = pose.anchored_words(),
            words = pose.words.len(),
            "measured destination pose"
        );
        pose
    }

    fn image_destination<P: LayoutProvider + ?Sized>(
        &self,
        provider: &P,
        viewport: Viewport,
    ) -> ImageDestination {
        match provider.destination_region() {
            Some(region) if region.width() > 0.0 => ImageDestination::Region {
                region,
                panels: split_region(region, self.panel_count, self.layout.panel_gap),
            },
            _ => ImageDestination::SlideOut {
                lift: viewport.height,
            },
        }
    }

    fn word_destination<P: LayoutProvider + ?Sized>(
        &self,
        provider: &P,
        viewport: Viewport,
        index: usize,
    ) -> WordDestination {
        let color = self.palette.role_color(self.roles[index]);
        let fallback_fs = self.fallback_font_size(viewport);

        match provider.word_anchor(index) {
            Some(anchor) => {
                let font_size = if anchor.font_size.is_finite() && anchor.font_size > 0.0 {
                    anchor.font_size
                } else {
                    fallback_fs
                };
                WordDestination {
                    placement: WordBox {
                        left: anchor.rect.x0,
                        top: anchor.rect.y0,
                        x_percent: 0.0,
                        font_size,
                    },
                    color,
                    source: AnchorSource::Anchor,
                }
            }
            None => WordDestination {
                placement: WordBox {
                    left: self.layout.fallback_left,
                    top: viewport.height * self.layout.fallback_top_ratio
                        + (index as f64) * fallback_fs * self.layout.fallback_line_height,
                    x_percent: 0.0,
                    font_size: fallback_fs,
                },
                color,
                source: AnchorSource::Fallback,
            },
        }
    }

    fn fallback_font_size(&self, viewport: Viewport) -> f64 {
        (viewport.width * self.layout.fallback_font_ratio).min(self.layout.fallback_font_max)
    }
}

/// Split `region` into `n` equal side-by-side boxes separated by `gap`.
pub fn split_region(region: Rect, n: usize, gap: f64) -> Vec<Rect> {
    if n == 0 {
        return Vec::new();
    }
    let gaps = gap * (n.saturating_sub(1) as f64);
    let w = ((region.width() - gaps) / (n as f64)).max(0.0);
    (0..n)
        .map(|i| {
            let x0 = region.x0 + (i as f64) * (w + gap);
            Rect::new(x0, region.y0, x0 + w, region.y1)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/measure.rs"]
mod tests;
