use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    animation::scene::{Filter, OverlayScene, WordBox, WordReveal},
    animation::tween::Lerp,
    foundation::core::{Millis, Rect, Rgba8},
    foundation::error::{HandoffError, HandoffResult},
};

/// One animatable property of one overlay element, together with a value for it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "prop", rename_all = "camelCase")]
pub enum Prop {
    /// Box of image panel `index`.
    PanelRect {
        /// Panel index.
        index: usize,
        /// Box value.
        value: Rect,
    },
    /// Opacity of image panel `index`.
    PanelOpacity {
        /// Panel index.
        index: usize,
        /// Opacity value.
        value: f64,
    },
    /// Image filter of panel `index`.
    PanelFilter {
        /// Panel index.
        index: usize,
        /// Filter value.
        value: Filter,
    },
    /// Position and font size of word `index`.
    WordPlacement {
        /// Word index.
        index: usize,
        /// Placement value.
        value: WordBox,
    },
    /// Entrance state of word `index`.
    WordReveal {
        /// Word index.
        index: usize,
        /// Reveal value.
        value: WordReveal,
    },
    /// Colour of word `index`.
    WordColor {
        /// Word index.
        index: usize,
        /// Colour value.
        value: Rgba8,
    },
    /// Opacity of the whole overlay.
    OverlayOpacity {
        /// Opacity value.
        value: f64,
    },
}

impl Prop {
    /// Read the current value of the same property from `scene`.
    ///
    /// Returns `None` when the addressed element does not exist.
    fn read(&self, scene: &OverlayScene) -> Option<Self> {
        let out = match *self {
            Self::PanelRect { index, .. } => Self::PanelRect {
                index,
                value: scene.panels.get(index)?.rect,
            },
            Self::PanelOpacity { index, .. } => Self::PanelOpacity {
                index,
                value: scene.panels.get(index)?.opacity,
            },
            Self::PanelFilter { index, .. } => Self::PanelFilter {
                index,
                value: scene.panels.get(index)?.filter,
            },
            Self::WordPlacement { index, .. } => Self::WordPlacement {
                index,
                value: scene.words.get(index)?.placement,
            },
            Self::WordReveal { index, .. } => Self::WordReveal {
                index,
                value: scene.words.get(index)?.reveal,
            },
            Self::WordColor { index, .. } => Self::WordColor {
                index,
                value: scene.words.get(index)?.color,
            },
            Self::OverlayOpacity { .. } => Self::OverlayOpacity {
                value: scene.opacity,
            },
        };
        Some(out)
    }

    fn write(&self, scene: &mut OverlayScene) {
        match *self {
            Self::PanelRect { index, value } => {
                if let Some(p) = scene.panels.get_mut(index) {
                    p.rect = value;
                }
            }
            Self::PanelOpacity { index, value } => {
                if let Some(p) = scene.panels.get_mut(index) {
                    p.opacity = value.clamp(0.0, 1.0);
                }
            }
            Self::PanelFilter { index, value } => {
                if let Some(p) = scene.panels.get_mut(index) {
                    p.filter = value;
                }
            }
            Self::WordPlacement { index, value } => {
                if let Some(w) = scene.words.get_mut(index) {
                    w.placement = value;
                }
            }
            Self::WordReveal { index, value } => {
                if let Some(w) = scene.words.get_mut(index) {
                    w.reveal = WordReveal {
                        opacity: value.opacity.clamp(0.0, 1.0),
                        rise: value.rise,
                    };
                }
            }
            Self::WordColor { index, value } => {
                if let Some(w) = scene.words.get_mut(index) {
                    w.color = value;
                }
            }
            Self::OverlayOpacity { value } => scene.opacity = value.clamp(0.0, 1.0),
        }
    }

    // `from` and `to` always share a variant; `Tween` is only built through `Timeline::to`.
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        match (from, to) {
            (Self::PanelRect { value: a, .. }, Self::PanelRect { index, value: b }) => {
                Self::PanelRect {
                    index: *index,
                    value: Rect::lerp(a, b, t),
                }
            }
            (Self::PanelOpacity { value: a, .. }, Self::PanelOpacity { index, value: b }) => {
                Self::PanelOpacity {
                    index: *index,
                    value: f64::lerp(a, b, t),
                }
            }
            (Self::PanelFilter { value: a, .. }, Self::PanelFilter { index, value: b }) => {
                Self::PanelFilter {
                    index: *index,
                    value: Filter::lerp(a, b, t),
                }
            }
            (Self::WordPlacement { value: a, .. }, Self::WordPlacement { index, value: b }) => {
                Self::WordPlacement {
                    index: *index,
                    value: WordBox::lerp(a, b, t),
                }
            }
            (Self::WordReveal { value: a, .. }, Self::WordReveal { index, value: b }) => {
                Self::WordReveal {
                    index: *index,
                    value: WordReveal::lerp(a, b, t),
                }
            }
            (Self::WordColor { value: a, .. }, Self::WordColor { index, value: b }) => {
                Self::WordColor {
                    index: *index,
                    value: Rgba8::lerp(a, b, t),
                }
            }
            (Self::OverlayOpacity { value: a }, Self::OverlayOpacity { value: b }) => {
                Self::OverlayOpacity {
                    value: f64::lerp(a, b, t),
                }
            }
            _ => to.clone(),
        }
    }
}

/// A single property animation placed on a timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Tween {
    /// Start position on the timeline.
    pub start: Millis,
    /// Duration; zero-length tweens snap at `start`.
    pub duration: Millis,
    /// Easing curve.
    pub ease: Ease,
    from: Prop,
    to: Prop,
}

impl Tween {
    /// End position on the timeline.
    pub fn end(&self) -> Millis {
        self.start.plus(self.duration)
    }

    /// Target value of this tween.
    pub fn target(&self) -> &Prop {
        &self.to
    }

    fn value_at(&self, at: Millis) -> Option<Prop> {
        if at < self.start {
            return None;
        }
        if self.duration.0 == 0 || at >= self.end() {
            return Some(self.to.clone());
        }
        let t = (at.since(self.start).0 as f64) / (self.duration.0 as f64);
        Some(Prop::interpolate(&self.from, &self.to, self.ease.apply(t)))
    }
}

/// Ordered collection of property tweens over a base scene.
///
/// A tween captures its start value from the timeline itself: the value the property has at
/// the tween's start position, given every tween added before it. Later tweens win when two
/// touch the same property at the same instant.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Timeline {
    base: OverlayScene,
    tweens: Vec<Tween>,
    labels: BTreeMap<String, Millis>,
}

impl Timeline {
    /// Create an empty timeline drawing `base` at every instant.
    pub fn new(base: OverlayScene) -> Self {
        Self {
            base,
            tweens: Vec::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Scene before any tween applies.
    pub fn base(&self) -> &OverlayScene {
        &self.base
    }

    /// Tweens in insertion order.
    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Place (or move) a named marker.
    pub fn add_label(&mut self, name: impl Into<String>, at: Millis) {
        self.labels.insert(name.into(), at);
    }

    /// Position of a named marker.
    pub fn label(&self, name: &str) -> Option<Millis> {
        self.labels.get(name).copied()
    }

    /// Animate `to`'s property toward its value, returning the tween's end position.
    pub fn to(
        &mut self,
        start: Millis,
        duration: Millis,
        ease: Ease,
        to: Prop,
    ) -> HandoffResult<Millis> {
        let current = self.sample(start);
        let from = to
            .read(&current)
            .ok_or_else(|| HandoffError::animation(format!("tween target out of range: {to:?}")))?;
        let tween = Tween {
            start,
            duration,
            ease,
            from,
            to,
        };
        let end = tween.end();
        self.tweens.push(tween);
        Ok(end)
    }

    /// Snap a property to a value at `at`.
    pub fn set(&mut self, at: Millis, to: Prop) -> HandoffResult<()> {
        self.to(at, Millis::ZERO, Ease::Linear, to).map(|_| ())
    }

    /// Latest tween end, or zero for an empty timeline.
    pub fn end(&self) -> Millis {
        self.tweens
            .iter()
            .map(Tween::end)
            .max()
            .unwrap_or(Millis::ZERO)
    }

    /// Latest end among tweens added at or after insertion index `from`.
    pub fn end_since(&self, from: usize) -> Option<Millis> {
        self.tweens.get(from..)?.iter().map(Tween::end).max()
    }

    /// Evaluate the scene at timeline position `at`.
    pub fn sample(&self, at: Millis) -> OverlayScene {
        let mut scene = self.base.clone();
        for tween in &self.tweens {
            if let Some(value) = tween.value_at(at) {
                value.write(&mut scene);
            }
        }
        scene
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
