//! Timeline recipes for each stage of the handoff.
//!
//! Positions are timeline-relative: zero is the moment the reveal starts.

use crate::{
    animation::scene::{OverlayScene, WordReveal},
    animation::timeline::{Prop, Timeline},
    config::HandoffConfig,
    foundation::core::{Millis, Vec2},
    foundation::error::HandoffResult,
    layout::measure::{DestinationPose, ImageDestination},
};

/// Label marking the start of the morph.
pub const HOLD_LABEL: &str = "hold";

/// Reveal timeline over the start scene.
///
/// Panels snap visible at zero; words fade and rise in one after another. Returns the timeline
/// and the position where the last reveal ends. The [`HOLD_LABEL`] is placed `hold` after it.
pub fn reveal(start: OverlayScene, config: &HandoffConfig) -> HandoffResult<(Timeline, Millis)> {
    let t = &config.timings;
    let n_panels = start.panels.len();
    let n_words = start.words.len();
    let mut tl = Timeline::new(start);

    for index in 0..n_panels {
        tl.set(Millis::ZERO, Prop::PanelOpacity { index, value: 1.0 })?;
    }

    let mut reveal_end = Millis::ZERO;
    for index in 0..n_words {
        let at = t
            .reveal_delay
            .plus(Millis(t.reveal_stagger.0.saturating_mul(index as u64)));
        let end = tl.to(
            at,
            t.reveal_duration,
            t.reveal_ease,
            Prop::WordReveal {
                index,
                value: WordReveal {
                    opacity: 1.0,
                    rise: 0.0,
                },
            },
        )?;
        reveal_end = reveal_end.max(end);
    }

    tl.add_label(HOLD_LABEL, reveal_end.plus(t.hold));
    Ok((tl, reveal_end))
}

/// Append the morph toward `dest` at position `at`, returning where the last morph tween ends.
///
/// All tweens start together; the returned end is the barrier the fade waits for.
pub fn morph(
    tl: &mut Timeline,
    at: Millis,
    dest: &DestinationPose,
    config: &HandoffConfig,
) -> HandoffResult<Millis> {
    let t = &config.timings;
    let first = tl.tweens().len();

    match &dest.images {
        ImageDestination::Region { panels, .. } => {
            for (index, &rect) in panels.iter().enumerate() {
                tl.to(
                    at,
                    t.morph_duration,
                    t.morph_ease,
                    Prop::PanelRect { index, value: rect },
                )?;
            }
            let desaturate_at = at.plus(t.desaturate_delay);
            for index in 0..panels.len() {
                tl.to(
                    desaturate_at,
                    t.desaturate_duration,
                    t.desaturate_ease,
                    Prop::PanelFilter {
                        index,
                        value: config.layout.morph_filter,
                    },
                )?;
            }
        }
        ImageDestination::SlideOut { lift } => {
            let current = tl.sample(at);
            for (index, panel) in current.panels.iter().enumerate() {
                tl.to(
                    at,
                    t.slide_out_duration,
                    t.morph_ease,
                    Prop::PanelRect {
                        index,
                        value: panel.rect - Vec2::new(0.0, *lift),
                    },
                )?;
                tl.to(
                    at,
                    t.slide_out_duration,
                    t.morph_ease,
                    Prop::PanelOpacity { index, value: 0.0 },
                )?;
            }
        }
    }

    for (index, word) in dest.words.iter().enumerate() {
        tl.to(
            at,
            t.morph_duration,
            t.morph_ease,
            Prop::WordPlacement {
                index,
                value: word.placement,
            },
        )?;
        tl.to(
            at,
            t.morph_duration,
            t.morph_ease,
            Prop::WordColor {
                index,
                value: word.color,
            },
        )?;
    }

    Ok(tl.end_since(first).unwrap_or(at))
}

/// Append the overlay cross-fade at `at`, returning its end.
pub fn fade(tl: &mut Timeline, at: Millis, config: &HandoffConfig) -> HandoffResult<Millis> {
    let t = &config.timings;
    tl.to(
        at,
        t.fade_duration,
        t.fade_ease,
        Prop::OverlayOpacity { value: 0.0 },
    )
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/choreography.rs"]
mod tests;
