use crate::{
    animation::scene::{OverlayScene, PanelPose, WordBox, WordPose, WordReveal},
    config::HandoffConfig,
    foundation::core::{Rect, Viewport},
};

/// Full-bleed start pose of the overlay.
///
/// Panels split the viewport into equal vertical strips (each bled by `panelBleed` so no
/// hairline shows between them) and start transparent. Words stack centred on the viewport,
/// hidden and lowered by `revealRise`, in the overlay text colour.
pub fn start_scene(config: &HandoffConfig, viewport: Viewport) -> OverlayScene {
    let layout = &config.layout;
    let n_panels = config.asset_manifest.len();
    let panel_w = viewport.width / (n_panels.max(1) as f64);

    let panels = (0..n_panels)
        .map(|i| {
            let x0 = (i as f64) * panel_w;
            PanelPose {
                rect: Rect::new(x0, 0.0, x0 + panel_w + layout.panel_bleed, viewport.height),
                opacity: 0.0,
                filter: layout.start_filter,
            }
        })
        .collect();

    let font_size = start_font_size(config, viewport);
    let line_h = font_size * layout.start_line_height;
    let words = config.word_sequence.words();
    let total_h = (words.len() as f64) * line_h;
    let top0 = (viewport.height - total_h) / 2.0;

    let words = words
        .iter()
        .enumerate()
        .map(|(i, w)| WordPose {
            text: w.text.clone(),
            placement: WordBox {
                left: viewport.width / 2.0,
                top: top0 + (i as f64) * line_h,
                x_percent: -50.0,
                font_size,
            },
            reveal: WordReveal {
                opacity: 0.0,
                rise: layout.reveal_rise,
            },
            color: config.palette.overlay_text,
        })
        .collect();

    OverlayScene {
        opacity: 1.0,
        panels,
        words,
    }
}

/// Word font size of the start pose.
pub fn start_font_size(config: &HandoffConfig, viewport: Viewport) -> f64 {
    (viewport.width * config.layout.start_font_ratio).min(config.layout.start_font_max)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/pose.rs"]
mod tests;
