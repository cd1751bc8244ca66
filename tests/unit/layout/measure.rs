use std::cell::Cell;

use super::*;
use crate::layout::provider::{StaticLayout, WordAnchor};

fn desktop() -> Viewport {
    Viewport::new(1440.0, 900.0, 1.0).unwrap()
}

fn measurer() -> LayoutMeasurer {
    LayoutMeasurer::from_config(&HandoffConfig::default())
}

fn hero_anchors(layout: StaticLayout) -> StaticLayout {
    layout
        .with_anchor(Rect::new(80.0, 200.0, 400.0, 280.0), 72.0)
        .with_anchor(Rect::new(80.0, 280.0, 360.0, 360.0), 72.0)
        .with_anchor(Rect::new(80.0, 360.0, 560.0, 440.0), 72.0)
        .with_anchor(Rect::new(80.0, 440.0, 330.0, 520.0), 72.0)
}

#[test]
fn region_is_split_into_gapped_equal_panels() {
    let region = Rect::new(800.0, 150.0, 1406.0, 750.0);
    let layout = StaticLayout::new(desktop()).with_region(region);
    let pose = measurer().measure(&layout);

    let ImageDestination::Region { panels, .. } = &pose.images else {
        panic!("expected region destination, got {:?}", pose.images);
    };
    // (606 - 2 * 3) / 3 = 200
    assert_eq!(panels.len(), 3);
    assert_eq!(panels[0], Rect::new(800.0, 150.0, 1000.0, 750.0));
    assert_eq!(panels[1], Rect::new(1003.0, 150.0, 1203.0, 750.0));
    assert_eq!(panels[2], Rect::new(1206.0, 150.0, 1406.0, 750.0));
}

#[test]
fn missing_region_slides_panels_out() {
    let pose = measurer().measure(&StaticLayout::new(desktop()));
    assert_eq!(pose.images, ImageDestination::SlideOut { lift: 900.0 });
}

#[test]
fn zero_width_region_uses_fallback_but_anchors_still_resolve() {
    let layout = hero_anchors(
        StaticLayout::new(desktop()).with_region(Rect::new(900.0, 100.0, 900.0, 700.0)),
    );
    let pose = measurer().measure(&layout);
    assert!(matches!(pose.images, ImageDestination::SlideOut { .. }));
    assert_eq!(pose.anchored_words(), 4);
    assert_eq!(pose.words[2].placement.left, 80.0);
    assert_eq!(pose.words[2].placement.top, 360.0);
    assert_eq!(pose.words[2].placement.font_size, 72.0);
}

#[test]
fn anchored_words_take_role_colours() {
    let cfg = HandoffConfig::default();
    let pose = LayoutMeasurer::from_config(&cfg).measure(&hero_anchors(StaticLayout::new(desktop())));
    assert_eq!(pose.anchored_words(), 4);
    assert_eq!(pose.words[0].color, cfg.palette.text);
    assert_eq!(pose.words[1].color, cfg.palette.text);
    assert_eq!(pose.words[2].color, cfg.palette.accent);
    assert_eq!(pose.words[3].color, cfg.palette.muted);
    assert!(pose.words.iter().all(|w| w.placement.x_percent == 0.0));
}

#[test]
fn missing_anchor_falls_back_for_that_word_only() {
    let layout = StaticLayout::new(desktop())
        .with_anchor(Rect::new(80.0, 200.0, 400.0, 280.0), 72.0)
        .with_missing_anchor()
        .with_anchor(Rect::new(80.0, 360.0, 560.0, 440.0), 72.0);
    let pose = measurer().measure(&layout);

    assert_eq!(pose.words[0].source, AnchorSource::Anchor);
    assert_eq!(pose.words[1].source, AnchorSource::Fallback);
    assert_eq!(pose.words[2].source, AnchorSource::Anchor);
    assert_eq!(pose.words[3].source, AnchorSource::Fallback);

    // min(1440 * 0.12, 60) = 60; top = 900 * 0.25 + 1 * 60 * 1.1
    let w1 = pose.words[1].placement;
    assert_eq!(w1.left, 24.0);
    assert_eq!(w1.font_size, 60.0);
    assert!((w1.top - 291.0).abs() < 1e-9);
    // Fallback words keep their role colour.
    assert_eq!(pose.words[3].color, HandoffConfig::default().palette.muted);
}

#[test]
fn bad_anchor_font_size_uses_fallback_size() {
    let layout = StaticLayout::new(Viewport::new(300.0, 600.0, 1.0).unwrap())
        .with_anchor(Rect::new(10.0, 10.0, 100.0, 40.0), f64::NAN);
    let pose = measurer().measure(&layout);
    assert_eq!(pose.words[0].source, AnchorSource::Anchor);
    assert!((pose.words[0].placement.font_size - 36.0).abs() < 1e-9);
}

#[derive(Default)]
struct ProbeLayout {
    region_reads: Cell<usize>,
    anchor_reads: Cell<usize>,
}

impl LayoutProvider for ProbeLayout {
    fn viewport(&self) -> Viewport {
        desktop()
    }

    fn destination_region(&self) -> Option<Rect> {
        self.region_reads.set(self.region_reads.get() + 1);
        None
    }

    fn word_anchor(&self, _index: usize) -> Option<WordAnchor> {
        self.anchor_reads.set(self.anchor_reads.get() + 1);
        None
    }
}

#[test]
fn each_query_runs_once_per_measurement() {
    let probe = ProbeLayout::default();
    let pose = measurer().measure(&probe);
    assert_eq!(probe.region_reads.get(), 1);
    assert_eq!(probe.anchor_reads.get(), 4);
    assert_eq!(pose.anchored_words(), 0);
}

#[test]
fn split_region_handles_degenerate_inputs() {
    assert!(split_region(Rect::new(0.0, 0.0, 10.0, 10.0), 0, 3.0).is_empty());
    let tiny = split_region(Rect::new(0.0, 0.0, 4.0, 10.0), 3, 3.0);
    assert!(tiny.iter().all(|r| r.width() == 0.0));
    let one = split_region(Rect::new(5.0, 5.0, 105.0, 55.0), 1, 3.0);
    assert_eq!(one, vec![Rect::new(5.0, 5.0, 105.0, 55.0)]);
}
