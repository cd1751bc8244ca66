use super::*;
use crate::animation::scene::{PanelPose, WordPose};

fn base() -> OverlayScene {
    OverlayScene {
        opacity: 1.0,
        panels: vec![PanelPose {
            rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            opacity: 1.0,
            filter: Filter {
                saturation: 0.25,
                brightness: 0.55,
            },
        }],
        words: vec![WordPose {
            text: "STARTE".to_owned(),
            placement: WordBox {
                left: 500.0,
                top: 300.0,
                x_percent: -50.0,
                font_size: 100.0,
            },
            reveal: WordReveal {
                opacity: 0.0,
                rise: 50.0,
            },
            color: Rgba8::WHITE,
        }],
    }
}

#[test]
fn empty_timeline_samples_base() {
    let tl = Timeline::new(base());
    assert_eq!(tl.end(), Millis::ZERO);
    assert_eq!(tl.sample(Millis(10_000)), base());
}

#[test]
fn tween_holds_start_value_until_it_begins() {
    let mut tl = Timeline::new(base());
    let end = tl
        .to(
            Millis(100),
            Millis(100),
            Ease::Linear,
            Prop::OverlayOpacity { value: 0.0 },
        )
        .unwrap();
    assert_eq!(end, Millis(200));
    assert_eq!(tl.sample(Millis(50)).opacity, 1.0);
    assert!((tl.sample(Millis(150)).opacity - 0.5).abs() < 1e-12);
    assert_eq!(tl.sample(Millis(200)).opacity, 0.0);
    assert_eq!(tl.sample(Millis(999)).opacity, 0.0);
}

#[test]
fn later_tween_starts_from_value_left_by_earlier_one() {
    let mut tl = Timeline::new(base());
    let moved = Rect::new(200.0, 0.0, 300.0, 100.0);
    tl.to(
        Millis(0),
        Millis(100),
        Ease::Linear,
        Prop::PanelRect {
            index: 0,
            value: moved,
        },
    )
    .unwrap();
    tl.to(
        Millis(100),
        Millis(100),
        Ease::Linear,
        Prop::PanelRect {
            index: 0,
            value: Rect::new(200.0, -100.0, 300.0, 0.0),
        },
    )
    .unwrap();

    assert_eq!(tl.tweens().len(), 2);
    let mid = tl.sample(Millis(150)).panels[0].rect;
    assert_eq!(mid, Rect::new(200.0, -50.0, 300.0, 50.0));
}

#[test]
fn properties_of_one_element_animate_independently() {
    let mut tl = Timeline::new(base());
    tl.to(
        Millis(0),
        Millis(1000),
        Ease::Linear,
        Prop::PanelRect {
            index: 0,
            value: Rect::new(0.0, 0.0, 50.0, 50.0),
        },
    )
    .unwrap();
    tl.to(
        Millis(500),
        Millis(500),
        Ease::Linear,
        Prop::PanelFilter {
            index: 0,
            value: Filter {
                saturation: 0.05,
                brightness: 0.5,
            },
        },
    )
    .unwrap();

    let at = tl.sample(Millis(500)).panels[0];
    assert_eq!(at.rect, Rect::new(0.0, 0.0, 75.0, 75.0));
    assert_eq!(at.filter.saturation, 0.25);
    let done = tl.sample(Millis(1000)).panels[0];
    assert_eq!(done.rect, Rect::new(0.0, 0.0, 50.0, 50.0));
    assert_eq!(done.filter.saturation, 0.05);
}

#[test]
fn set_snaps_without_interpolation() {
    let mut tl = Timeline::new(base());
    tl.set(
        Millis(300),
        Prop::WordColor {
            index: 0,
            value: Rgba8::rgb(0, 0, 0),
        },
    )
    .unwrap();
    assert_eq!(tl.sample(Millis(299)).words[0].color, Rgba8::WHITE);
    assert_eq!(tl.sample(Millis(300)).words[0].color, Rgba8::rgb(0, 0, 0));
}

#[test]
fn out_of_range_target_is_rejected() {
    let mut tl = Timeline::new(base());
    let err = tl
        .to(
            Millis(0),
            Millis(10),
            Ease::Linear,
            Prop::WordReveal {
                index: 3,
                value: WordReveal {
                    opacity: 1.0,
                    rise: 0.0,
                },
            },
        )
        .unwrap_err();
    assert!(err.to_string().contains("animation error"));
    assert!(tl.tweens().is_empty());
}

#[test]
fn labels_and_end_since_track_positions() {
    let mut tl = Timeline::new(base());
    tl.add_label("hold", Millis(1720));
    assert_eq!(tl.label("hold"), Some(Millis(1720)));
    assert_eq!(tl.label("missing"), None);

    tl.to(
        Millis(0),
        Millis(500),
        Ease::Linear,
        Prop::OverlayOpacity { value: 0.5 },
    )
    .unwrap();
    let first_new = tl.tweens().len();
    assert_eq!(tl.end_since(first_new), None);
    tl.to(
        Millis(1720),
        Millis(1200),
        Ease::Power3InOut,
        Prop::OverlayOpacity { value: 1.0 },
    )
    .unwrap();
    assert_eq!(tl.end_since(first_new), Some(Millis(2920)));
    assert_eq!(tl.end(), Millis(2920));
}

#[test]
fn opacity_writes_are_clamped() {
    let mut tl = Timeline::new(base());
    tl.set(Millis(0), Prop::OverlayOpacity { value: 4.0 }).unwrap();
    assert_eq!(tl.sample(Millis(0)).opacity, 1.0);
}
