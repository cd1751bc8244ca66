use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::{
    assets::gate::LoadRequest,
    foundation::core::{Rect, Viewport},
    foundation::error::EngineUnavailable,
    layout::provider::StaticLayout,
};

#[derive(Debug, Default)]
struct RecordingHost {
    loads: Vec<LoadRequest>,
    paint_requests: usize,
    legacy_removed: Vec<String>,
    renders: Vec<OverlayScene>,
    dismissed: usize,
    phases: Vec<SequencePhase>,
}

impl OverlayHost for RecordingHost {
    fn load_assets(&mut self, requests: &[LoadRequest]) {
        self.loads.extend_from_slice(requests);
    }

    fn request_stable_paint(&mut self) {
        self.paint_requests += 1;
    }

    fn remove_legacy_indicator(&mut self, selector: &str) {
        self.legacy_removed.push(selector.to_owned());
    }

    fn render(&mut self, scene: &OverlayScene) {
        self.renders.push(scene.clone());
    }

    fn dismiss_overlay(&mut self) {
        self.dismissed += 1;
    }

    fn phase_changed(&mut self, phase: SequencePhase) {
        self.phases.push(phase);
    }
}

fn layout() -> StaticLayout {
    StaticLayout::new(Viewport::new(1440.0, 900.0, 1.0).unwrap())
        .with_region(Rect::new(800.0, 150.0, 1406.0, 750.0))
}

fn counter() -> (CompletionNotifier, Rc<Cell<u32>>) {
    let calls = Rc::new(Cell::new(0));
    let c = Rc::clone(&calls);
    (CompletionNotifier::new(move || c.set(c.get() + 1)), calls)
}

fn ready_sequencer() -> (TransitionSequencer<RecordingHost>, Rc<Cell<u32>>) {
    let (notifier, calls) = counter();
    let mut seq =
        TransitionSequencer::new(HandoffConfig::default(), RecordingHost::default(), notifier)
            .unwrap();
    let l = layout();
    seq.mount(Millis(0), &l);
    for i in 0..3 {
        seq.on_asset_settled(i, SettleOutcome::Loaded, Millis(10));
    }
    seq.on_fonts_ready(Millis(20));
    (seq, calls)
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let mut cfg = HandoffConfig::default();
    cfg.timings.safety_timeout = Millis::ZERO;
    let (notifier, _) = counter();
    assert!(TransitionSequencer::new(cfg, RecordingHost::default(), notifier).is_err());
}

#[test]
fn mount_renders_start_pose_and_requests_loads() {
    let (notifier, _) = counter();
    let mut seq =
        TransitionSequencer::new(HandoffConfig::default(), RecordingHost::default(), notifier)
            .unwrap();
    assert_eq!(seq.phase(), SequencePhase::Idle);
    seq.mount(Millis(0), &layout());

    assert_eq!(seq.phase(), SequencePhase::AwaitingAssets);
    assert_eq!(seq.host().loads.len(), 3);
    assert_eq!(seq.host().renders.len(), 1);
    assert!(seq.host().renders[0].panels.iter().all(|p| p.opacity == 0.0));
    assert_eq!(seq.next_deadline(), Some(Millis(4000)));

    // A second mount is a no-op.
    seq.mount(Millis(5), &layout());
    assert_eq!(seq.host().loads.len(), 3);
}

#[test]
fn readiness_requests_one_stable_paint_before_revealing() {
    let (mut seq, _) = ready_sequencer();
    assert_eq!(seq.host().paint_requests, 1);
    assert_eq!(seq.phase(), SequencePhase::AwaitingAssets);
    assert_eq!(seq.next_deadline(), None);

    // Duplicate settle and a late safety poll do not re-trigger anything.
    seq.on_asset_settled(0, SettleOutcome::Loaded, Millis(30));
    seq.tick(Millis(5000), &layout());
    assert_eq!(seq.host().paint_requests, 1);
    assert_eq!(seq.phase(), SequencePhase::AwaitingAssets);
}

#[test]
fn stable_paint_starts_reveal_once() {
    let (mut seq, _) = ready_sequencer();
    let l = layout();
    seq.on_stable_paint(Millis(100), &l);
    assert_eq!(seq.phase(), SequencePhase::Revealing);
    assert_eq!(seq.host().legacy_removed, ["#preloader"]);
    let schedule = seq.schedule().unwrap();
    assert_eq!(schedule.reveal_end, Millis(1120));
    assert_eq!(schedule.morph_start, Millis(1720));

    seq.on_stable_paint(Millis(150), &l);
    assert_eq!(seq.host().legacy_removed, ["#preloader"]);
    assert_eq!(
        seq.phase_history()
            .iter()
            .filter(|(p, _)| *p == SequencePhase::Revealing)
            .count(),
        1
    );
}

#[test]
fn fonts_resolved_before_mount_release_with_the_last_image() {
    let (notifier, _) = counter();
    let mut seq =
        TransitionSequencer::new(HandoffConfig::default(), RecordingHost::default(), notifier)
            .unwrap();
    let l = layout();
    seq.on_fonts_ready(Millis(0));
    seq.mount(Millis(0), &l);
    assert_eq!(seq.host().paint_requests, 0);

    for i in 0..3 {
        seq.on_asset_settled(i, SettleOutcome::Loaded, Millis(50));
    }
    assert_eq!(seq.host().paint_requests, 1);
    assert_eq!(seq.next_deadline(), None);

    seq.tick(Millis(4000), &l);
    assert_eq!(seq.host().paint_requests, 1);
}

#[test]
fn legacy_indicator_is_left_alone_without_a_selector() {
    let (notifier, _) = counter();
    let mut cfg = HandoffConfig::default();
    cfg.legacy_indicator_selector = None;
    let mut seq = TransitionSequencer::new(cfg, RecordingHost::default(), notifier).unwrap();
    let l = layout();
    seq.mount(Millis(0), &l);
    seq.on_fonts_ready(Millis(0));
    for i in 0..3 {
        seq.on_asset_settled(i, SettleOutcome::Loaded, Millis(10));
    }
    seq.on_stable_paint(Millis(20), &l);
    assert_eq!(seq.phase(), SequencePhase::Revealing);
    assert!(seq.host().legacy_removed.is_empty());
}

#[test]
fn unsolicited_stable_paint_is_ignored() {
    let (notifier, _) = counter();
    let mut seq =
        TransitionSequencer::new(HandoffConfig::default(), RecordingHost::default(), notifier)
            .unwrap();
    let l = layout();
    seq.mount(Millis(0), &l);
    seq.on_stable_paint(Millis(1), &l);
    assert_eq!(seq.phase(), SequencePhase::AwaitingAssets);
}

#[test]
fn full_run_walks_every_phase_and_fires_once() {
    let (mut seq, calls) = ready_sequencer();
    let l = layout();
    seq.on_stable_paint(Millis(100), &l);

    let mut now = 100;
    while seq.phase() != SequencePhase::Complete && now < 10_000 {
        now += 16;
        seq.tick(Millis(now), &l);
    }

    assert_eq!(
        seq.host().phases,
        vec![
            SequencePhase::AwaitingAssets,
            SequencePhase::Revealing,
            SequencePhase::Holding,
            SequencePhase::Morphing,
            SequencePhase::FadingOut,
            SequencePhase::Complete,
        ]
    );
    assert_eq!(calls.get(), 1);
    assert_eq!(seq.host().dismissed, 1);
    // Fade ends at 100 + 3420.
    assert_eq!(seq.phase_history().last().unwrap().0, SequencePhase::Complete);
    assert!(seq.phase_history().last().unwrap().1 >= Millis(3520));
    assert_eq!(seq.host().renders.last().unwrap().opacity, 0.0);

    let renders = seq.host().renders.len();
    seq.tick(Millis(now + 500), &l);
    seq.unmount();
    assert_eq!(seq.host().renders.len(), renders);
    assert_eq!(calls.get(), 1);
}

#[test]
fn one_large_tick_still_measures_and_completes_in_order() {
    let (mut seq, calls) = ready_sequencer();
    let l = layout();
    seq.on_stable_paint(Millis(100), &l);
    seq.tick(Millis(60_000), &l);

    assert_eq!(seq.phase(), SequencePhase::Complete);
    assert_eq!(seq.host().phases.len(), 6);
    assert!(seq.destination().is_some());
    assert_eq!(calls.get(), 1);
}

#[test]
fn destination_is_measured_only_when_morph_begins() {
    let (mut seq, _) = ready_sequencer();
    let l = layout();
    seq.on_stable_paint(Millis(0), &l);
    seq.tick(Millis(1719), &l);
    assert_eq!(seq.phase(), SequencePhase::Holding);
    assert!(seq.destination().is_none());

    // The region appears only now; the morph must see it.
    let late = layout().with_region(Rect::new(700.0, 100.0, 1306.0, 700.0));
    seq.tick(Millis(1720), &late);
    assert_eq!(seq.phase(), SequencePhase::Morphing);
    let dest = seq.destination().unwrap();
    let crate::layout::measure::ImageDestination::Region { region, .. } = &dest.images else {
        panic!("expected region destination");
    };
    assert_eq!(region.x0, 700.0);
}

#[test]
fn engine_unavailable_still_reveals_page() {
    let (notifier, calls) = counter();
    let loader = || -> Result<SequencerEngine, EngineUnavailable> {
        Err(EngineUnavailable::new("import failed"))
    };
    let mut seq = TransitionSequencer::with_engine_loader(
        HandoffConfig::default(),
        RecordingHost::default(),
        loader,
        notifier,
    )
    .unwrap();
    let l = layout();
    seq.mount(Millis(0), &l);
    seq.tick(Millis(4000), &l);
    seq.on_stable_paint(Millis(4016), &l);

    assert_eq!(seq.phase(), SequencePhase::Complete);
    assert_eq!(seq.host().dismissed, 1);
    assert_eq!(calls.get(), 1);
    assert!(!seq.host().phases.contains(&SequencePhase::Morphing));
    assert!(seq.schedule().is_none());

    seq.tick(Millis(9000), &l);
    assert_eq!(calls.get(), 1);
}

#[test]
fn teardown_while_awaiting_paint_drops_the_run() {
    let (mut seq, calls) = ready_sequencer();
    let l = layout();
    seq.unmount();
    seq.on_stable_paint(Millis(100), &l);
    seq.tick(Millis(10_000), &l);
    assert_eq!(seq.phase(), SequencePhase::AwaitingAssets);
    assert!(seq.host().legacy_removed.is_empty());
    assert_eq!(calls.get(), 0);
    assert!(seq.is_torn_down());
}

#[test]
fn teardown_during_fade_never_notifies() {
    let (mut seq, calls) = ready_sequencer();
    let l = layout();
    seq.on_stable_paint(Millis(0), &l);
    seq.tick(Millis(3000), &l);
    assert_eq!(seq.phase(), SequencePhase::FadingOut);

    seq.unmount();
    seq.tick(Millis(10_000), &l);
    assert_eq!(seq.phase(), SequencePhase::FadingOut);
    assert_eq!(seq.host().dismissed, 0);
    assert_eq!(calls.get(), 0);
}

#[test]
fn debug_output_names_phase() {
    let (seq, _) = ready_sequencer();
    assert!(format!("{seq:?}").contains("AwaitingAssets"));
}
