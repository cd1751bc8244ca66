use crate::{
    animation::engine::SequencerEngine,
    animation::scene::OverlayScene,
    assets::gate::{AssetGate, ReadySignal, SettleOutcome},
    config::HandoffConfig,
    foundation::core::Millis,
    foundation::error::{HandoffError, HandoffResult},
    layout::measure::{DestinationPose, LayoutMeasurer},
    layout::pose::start_scene,
    layout::provider::LayoutProvider,
    sequence::choreography::{self, HOLD_LABEL},
    sequence::host::{BuiltinEngine, EngineLoader, OverlayHost},
    sequence::notifier::CompletionNotifier,
    sequence::phase::{PhaseTracker, SequencePhase},
};

/// Timeline positions of the phase boundaries, filled in as they become known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// End of the last word reveal (Holding starts).
    pub reveal_end: Millis,
    /// Morph start (Morphing starts).
    pub morph_start: Millis,
    /// Morph barrier (FadingOut starts); known once the destination is measured.
    pub morph_end: Option<Millis>,
    /// Fade end (Complete); known once the fade is placed.
    pub fade_end: Option<Millis>,
}

/// One-shot preloader-to-page handoff.
///
/// Driven entirely by host events and clock ticks:
///
/// 1. [`mount`](Self::mount) positions the overlay and starts the asset loads.
/// 2. [`on_asset_settled`](Self::on_asset_settled), [`on_fonts_ready`](Self::on_fonts_ready)
///    and [`tick`](Self::tick) feed the readiness gate; once it releases, the host is asked for a
///    stable paint.
/// 3. [`on_stable_paint`](Self::on_stable_paint) starts the timeline.
/// 4. [`tick`](Self::tick) walks Revealing, Holding, Morphing and FadingOut to Complete, which
///    dismisses the overlay and fires the notifier.
///
/// [`unmount`](Self::unmount) at any point before Complete cancels everything with no further
/// side effects. Events arriving after teardown, and duplicate readiness, are ignored.
pub struct TransitionSequencer<H, L = BuiltinEngine> {
    config: HandoffConfig,
    host: H,
    loader: L,
    notifier: CompletionNotifier,
    phases: PhaseTracker,
    gate: AssetGate,
    measurer: LayoutMeasurer,
    start: Option<OverlayScene>,
    engine: Option<SequencerEngine>,
    schedule: Option<Schedule>,
    destination: Option<DestinationPose>,
    started: bool,
    awaiting_paint: bool,
    torn_down: bool,
}

impl<H: OverlayHost> TransitionSequencer<H, BuiltinEngine> {
    /// Sequencer using the built-in engine.
    pub fn new(config: HandoffConfig, host: H, notifier: CompletionNotifier) -> HandoffResult<Self> {
        Self::with_engine_loader(config, host, BuiltinEngine, notifier)
    }
}

impl<H: OverlayHost, L: EngineLoader> TransitionSequencer<H, L> {
    /// Sequencer whose engine comes from `loader` when the reveal starts.
    pub fn with_engine_loader(
        config: HandoffConfig,
        host: H,
        loader: L,
        notifier: CompletionNotifier,
    ) -> HandoffResult<Self> {
        config.validate()?;
        let gate = AssetGate::new(config.asset_manifest.clone(), config.timings.safety_timeout);
        let measurer = LayoutMeasurer::from_config(&config);
        Ok(Self {
            config,
            host,
            loader,
            notifier,
            phases: PhaseTracker::new(),
            gate,
            measurer,
            start: None,
            engine: None,
            schedule: None,
            destination: None,
            started: false,
            awaiting_paint: false,
            torn_down: false,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> SequencePhase {
        self.phases.current()
    }

    /// Entered phases with host entry times.
    pub fn phase_history(&self) -> &[(SequencePhase, Millis)] {
        self.phases.history()
    }

    /// Phase boundaries, once the timeline exists.
    pub fn schedule(&self) -> Option<Schedule> {
        self.schedule
    }

    /// Destination measured at the start of the morph.
    pub fn destination(&self) -> Option<&DestinationPose> {
        self.destination.as_ref()
    }

    /// Configuration in use.
    pub fn config(&self) -> &HandoffConfig {
        &self.config
    }

    /// Host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the sequencer, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Whether [`unmount`](Self::unmount) was called.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// When the host must tick next for the safety timeout, if armed.
    pub fn next_deadline(&self) -> Option<Millis> {
        if self.torn_down {
            return None;
        }
        self.gate.next_deadline()
    }

    /// Position the overlay in its start pose and begin loading assets.
    #[tracing::instrument(skip_all, fields(now = now.0))]
    pub fn mount<P: LayoutProvider + ?Sized>(&mut self, now: Millis, layout: &P) {
        if self.torn_down || self.phase() != SequencePhase::Idle {
            tracing::trace!("mount ignored");
            return;
        }
        if let Err(err) = self.enter(SequencePhase::AwaitingAssets, now) {
            self.abort_to_page(now, &err.to_string());
            return;
        }

        let scene = start_scene(&self.config, layout.viewport());
        self.host.render(&scene);
        self.start = Some(scene);

        let requests = self.gate.start(now);
        self.host.load_assets(&requests);
        // Fonts may have resolved before mount.
        if let Some(signal) = self.gate.poll(now) {
            self.on_ready(signal);
        }
    }

    /// An image load reached a terminal state.
    pub fn on_asset_settled(&mut self, index: usize, outcome: SettleOutcome, now: Millis) {
        if self.torn_down {
            return;
        }
        if let Some(signal) = self.gate.settle(index, outcome, now) {
            self.on_ready(signal);
        }
    }

    /// Fonts finished loading. May arrive before [`mount`](Self::mount).
    pub fn on_fonts_ready(&mut self, now: Millis) {
        if self.torn_down {
            return;
        }
        if let Some(signal) = self.gate.fonts_ready(now) {
            self.on_ready(signal);
        }
    }

    /// The host's double-frame deferral completed; start the reveal.
    #[tracing::instrument(skip_all, fields(now = now.0))]
    pub fn on_stable_paint<P: LayoutProvider + ?Sized>(&mut self, now: Millis, layout: &P) {
        if self.torn_down || !self.awaiting_paint {
            tracing::trace!("stable paint ignored");
            return;
        }
        self.awaiting_paint = false;
        if let Err(err) = self.begin(now) {
            self.abort_to_page(now, &err.to_string());
            return;
        }
        // The reveal may already be due if the host paints late.
        self.tick(now, layout);
    }

    /// Advance to `now`: fire the safety timeout if due, walk due phases, render.
    pub fn tick<P: LayoutProvider + ?Sized>(&mut self, now: Millis, layout: &P) {
        if self.torn_down {
            return;
        }
        if let Some(signal) = self.gate.poll(now) {
            self.on_ready(signal);
        }
        if self.engine.is_none() {
            return;
        }
        if let Err(err) = self.advance(now, layout) {
            self.abort_to_page(now, &err.to_string());
            return;
        }
        if let Some(scene) = self.engine.as_ref().and_then(|e| e.sample(now)) {
            self.host.render(&scene);
        }
    }

    /// Tear down: cancel the gate, the timeline and the notifier. Idempotent.
    #[tracing::instrument(skip_all)]
    pub fn unmount(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.awaiting_paint = false;
        self.gate.cancel();
        if let Some(mut engine) = self.engine.take() {
            engine.kill();
            tracing::debug!(phase = ?self.phase(), "timeline cancelled on teardown");
        }
        self.notifier.cancel();
    }

    fn on_ready(&mut self, signal: ReadySignal) {
        if self.started {
            tracing::trace!(?signal, "duplicate readiness ignored");
            return;
        }
        self.started = true;
        self.awaiting_paint = true;
        tracing::debug!(cause = ?signal.cause, at = signal.at.0, "requesting stable paint");
        self.host.request_stable_paint();
    }

    fn begin(&mut self, now: Millis) -> HandoffResult<()> {
        self.enter(SequencePhase::Revealing, now)?;
        if let Some(selector) = self.config.legacy_indicator_selector.as_deref() {
            self.host.remove_legacy_indicator(selector);
        }

        let mut engine = match self.loader.load() {
            Ok(engine) => engine,
            Err(err) => {
                tracing::warn!(%err, "animation engine unavailable; revealing page without transition");
                self.finish_without_engine(now);
                return Ok(());
            }
        };

        let start = match self.start.clone() {
            Some(scene) => scene,
            None => return Err(HandoffError::phase("reveal started before mount")),
        };
        let (timeline, reveal_end) = choreography::reveal(start, &self.config)?;
        let morph_start = timeline
            .label(HOLD_LABEL)
            .unwrap_or_else(|| reveal_end.plus(self.config.timings.hold));
        self.schedule = Some(Schedule {
            reveal_end,
            morph_start,
            morph_end: None,
            fade_end: None,
        });
        engine.play(timeline, now);
        self.engine = Some(engine);
        Ok(())
    }

    fn advance<P: LayoutProvider + ?Sized>(&mut self, now: Millis, layout: &P) -> HandoffResult<()> {
        loop {
            let (Some(pos), Some(schedule)) = (
                self.engine.as_ref().and_then(|e| e.position(now)),
                self.schedule,
            ) else {
                return Ok(());
            };

            match self.phase() {
                SequencePhase::Revealing if pos >= schedule.reveal_end => {
                    self.enter(SequencePhase::Holding, now)?;
                }
                SequencePhase::Holding if pos >= schedule.morph_start => {
                    self.start_morph(now, schedule.morph_start, layout)?;
                }
                SequencePhase::Morphing if schedule.morph_end.is_some_and(|end| pos >= end) => {
                    self.start_fade(now)?;
                }
                SequencePhase::FadingOut if schedule.fade_end.is_some_and(|end| pos >= end) => {
                    self.complete(now)?;
                    return Ok(());
                }
                _ => return Ok(()),
            }
        }
    }

    fn start_morph<P: LayoutProvider + ?Sized>(
        &mut self,
        now: Millis,
        at: Millis,
        layout: &P,
    ) -> HandoffResult<()> {
        // Measured here and not earlier: the page's own entrance may still be settling.
        let dest = self.measurer.measure(layout);
        let Some(tl) = self.engine.as_mut().and_then(|e| e.timeline_mut()) else {
            return Ok(());
        };
        let morph_end = choreography::morph(tl, at, &dest, &self.config)?;
        if let Some(s) = self.schedule.as_mut() {
            s.morph_end = Some(morph_end);
        }
        self.destination = Some(dest);
        self.enter(SequencePhase::Morphing, now)
    }

    fn start_fade(&mut self, now: Millis) -> HandoffResult<()> {
        let Some(at) = self.schedule.and_then(|s| s.morph_end) else {
            return Ok(());
        };
        let Some(tl) = self.engine.as_mut().and_then(|e| e.timeline_mut()) else {
            return Ok(());
        };
        let fade_end = choreography::fade(tl, at, &self.config)?;
        if let Some(s) = self.schedule.as_mut() {
            s.fade_end = Some(fade_end);
        }
        self.enter(SequencePhase::FadingOut, now)
    }

    fn complete(&mut self, now: Millis) -> HandoffResult<()> {
        if let Some(scene) = self.engine.as_ref().and_then(|e| e.sample(now)) {
            self.host.render(&scene);
        }
        if let Some(mut engine) = self.engine.take() {
            engine.kill();
        }
        self.host.dismiss_overlay();
        self.enter(SequencePhase::Complete, now)?;
        self.notifier.fire();
        Ok(())
    }

    fn finish_without_engine(&mut self, now: Millis) {
        self.host.dismiss_overlay();
        if !self.phase().is_terminal() {
            if let Err(err) = self.enter(SequencePhase::Complete, now) {
                tracing::error!(%err, "could not record completion");
            }
        }
        self.notifier.fire();
    }

    // Any internal failure still hands the page over; the overlay must never stay up.
    fn abort_to_page(&mut self, now: Millis, reason: &str) {
        tracing::error!(reason, phase = ?self.phase(), "handoff aborted");
        if let Some(mut engine) = self.engine.take() {
            engine.kill();
        }
        self.gate.cancel();
        self.awaiting_paint = false;
        self.finish_without_engine(now);
    }

    fn enter(&mut self, phase: SequencePhase, now: Millis) -> HandoffResult<()> {
        self.phases.advance(phase, now)?;
        tracing::debug!(?phase, at = now.0, "phase entered");
        self.host.phase_changed(phase);
        Ok(())
    }
}

impl<H: std::fmt::Debug, L> std::fmt::Debug for TransitionSequencer<H, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionSequencer")
            .field("phase", &self.phases.current())
            .field("schedule", &self.schedule)
            .field("host", &self.host)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/sequencer.rs"]
mod tests;
