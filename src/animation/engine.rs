use crate::{
    animation::scene::OverlayScene,
    animation::timeline::Timeline,
    foundation::core::Millis,
    foundation::error::{HandoffError, HandoffResult},
};

#[derive(Clone, Debug)]
struct Playback {
    timeline: Timeline,
    origin: Millis,
}

/// Plays one [`Timeline`] against the host clock.
///
/// The engine is what an [`crate::EngineLoader`] hands to the sequencer. It owns at most one
/// running timeline; [`SequencerEngine::kill`] drops it so no further frames are produced.
#[derive(Clone, Debug)]
pub struct SequencerEngine {
    time_scale: f64,
    playback: Option<Playback>,
}

impl Default for SequencerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SequencerEngine {
    /// Engine running at real-time speed.
    pub fn new() -> Self {
        Self {
            time_scale: 1.0,
            playback: None,
        }
    }

    /// Engine whose timeline advances `time_scale` ms per host ms.
    pub fn with_time_scale(time_scale: f64) -> HandoffResult<Self> {
        if !(time_scale.is_finite() && time_scale > 0.0) {
            return Err(HandoffError::validation(
                "engine time_scale must be finite and > 0",
            ));
        }
        Ok(Self {
            time_scale,
            playback: None,
        })
    }

    /// Configured time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Start playing `timeline` with its zero at host time `now`, replacing any running one.
    pub fn play(&mut self, timeline: Timeline, now: Millis) {
        self.playback = Some(Playback {
            timeline,
            origin: now,
        });
    }

    /// Whether a timeline is loaded.
    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Timeline position for host time `now`, or `None` when idle.
    pub fn position(&self, now: Millis) -> Option<Millis> {
        let pb = self.playback.as_ref()?;
        Some(now.since(pb.origin).scaled(self.time_scale))
    }

    /// Running timeline.
    pub fn timeline(&self) -> Option<&Timeline> {
        self.playback.as_ref().map(|pb| &pb.timeline)
    }

    /// Running timeline, for appending tweens while it plays.
    pub fn timeline_mut(&mut self) -> Option<&mut Timeline> {
        self.playback.as_mut().map(|pb| &mut pb.timeline)
    }

    /// Scene at host time `now`.
    pub fn sample(&self, now: Millis) -> Option<OverlayScene> {
        let pos = self.position(now)?;
        self.timeline().map(|tl| tl.sample(pos))
    }

    /// Stop and discard the running timeline.
    pub fn kill(&mut self) -> Option<Timeline> {
        self.playback.take().map(|pb| pb.timeline)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/engine.rs"]
mod tests;
