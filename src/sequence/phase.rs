use crate::{
    foundation::core::Millis,
    foundation::error::{HandoffError, HandoffResult},
};

/// Phases of the handoff, in the only order they may be entered.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SequencePhase {
    /// Constructed, not mounted.
    #[default]
    Idle,
    /// Waiting for images and fonts (or the safety timeout).
    AwaitingAssets,
    /// Words fading and rising in.
    Revealing,
    /// Pause before the morph.
    Holding,
    /// Panels and words moving toward the page.
    Morphing,
    /// Whole overlay cross-fading out.
    FadingOut,
    /// Overlay dismissed, notifier fired.
    Complete,
}

impl SequencePhase {
    /// Whether no further transition can follow.
    pub fn is_terminal(self) -> bool {
        self == Self::Complete
    }
}

/// Forward-only record of phase transitions.
///
/// Each phase is entered at most once and never after a later one. Skipping phases is allowed
/// (the engine-unavailable fallback goes straight to [`SequencePhase::Complete`]).
#[derive(Clone, Debug, Default)]
pub struct PhaseTracker {
    current: SequencePhase,
    history: Vec<(SequencePhase, Millis)>,
}

impl PhaseTracker {
    /// Tracker in [`SequencePhase::Idle`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn current(&self) -> SequencePhase {
        self.current
    }

    /// Every entered phase with its entry time, oldest first.
    pub fn history(&self) -> &[(SequencePhase, Millis)] {
        &self.history
    }

    /// Entry time of `phase`, if it was entered.
    pub fn entered_at(&self, phase: SequencePhase) -> Option<Millis> {
        self.history
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, at)| *at)
    }

    /// Move forward to `next` at `at`.
    pub fn advance(&mut self, next: SequencePhase, at: Millis) -> HandoffResult<()> {
        if next <= self.current {
            return Err(HandoffError::phase(format!(
                "cannot move from {:?} to {:?}",
                self.current, next
            )));
        }
        tracing::debug!(from = ?self.current, to = ?next, at = at.0, "phase transition");
        self.current = next;
        self.history.push((next, at));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/phase.rs"]
mod tests;
