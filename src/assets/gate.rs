use crate::{config::AssetManifest, foundation::core::Millis};

/// A request for the host to begin loading one manifest image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LoadRequest {
    /// Manifest index, echoed back in [`AssetGate::settle`].
    pub index: usize,
    /// Image locator.
    pub url: String,
}

/// Terminal state of one image load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettleOutcome {
    /// The image decoded.
    Loaded,
    /// The image errored; gates exactly like a successful load.
    Failed,
}

/// Why readiness fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadyCause {
    /// Every image settled and fonts resolved.
    AllSettled,
    /// The safety timeout elapsed first.
    SafetyTimeout,
}

/// The one-time readiness signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ReadySignal {
    /// What released the gate.
    pub cause: ReadyCause,
    /// Host time at which the gate released.
    pub at: Millis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GateState {
    Idle,
    Pending { deadline: Millis },
    Ready,
    Cancelled,
}

/// Waits for every manifest image to settle and fonts to resolve, or for a safety timeout.
///
/// The gate is a pure state holder: the host performs the loads and forwards outcomes, and polls
/// [`AssetGate::poll`] when [`AssetGate::next_deadline`] comes due. Readiness is reported exactly
/// once; afterwards the safety timer is disarmed and every further event is ignored.
#[derive(Clone, Debug)]
pub struct AssetGate {
    manifest: AssetManifest,
    safety_timeout: Millis,
    settled: Vec<Option<SettleOutcome>>,
    fonts_ready: bool,
    state: GateState,
}

impl AssetGate {
    /// New idle gate over `manifest`.
    pub fn new(manifest: AssetManifest, safety_timeout: Millis) -> Self {
        let settled = vec![None; manifest.len()];
        Self {
            manifest,
            safety_timeout,
            settled,
            fonts_ready: false,
            state: GateState::Idle,
        }
    }

    /// Arm the safety timer at `now` and return the loads to start, all at once.
    ///
    /// Calling this again after the first call returns no requests.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self, now: Millis) -> Vec<LoadRequest> {
        if self.state != GateState::Idle {
            tracing::trace!("asset gate already started");
            return Vec::new();
        }
        self.state = GateState::Pending {
            deadline: now.plus(self.safety_timeout),
        };
        self.manifest
            .images()
            .iter()
            .enumerate()
            .map(|(index, url)| LoadRequest {
                index,
                url: url.clone(),
            })
            .collect()
    }

    /// Record the terminal outcome of image `index`.
    pub fn settle(
        &mut self,
        index: usize,
        outcome: SettleOutcome,
        now: Millis,
    ) -> Option<ReadySignal> {
        if !self.is_pending() {
            return None;
        }
        let Some(slot) = self.settled.get_mut(index) else {
            tracing::warn!(index, "settle for unknown asset index ignored");
            return None;
        };
        if slot.is_some() {
            tracing::trace!(index, "duplicate asset settle ignored");
            return None;
        }
        *slot = Some(outcome);
        if outcome == SettleOutcome::Failed {
            tracing::debug!(index, url = %self.manifest.images()[index], "asset failed to load");
        }
        self.release_if_settled(now)
    }

    /// Record that web fonts have resolved.
    ///
    /// Fonts may resolve before [`AssetGate::start`]; the indicator is kept and counts once the
    /// gate is armed.
    pub fn fonts_ready(&mut self, now: Millis) -> Option<ReadySignal> {
        if self.fonts_ready || matches!(self.state, GateState::Ready | GateState::Cancelled) {
            return None;
        }
        self.fonts_ready = true;
        if !self.is_pending() {
            tracing::trace!("fonts ready before gate start");
            return None;
        }
        self.release_if_settled(now)
    }

    /// Check readiness at `now`: release if everything has settled, else fire the safety
    /// timeout if it is due.
    pub fn poll(&mut self, now: Millis) -> Option<ReadySignal> {
        let GateState::Pending { deadline } = self.state else {
            return None;
        };
        if let Some(signal) = self.release_if_settled(now) {
            return Some(signal);
        }
        if now < deadline {
            return None;
        }
        tracing::debug!(
            pending = self.pending_count(),
            fonts_ready = self.fonts_ready,
            "asset gate forced by safety timeout"
        );
        Some(self.release(ReadyCause::SafetyTimeout, now))
    }

    /// When the host must next call [`AssetGate::poll`]; `None` once the timer is disarmed.
    pub fn next_deadline(&self) -> Option<Millis> {
        match self.state {
            GateState::Pending { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Disarm the gate without signalling; used on teardown.
    pub fn cancel(&mut self) {
        if self.state != GateState::Ready {
            self.state = GateState::Cancelled;
        }
    }

    /// Whether readiness has been signalled.
    pub fn is_ready(&self) -> bool {
        self.state == GateState::Ready
    }

    /// Whether the gate was cancelled before signalling.
    pub fn is_cancelled(&self) -> bool {
        self.state == GateState::Cancelled
    }

    /// Number of images still unsettled.
    pub fn pending_count(&self) -> usize {
        self.settled.iter().filter(|s| s.is_none()).count()
    }

    /// Recorded outcome of image `index`.
    pub fn outcome(&self, index: usize) -> Option<SettleOutcome> {
        self.settled.get(index).copied().flatten()
    }

    fn is_pending(&self) -> bool {
        matches!(self.state, GateState::Pending { .. })
    }

    fn release_if_settled(&mut self, now: Millis) -> Option<ReadySignal> {
        if self.fonts_ready && self.pending_count() == 0 {
            Some(self.release(ReadyCause::AllSettled, now))
        } else {
            None
        }
    }

    fn release(&mut self, cause: ReadyCause, at: Millis) -> ReadySignal {
        self.state = GateState::Ready;
        tracing::debug!(?cause, at = at.0, "assets ready");
        ReadySignal { cause, at }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/gate.rs"]
mod tests;
