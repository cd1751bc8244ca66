use crate::{
    animation::engine::SequencerEngine,
    animation::scene::OverlayScene,
    assets::gate::LoadRequest,
    foundation::error::EngineUnavailable,
    sequence::phase::SequencePhase,
};

/// Side effects the sequencer asks of its host runtime.
///
/// The sequencer is the only writer of the overlay; it never touches the page it measures.
pub trait OverlayHost {
    /// Start loading these images concurrently and report each through
    /// [`crate::TransitionSequencer::on_asset_settled`].
    fn load_assets(&mut self, requests: &[LoadRequest]);

    /// Defer until the page has painted twice, then call
    /// [`crate::TransitionSequencer::on_stable_paint`].
    fn request_stable_paint(&mut self);

    /// Remove the static loading indicator matching `selector`, if the page shipped one.
    ///
    /// Only called when the configuration names a selector. Browser hosts can delegate to
    /// `handoff::web::remove_legacy_indicator`.
    fn remove_legacy_indicator(&mut self, selector: &str);

    /// Draw the overlay as described by `scene`.
    fn render(&mut self, scene: &OverlayScene);

    /// Hide the overlay and stop it from intercepting input.
    fn dismiss_overlay(&mut self);

    /// Observe a phase transition.
    fn phase_changed(&mut self, _phase: SequencePhase) {}
}

/// Brings up the animation engine when the sequence starts.
pub trait EngineLoader {
    /// Load an engine, or report why none is available.
    fn load(&mut self) -> Result<SequencerEngine, EngineUnavailable>;
}

impl<F> EngineLoader for F
where
    F: FnMut() -> Result<SequencerEngine, EngineUnavailable>,
{
    fn load(&mut self) -> Result<SequencerEngine, EngineUnavailable> {
        self()
    }
}

/// Loader for the in-crate engine; never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinEngine;

impl EngineLoader for BuiltinEngine {
    fn load(&mut self) -> Result<SequencerEngine, EngineUnavailable> {
        Ok(SequencerEngine::new())
    }
}
