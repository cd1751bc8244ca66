//! Handoff sequences the transition from a full-screen preloader overlay into a landing page's
//! hero section.
//!
//! The crate is host-agnostic and deterministic: the host forwards load events, paint callbacks
//! and clock ticks, and implements the side effects through [`OverlayHost`]. In order:
//!
//! - Gate on the image manifest and fonts, bounded by a safety timeout ([`AssetGate`])
//! - Reveal the overlay words, hold, then morph the image panels and words onto the page's own
//!   layout ([`LayoutMeasurer`] reads it through a [`LayoutProvider`])
//! - Fade the overlay out, dismiss it and fire the [`CompletionNotifier`] exactly once
//!
//! [`TransitionSequencer`] owns the whole sequence.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod assets;
/// Handoff configuration and its defaults.
pub mod config;
pub(crate) mod layout;
pub(crate) mod sequence;
/// DOM-backed layout for browser hosts.
#[cfg(feature = "web")]
pub mod web;

pub use crate::foundation::core::{Millis, Point, Rect, Rgba8, Vec2, Viewport};
pub use crate::foundation::error::{EngineUnavailable, HandoffError, HandoffResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::engine::SequencerEngine;
pub use crate::animation::scene::{
    Filter, OverlayScene, PanelPose, WordBox, WordPose, WordReveal,
};
pub use crate::animation::timeline::{Prop, Timeline, Tween};
pub use crate::animation::tween::Lerp;
pub use crate::assets::gate::{AssetGate, LoadRequest, ReadyCause, ReadySignal, SettleOutcome};
pub use crate::config::{
    AssetManifest, HandoffConfig, LayoutParams, Palette, Timings, Word, WordRole, WordSequence,
};
pub use crate::layout::measure::{
    AnchorSource, DestinationPose, ImageDestination, LayoutMeasurer, WordDestination,
    split_region,
};
pub use crate::layout::pose::{start_font_size, start_scene};
pub use crate::layout::provider::{LayoutProvider, StaticLayout, WordAnchor};
pub use crate::sequence::host::{BuiltinEngine, EngineLoader, OverlayHost};
pub use crate::sequence::notifier::{CompletionNotifier, NotifierState};
pub use crate::sequence::phase::{PhaseTracker, SequencePhase};
pub use crate::sequence::sequencer::{Schedule, TransitionSequencer};
