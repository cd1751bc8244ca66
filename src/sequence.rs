pub(crate) mod choreography;
pub(crate) mod host;
pub(crate) mod notifier;
pub(crate) mod phase;
pub(crate) mod sequencer;
