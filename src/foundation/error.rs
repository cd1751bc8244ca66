/// Convenience result type used across the handoff crate.
pub type HandoffResult<T> = Result<T, HandoffError>;

/// Top-level error taxonomy.
///
/// Only setup-time problems surface here. Asset failures, missing destination geometry and
/// late callbacks after teardown are absorbed by the runtime path and never become errors.
#[derive(thiserror::Error, Debug)]
pub enum HandoffError {
    /// Invalid user-provided values (layout constants, indices, ranges).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or inconsistent configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Illegal sequence phase transition.
    #[error("phase error: {0}")]
    Phase(String),

    /// Errors while building or sampling a timeline.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandoffError {
    /// Build a [`HandoffError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HandoffError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`HandoffError::Phase`] value.
    pub fn phase(msg: impl Into<String>) -> Self {
        Self::Phase(msg.into())
    }

    /// Build a [`HandoffError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`HandoffError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// The animation engine could not be brought up at runtime.
///
/// Returned by an [`crate::EngineLoader`]. The sequencer answers it with the static fallback
/// path, which still dismisses the overlay and fires the completion notifier.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("animation engine unavailable: {reason}")]
pub struct EngineUnavailable {
    /// Human-readable cause reported by the loader.
    pub reason: String,
}

impl EngineUnavailable {
    /// Build an [`EngineUnavailable`] with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
