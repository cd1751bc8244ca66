/// Fire-once "page ready" callback owned by the host.
///
/// The callback is consumed on [`CompletionNotifier::fire`], so it cannot run twice.
/// [`CompletionNotifier::cancel`] drops it unfired; a notifier built with
/// [`CompletionNotifier::none`] fires as a no-op.
pub struct CompletionNotifier {
    callback: Option<Box<dyn FnOnce()>>,
    state: NotifierState,
}

/// Lifecycle of a [`CompletionNotifier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifierState {
    /// Not fired yet.
    Pending,
    /// Fired once.
    Fired,
    /// Torn down before firing.
    Cancelled,
}

impl CompletionNotifier {
    /// Notifier invoking `callback` on completion.
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
            state: NotifierState::Pending,
        }
    }

    /// Notifier without a host callback.
    pub fn none() -> Self {
        Self {
            callback: None,
            state: NotifierState::Pending,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> NotifierState {
        self.state
    }

    /// Invoke the callback if still pending. Returns whether this call fired.
    pub fn fire(&mut self) -> bool {
        if self.state != NotifierState::Pending {
            return false;
        }
        self.state = NotifierState::Fired;
        if let Some(cb) = self.callback.take() {
            cb();
        }
        true
    }

    /// Drop the callback unfired. No effect after firing.
    pub fn cancel(&mut self) {
        if self.state == NotifierState::Pending {
            self.state = NotifierState::Cancelled;
            self.callback = None;
        }
    }
}

impl Default for CompletionNotifier {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for CompletionNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionNotifier")
            .field("has_callback", &self.callback.is_some())
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/notifier.rs"]
mod tests;
