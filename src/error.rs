//! Error type for listener execution.
//!
//! Routing itself never errors: unresolved paths degrade to `false`, `0`,
//! empty or no-op results. The one fallible surface is a listener body,
//! which reports failure through [`ListenerError`]. A failing listener is
//! isolated: it is reported on stderr, its registration stays, and delivery
//! continues along the propagation path.

use thiserror::Error;

/// # Errors produced by listener execution.
///
/// Returned from [`Listener::on_event`](crate::Listener::on_event). The
/// router treats a failed listener as *invoked*: it still counts toward the
/// boolean result of `emit`/`broadcast`.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ListenerError {
    /// The listener ran and reported a failure.
    #[error("listener failed: {reason}")]
    Failed {
        /// The underlying failure message.
        reason: String,
    },

    /// The listener panicked; the panic was caught at the delivery site.
    #[error("listener panicked: {reason}")]
    Panicked {
        /// Formatted panic payload.
        reason: String,
    },
}

impl ListenerError {
    /// Creates a [`ListenerError::Failed`] from any message.
    ///
    /// # Example
    /// ```
    /// use treecast::ListenerError;
    ///
    /// let err = ListenerError::failed("boom");
    /// assert_eq!(err.as_label(), "listener_failed");
    /// ```
    pub fn failed(reason: impl Into<String>) -> Self {
        ListenerError::Failed {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Failed { .. } => "listener_failed",
            ListenerError::Panicked { .. } => "listener_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Failed { reason } => format!("failed: {reason}"),
            ListenerError::Panicked { reason } => format!("panicked: {reason}"),
        }
    }
}
