//! # Core listener trait
//!
//! [`Listener`] is the extension point for attaching event handlers to a
//! channel. Handlers are shared as [`ListenerRef`] (`Arc<dyn Listener<T>>`);
//! the `Arc` pointer is also the listener's identity for
//! [`remove_listener`](crate::Channel::remove_listener), so keep a clone of
//! the handle you registered if you intend to remove it later.
//!
//! ## Contract
//! - Invocations are awaited one at a time, in registration order; a slow
//!   listener delays the listeners and channels behind it on the same call.
//! - A returned [`ListenerError`] (or a panic) is reported on stderr and
//!   does not unregister the listener or stop propagation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::ListenerError;

/// Shared handle to a listener, used for registration, snapshots and
/// identity-based removal.
pub type ListenerRef<T> = Arc<dyn Listener<T>>;

/// Contract for event listeners.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use treecast::{Listener, ListenerError};
///
/// struct Audit;
///
/// #[async_trait]
/// impl Listener<String> for Audit {
///     async fn on_event(&self, payload: &String) -> Result<(), ListenerError> {
///         if payload.is_empty() {
///             return Err(ListenerError::failed("empty payload"));
///         }
///         // write audit record...
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "audit"
///     }
/// }
/// ```
#[async_trait]
pub trait Listener<T>: Send + Sync + 'static {
    /// Handles a single delivery of an event's payload.
    ///
    /// # Parameters
    /// - `payload`: reference to the payload (does not transfer ownership)
    async fn on_event(&self, payload: &T) -> Result<(), ListenerError>;

    /// Human-readable name (used in stderr warnings).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
