//! # Listeners and the flat per-channel registry.
//!
//! This module provides the listener-facing types:
//! - [`Listener`] - trait for implementing async event handlers
//! - [`ListenerFn`] - function-backed listener implementation
//! - [`ListenerRef`] - shared reference to a listener (`Arc<dyn Listener<T>>`)
//! - [`EventRegistry`] - ordered listener registry for a flat set of named
//!   events, one per channel node
//!
//! The registry knows nothing about the channel tree or dotted addressing;
//! the routing layer in [`channels`](crate::channels) resolves an address
//! first and then delegates to the registry of the resolved node.

mod listener;
mod listener_fn;
mod registry;

pub use listener::{Listener, ListenerRef};
pub use listener_fn::ListenerFn;
pub use registry::EventRegistry;

// Optional: a simple built-in stdout listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogListener;
