//! # Flat per-channel listener registry.
//!
//! [`EventRegistry`] is the single-channel primitive the router is built on:
//! a mapping from local event name to an ordered sequence of listeners, with
//! no knowledge of the channel tree or dotted addressing. Every channel node
//! holds exactly one registry; the routing layer resolves an address first
//! and then delegates to these operations.
//!
//! ## Rules
//! - Registration order is delivery order; the same [`ListenerRef`] may be
//!   registered repeatedly and is invoked once per registration.
//! - [`EventRegistry::remove`] matches by `Arc` identity and drops the most
//!   recently added matching registration.
//! - Once-registrations ([`EventRegistry::add_once`]) are dropped *before*
//!   their listener runs, so a re-entrant fire from inside the listener
//!   cannot invoke them again.
//! - [`EventRegistry::fire`] snapshots the listener list, releases the lock,
//!   then awaits each listener in order. Panics and [`ListenerError`]s are
//!   caught per listener, reported on stderr, and do not stop delivery.

use std::collections::HashMap;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::RwLock;

use crate::error::ListenerError;
use crate::listeners::listener::ListenerRef;

/// One registration: a shared listener plus its once-flag.
struct Entry<T> {
    listener: ListenerRef<T>,
    once: bool,
}

impl<T> Entry<T> {
    fn matches(&self, listener: &ListenerRef<T>) -> bool {
        Arc::ptr_eq(&self.listener, listener)
    }
}

/// Ordered listener registry for a flat set of named events.
pub struct EventRegistry<T> {
    events: RwLock<HashMap<Arc<str>, Vec<Entry<T>>>>,
}

impl<T: Send + Sync + 'static> Default for EventRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync + 'static> EventRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a listener under `event`, after any existing registrations.
    pub async fn add(&self, event: &str, listener: ListenerRef<T>) {
        self.insert(event, listener, false).await;
    }

    /// Registers a listener that is dropped after its first invocation.
    pub async fn add_once(&self, event: &str, listener: ListenerRef<T>) {
        self.insert(event, listener, true).await;
    }

    async fn insert(&self, event: &str, listener: ListenerRef<T>, once: bool) {
        let mut events = self.events.write().await;
        events
            .entry(Arc::from(event))
            .or_default()
            .push(Entry { listener, once });
    }

    /// Removes the most recently added registration of `listener` under
    /// `event`, matching by `Arc` identity. No-op when nothing matches.
    pub async fn remove(&self, event: &str, listener: &ListenerRef<T>) {
        let mut events = self.events.write().await;
        if let Some(entries) = events.get_mut(event) {
            if let Some(pos) = entries.iter().rposition(|e| e.matches(listener)) {
                entries.remove(pos);
            }
            if entries.is_empty() {
                events.remove(event);
            }
        }
    }

    /// Clears one event's listeners, or every event's listeners when `event`
    /// is `None`.
    pub async fn remove_all(&self, event: Option<&str>) {
        let mut events = self.events.write().await;
        match event {
            Some(name) => {
                events.remove(name);
            }
            None => events.clear(),
        }
    }

    /// Returns the number of registrations under `event`.
    pub async fn count(&self, event: &str) -> usize {
        let events = self.events.read().await;
        events.get(event).map_or(0, Vec::len)
    }

    /// Returns an ordered snapshot of the listeners registered under `event`.
    pub async fn list(&self, event: &str) -> Vec<ListenerRef<T>> {
        let events = self.events.read().await;
        events
            .get(event)
            .map(|entries| entries.iter().map(|e| Arc::clone(&e.listener)).collect())
            .unwrap_or_default()
    }

    /// Returns the sorted list of event names with at least one listener.
    pub async fn names(&self) -> Vec<Arc<str>> {
        let events = self.events.read().await;
        let mut names: Vec<Arc<str>> = events.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Returns `true` when no event has a listener.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    /// Delivers `payload` to every listener registered under `event`, in
    /// registration order. Returns `true` iff at least one listener was
    /// invoked (a listener that fails or panics still counts).
    ///
    /// Once-registrations are unregistered before their listener runs. The
    /// lock is released before any listener is awaited, so listeners may
    /// freely call back into the registry or the surrounding tree.
    pub async fn fire(&self, event: &str, payload: &T) -> bool {
        let snapshot: Vec<ListenerRef<T>> = {
            let mut events = self.events.write().await;
            match events.get_mut(event) {
                Some(entries) => {
                    let snapshot = entries.iter().map(|e| Arc::clone(&e.listener)).collect();
                    entries.retain(|e| !e.once);
                    if entries.is_empty() {
                        events.remove(event);
                    }
                    snapshot
                }
                None => return false,
            }
        };

        for listener in &snapshot {
            let fut = listener.on_event(payload);
            match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    eprintln!(
                        "[treecast] listener '{}' on event '{}': {}",
                        listener.name(),
                        event,
                        err.as_message()
                    );
                }
                Err(panic_err) => {
                    let err = ListenerError::Panicked {
                        reason: format!("{panic_err:?}"),
                    };
                    eprintln!(
                        "[treecast] listener '{}' on event '{}': {}",
                        listener.name(),
                        event,
                        err.as_message()
                    );
                }
            }
        }

        !snapshot.is_empty()
    }
}
