//! # Simple logging listener for debugging and demos.
//!
//! [`LogListener`] prints each payload it receives to stdout in a
//! human-readable format. This is primarily useful for development,
//! debugging, and examples.
//!
//! ## Output format
//! ```text
//! [event] tag=build payload="artifact ready"
//! ```
//!
//! ## Example
//! ```no_run
//! # use treecast::{Channel, LogListener};
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let root: Channel<String> = Channel::root();
//! root.on("jobs.done", LogListener::arc("jobs")).await;
//! # }
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ListenerError;
use crate::listeners::listener::Listener;

/// Simple stdout logging listener.
///
/// Enabled via the `logging` feature. Prints a tagged debug rendering of
/// every payload it receives.
///
/// Not intended for production use - implement a custom [`Listener`] for
/// structured logging or metrics collection.
pub struct LogListener {
    tag: &'static str,
}

impl LogListener {
    /// Creates a logging listener with the given tag.
    pub fn new(tag: &'static str) -> Self {
        Self { tag }
    }

    /// Creates the listener as a shared handle, ready for registration.
    pub fn arc(tag: &'static str) -> Arc<Self> {
        Arc::new(Self::new(tag))
    }
}

#[async_trait]
impl<T: Debug + Send + Sync + 'static> Listener<T> for LogListener {
    async fn on_event(&self, payload: &T) -> Result<(), ListenerError> {
        println!("[event] tag={} payload={payload:?}", self.tag);
        Ok(())
    }

    fn name(&self) -> &str {
        self.tag
    }
}
