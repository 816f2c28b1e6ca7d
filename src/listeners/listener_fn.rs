//! # Function-backed listener (`ListenerFn`)
//!
//! [`ListenerFn`] wraps a closure `F: Fn(T) -> Fut`, producing a fresh
//! future per delivery. The closure receives the payload by value (cloned
//! per invocation), so it owns its data across `.await` points and needs no
//! shared mutable state; if you do want shared state, put an `Arc<...>`
//! inside the closure explicitly.
//!
//! ## Example
//! ```rust
//! use treecast::{Listener, ListenerError, ListenerFn, ListenerRef};
//!
//! let l: ListenerRef<u32> = ListenerFn::arc("counter", |n: u32| async move {
//!     let _ = n;
//!     Ok::<_, ListenerError>(())
//! });
//!
//! assert_eq!(l.name(), "counter");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ListenerError;
use crate::listeners::listener::Listener;

/// Function-backed listener implementation.
///
/// Wraps a closure that *creates* a new future per delivery.
#[derive(Debug)]
pub struct ListenerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ListenerFn<F> {
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a
    /// [`ListenerRef`](crate::ListenerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the listener and returns it as a shared handle.
    ///
    /// ## Example
    /// ```rust
    /// use treecast::{Listener, ListenerError, ListenerFn, ListenerRef};
    ///
    /// let l: ListenerRef<String> = ListenerFn::arc("hello", |_msg: String| async {
    ///     Ok::<_, ListenerError>(())
    /// });
    /// assert_eq!(l.name(), "hello");
    /// ```
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<T, F, Fut> Listener<T> for ListenerFn<F>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), ListenerError>> + Send + 'static,
{
    async fn on_event(&self, payload: &T) -> Result<(), ListenerError> {
        (self.f)(payload.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
