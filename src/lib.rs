//! # treecast
//!
//! **Treecast** is a hierarchical publish/subscribe router for Rust.
//!
//! Named event channels form a tree. Listeners attach to any node of that
//! tree using dotted path notation, and delivery runs in one of two
//! directions: [`emit`](Channel::emit) walks **up** through ancestor
//! channels, [`broadcast`](Channel::broadcast) cascades **down** through
//! descendant subtrees. The two never mix.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   caller ── "a.b.ev" ──► name resolver (address/)
//!                             │  creating walk: materialize a, a.b
//!                             │  lookup walk:   fail soft on a miss
//!                             ▼
//!                      ┌─────────────┐
//!                      │   Channel   │  tree node (channels/)
//!                      │  ┌────────┐ │
//!                      │  │registry│ │  flat event → listeners map
//!                      │  └────────┘ │  (listeners/EventRegistry)
//!                      └──┬───────┬──┘
//!             parent ◄────┘       └────► children (ordered)
//!               ▲                            │
//!               │ emit                       │ broadcast
//! ```
//!
//! ### Addressing
//! - `"ev"` — the event `ev` on the receiving channel.
//! - `"a.b.ev"` — the event `ev` on the sub-channel `a.b` (registration
//!   creates missing channels; lookup-style operations fail soft).
//! - `"^a.ev"` — as above, but resolved from the tree root rather than the
//!   receiving channel.
//!
//! Delivery always uses the *resolved local* event name: after
//! `root.emit("a.b.ev", &x)` the listeners on `a.b`, `a` and the root all
//! observe an event literally named `ev`.
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits              |
//! |-------------------|------------------------------------------------------------------|---------------------------------|
//! | **Channel tree**  | Add/remove/look up channels, prune empty subtrees.               | [`Channel`]                     |
//! | **Listeners**     | Async handlers, closure adapters, once-registrations.            | [`Listener`], [`ListenerFn`]    |
//! | **Registry**      | The flat per-channel primitive the router composes.              | [`EventRegistry`]               |
//! | **Propagation**   | Upward emit, downward broadcast, boolean "anyone listened".      | [`Channel::emit`], [`Channel::broadcast`] |
//! | **Addressing**    | Configurable delimiter and root marker.                          | [`AddressConfig`]               |
//! | **Errors**        | Typed listener failures, isolated per delivery.                  | [`ListenerError`]               |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogListener`] _(demo/reference only)_.
//!
//! ## Failure semantics
//! Routing never panics or errors on ordinary misuse: an address that does
//! not resolve makes propagation return `false`, queries return `0`/empty,
//! and removals become no-ops. A listener that fails or panics is reported
//! on stderr and skipped; delivery continues.
//!
//! ## Example
//! ```rust
//! use treecast::{Channel, ListenerError, ListenerFn, ListenerRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     // One root per application, built at startup and passed around.
//!     let root: Channel<String> = Channel::root();
//!
//!     let on_done: ListenerRef<String> = ListenerFn::arc("on-done", |msg: String| async move {
//!         println!("build finished: {msg}");
//!         Ok::<_, ListenerError>(())
//!     });
//!
//!     // Registers on the channel jobs.build, creating both channels.
//!     root.on("jobs.build.done", on_done).await;
//!
//!     // Fires on jobs.build, then bubbles "done" to jobs and the root.
//!     assert!(root.emit("jobs.build.done", &"ok".to_string()).await);
//!
//!     // Cascades "done" below jobs: reaches jobs.build too.
//!     assert!(root.broadcast("jobs.done", &"ok".to_string()).await);
//!
//!     // Nobody downward listens on an unresolved path.
//!     assert!(!root.emit("ghost.done", &"ok".to_string()).await);
//! }
//! ```

mod address;
mod channels;
mod config;
mod error;
mod listeners;

// ---- Public re-exports ----

pub use channels::Channel;
pub use config::AddressConfig;
pub use error::ListenerError;
pub use listeners::{EventRegistry, Listener, ListenerFn, ListenerRef};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogListener;
