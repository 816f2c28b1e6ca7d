//! # Channel handle: tree operations, registration, propagation.
//!
//! [`Channel`] is the public face of the router: a cheap-clone handle over a
//! shared tree node. Registration wrappers resolve dotted names with the
//! creating walk; removal and introspection use the lookup walk; `emit` and
//! `broadcast` deliver along the tree.
//!
//! ## Propagation directions
//! ```text
//!                ┌────────┐
//!                │  root  │   ▲ emit: resolved channel, then every
//!                └───┬────┘   │       ancestor up to the root
//!          ┌─────────┼─────────┐
//!          ▼         ▼         ▼
//!      ┌──────┐  ┌──────┐  ┌──────┐
//!      │ SubA │  │ SubB │  │ SubC │
//!      └──┬───┘  └──────┘  └──────┘
//!          ▼
//!      ┌──────┐   │ broadcast: resolved channel, then every
//!      │ SubA │   ▼            descendant subtree, insertion order
//!      └──────┘
//! ```
//! A channel's listeners are reached by (a) a dotted call resolving to that
//! channel, (b) an `emit` from any descendant, (c) a `broadcast` from any
//! ancestor — never by a sibling except through a shared ancestor or
//! descendant path.
//!
//! ## Failure semantics
//! Unresolved paths never panic or error: propagation returns `false`,
//! queries return `0` / empty, removals are no-ops. Delivery to a channel
//! with zero listeners yields `false` for that hop but does not stop
//! propagation.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::address::resolve::{resolve_channel, resolve_creating, resolve_lookup, resolve_target};
use crate::channels::node::Node;
use crate::config::AddressConfig;
use crate::listeners::ListenerRef;

/// Handle to one channel of a tree.
///
/// Cloning is cheap (internally holds an `Arc`-backed node) and clones
/// address the same channel. Dropping every handle to a subtree's root
/// channel drops the subtree, because parents own their children and the
/// upward references are weak.
pub struct Channel<T> {
    node: Arc<Node<T>>,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T: Send + Sync + 'static> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.node.name())
            .finish()
    }
}

impl<T: Send + Sync + 'static> Channel<T> {
    /// Creates the anonymous root channel of a new tree with the default
    /// address syntax (`.` delimiter, `^` root marker).
    ///
    /// Build the root once at application start and hand clones of it (or of
    /// its sub-channels) to consumers; there is no ambient global tree.
    pub fn root() -> Self {
        Self::with_config(AddressConfig::default())
    }

    /// Creates a root channel with a custom address syntax.
    pub fn with_config(config: AddressConfig) -> Self {
        Self {
            node: Node::root(config),
        }
    }

    fn wrap(node: Arc<Node<T>>) -> Self {
        Self { node }
    }

    /// Name under the parent channel; `None` for a tree root.
    pub fn name(&self) -> Option<&str> {
        self.node.name()
    }

    /// The address syntax this tree was built with.
    pub fn config(&self) -> AddressConfig {
        self.node.config()
    }

    /// `true` when both handles address the same channel node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Parent channel, if this channel is attached to a tree.
    pub async fn parent(&self) -> Option<Channel<T>> {
        self.node.parent().await.map(Self::wrap)
    }

    // ---- Channel-tree operations ----

    /// Adds a direct sub-channel under `name`.
    ///
    /// Idempotent: an existing child under that name is kept untouched.
    /// No-op for an empty name or a name containing reserved characters
    /// (the delimiter, or a leading root marker) — such names could never
    /// be addressed.
    pub async fn add_channel(&self, name: &str) -> &Self {
        if self.node.config().is_plain_name(name) {
            Node::ensure_child(&self.node, name).await;
        }
        self
    }

    /// Removes the direct sub-channel under `name`. No-op when missing.
    ///
    /// The detached subtree keeps its listeners and children and works as a
    /// standalone tree, but it is invalidated toward the old tree: its
    /// `emit` no longer bubbles above the detachment point.
    pub async fn remove_channel(&self, name: &str) -> &Self {
        self.node.remove_child(name).await;
        self
    }

    /// Looks up a descendant channel by dotted path (every segment names a
    /// channel). Honors the root marker on the first segment.
    pub async fn channel(&self, path: &str) -> Option<Channel<T>> {
        resolve_channel(&self.node, path).await.map(Self::wrap)
    }

    /// Direct sub-channel names in insertion order.
    pub async fn channel_names(&self) -> Vec<Arc<str>> {
        self.node.child_names().await
    }

    /// Removes descendant channels that hold no listeners and no children,
    /// bottom-up, and returns how many were removed. The receiver itself is
    /// never removed.
    pub async fn prune_empty(&self) -> usize {
        prune(&self.node).await
    }

    // ---- Listener registration wrappers ----

    /// Registers `listener` under `name`, creating channels along the path
    /// as needed.
    ///
    /// `on` and [`add_listener`](Channel::add_listener) are identical
    /// aliases, kept for API familiarity.
    pub async fn on(&self, name: &str, listener: ListenerRef<T>) -> &Self {
        let (node, event) = resolve_creating(&self.node, name).await;
        node.registry().add(&event, listener).await;
        self
    }

    /// Alias for [`on`](Channel::on).
    pub async fn add_listener(&self, name: &str, listener: ListenerRef<T>) -> &Self {
        self.on(name, listener).await
    }

    /// As [`on`](Channel::on), but the registration is dropped after its
    /// first invocation (before the listener runs).
    pub async fn once(&self, name: &str, listener: ListenerRef<T>) -> &Self {
        let (node, event) = resolve_creating(&self.node, name).await;
        node.registry().add_once(&event, listener).await;
        self
    }

    /// Removes one registration of `listener` under `name`, matching by
    /// `Arc` identity. No-op when the path does not resolve or nothing
    /// matches.
    pub async fn remove_listener(&self, name: &str, listener: &ListenerRef<T>) -> &Self {
        if let Some((node, event)) = resolve_lookup(&self.node, name).await {
            node.registry().remove(&event, listener).await;
        }
        self
    }

    /// Clears listeners under an optional address.
    ///
    /// - `Some(name)` resolving to an event: clears that event only.
    /// - `Some(name)` resolving to a channel (channel-only address): clears
    ///   every event on that channel.
    /// - `None`: clears every event on this channel.
    ///
    /// No-op when the address does not resolve.
    pub async fn remove_all_listeners(&self, name: Option<&str>) -> &Self {
        if let Some((node, event)) = resolve_target(&self.node, name).await {
            node.registry().remove_all(event.as_deref()).await;
        }
        self
    }

    /// Number of registrations under the addressed event.
    ///
    /// A channel-only address (the path names a channel, not an event on
    /// one) yields `0`: it is never misread as an event named after the
    /// last channel segment. Unresolved addresses also yield `0`.
    pub async fn listener_count(&self, name: &str) -> usize {
        match resolve_target(&self.node, Some(name)).await {
            Some((node, Some(event))) => node.registry().count(&event).await,
            _ => 0,
        }
    }

    /// Ordered snapshot of the listeners under the addressed event; empty
    /// for channel-only or unresolved addresses.
    pub async fn listeners(&self, name: &str) -> Vec<ListenerRef<T>> {
        match resolve_target(&self.node, Some(name)).await {
            Some((node, Some(event))) => node.registry().list(&event).await,
            _ => Vec::new(),
        }
    }

    /// Sorted event names with at least one listener on the addressed
    /// channel (`None` = this channel). Empty when the address names an
    /// event rather than a channel, or does not resolve.
    pub async fn event_names(&self, name: Option<&str>) -> Vec<Arc<str>> {
        match resolve_target(&self.node, name).await {
            Some((node, None)) => node.registry().names().await,
            _ => Vec::new(),
        }
    }

    // ---- Propagation ----

    /// Delivers `payload` to the addressed event on the resolved channel,
    /// then to the same (now local) event on every ancestor up to the root.
    ///
    /// Returns `true` iff at least one listener fired anywhere along the
    /// ancestor chain; `false` when the path does not resolve (nothing was
    /// listening). Never visits child channels.
    pub async fn emit(&self, name: &str, payload: &T) -> bool {
        let Some((node, event)) = resolve_lookup(&self.node, name).await else {
            return false;
        };

        let mut fired = node.registry().fire(&event, payload).await;
        let mut cur = node.parent().await;
        while let Some(ancestor) = cur {
            fired |= ancestor.registry().fire(&event, payload).await;
            cur = ancestor.parent().await;
        }
        fired
    }

    /// Delivers `payload` to the addressed event on the resolved channel,
    /// then cascades the same (now local) event into every descendant
    /// subtree, children in insertion order.
    ///
    /// Returns `true` iff at least one listener fired anywhere in the
    /// subtree; `false` when the path does not resolve. Never visits
    /// ancestors.
    pub async fn broadcast(&self, name: &str, payload: &T) -> bool {
        let Some((node, event)) = resolve_lookup(&self.node, name).await else {
            return false;
        };
        cascade(&node, &event, payload).await
    }
}

/// Recursive downward delivery. The child list is snapshotted per node, so
/// listeners may mutate the tree mid-cascade without affecting this pass.
fn cascade<'a, T: Send + Sync + 'static>(
    node: &'a Arc<Node<T>>,
    event: &'a str,
    payload: &'a T,
) -> BoxFuture<'a, bool> {
    Box::pin(async move {
        let mut fired = node.registry().fire(event, payload).await;
        for child in node.children_snapshot().await {
            fired |= cascade(&child, event, payload).await;
        }
        fired
    })
}

/// Post-order removal of empty descendants. A child emptied by pruning its
/// own subtree is itself removed on the way back up.
fn prune<'a, T: Send + Sync + 'static>(node: &'a Arc<Node<T>>) -> BoxFuture<'a, usize> {
    Box::pin(async move {
        let mut removed = 0;
        for child in node.children_snapshot().await {
            removed += prune(&child).await;
            if child.is_leaf_without_listeners().await {
                if let Some(name) = child.name() {
                    node.remove_child(name).await;
                    removed += 1;
                }
            }
        }
        removed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListenerError;
    use crate::listeners::ListenerFn;
    use tokio::sync::Mutex;

    /// Shared log of which tagged listeners fired, in delivery order.
    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn tap(log: &Log, tag: &'static str) -> ListenerRef<bool> {
        let log = Arc::clone(log);
        ListenerFn::arc(tag, move |_payload: bool| {
            let log = Arc::clone(&log);
            async move {
                log.lock().await.push(tag);
                Ok::<_, ListenerError>(())
            }
        })
    }

    async fn taken(log: &Log) -> Vec<&'static str> {
        std::mem::take(&mut *log.lock().await)
    }

    #[tokio::test]
    async fn test_add_channel_is_idempotent() {
        let root: Channel<bool> = Channel::root();
        root.add_channel("SubA").await.add_channel("SubA").await;
        assert_eq!(root.channel_names().await.len(), 1);

        let first = root.channel("SubA").await.expect("SubA exists");
        root.add_channel("SubA").await;
        let second = root.channel("SubA").await.expect("SubA exists");
        assert!(first.ptr_eq(&second));
    }

    #[tokio::test]
    async fn test_add_channel_rejects_reserved_names() {
        let root: Channel<bool> = Channel::root();
        root.add_channel("").await;
        root.add_channel("a.b").await;
        root.add_channel("^a").await;
        assert!(root.channel_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_channel_missing_is_noop() {
        let root: Channel<bool> = Channel::root();
        root.remove_channel("ghost").await;
        assert!(root.channel_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_emit_bubbles_through_every_ancestor() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();

        // An event literally named "c" on each of root, a, a.b.
        root.on("c", tap(&log, "root")).await;
        root.on("a.c", tap(&log, "a")).await;
        root.on("a.b.c", tap(&log, "a.b")).await;

        assert!(root.emit("a.b.c", &true).await);
        assert_eq!(taken(&log).await, vec!["a.b", "a", "root"]);

        // Same delivery when issued from the resolved channel directly.
        let b = root.channel("a.b").await.expect("a.b exists");
        assert!(b.emit("c", &true).await);
        assert_eq!(taken(&log).await, vec!["a.b", "a", "root"]);
    }

    #[tokio::test]
    async fn test_emit_never_visits_children() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();
        root.on("SubA.SubA.subAsubA", tap(&log, "grandchild")).await;

        assert!(!root.emit("subAsubA", &true).await);
        assert!(taken(&log).await.is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_cascades_and_skips_ancestors() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();

        root.on("subAsubA", tap(&log, "root")).await;
        root.on("SubA.SubA.subAsubA", tap(&log, "SubA.SubA")).await;
        root.on("SubB.subB", tap(&log, "SubB")).await;
        let sub_a_sub_a = root.channel("SubA.SubA").await.expect("SubA.SubA exists");
        let sub_b = root.channel("SubB").await.expect("SubB exists");

        // Direct broadcast on the owning channel.
        assert!(sub_a_sub_a.broadcast("subAsubA", &true).await);
        assert_eq!(taken(&log).await, vec!["SubA.SubA"]);

        // Cascaded from the root: reaches root's own listener and the
        // grandchild, through SubA.
        assert!(root.broadcast("subAsubA", &true).await);
        assert_eq!(taken(&log).await, vec!["root", "SubA.SubA"]);

        // Wrong direction: never reaches ancestors.
        assert!(!sub_a_sub_a.broadcast("rootOnly", &true).await);
        // Sibling subtree: never reached.
        assert!(!sub_b.broadcast("subAsubA", &true).await);
        assert!(taken(&log).await.is_empty());
    }

    #[tokio::test]
    async fn test_broadcast_children_in_insertion_order() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();

        root.on("second.ev", tap(&log, "second")).await;
        root.on("first.ev", tap(&log, "first")).await;

        assert!(root.broadcast("ev", &true).await);
        // "second" was created first, so it is visited first.
        assert_eq!(taken(&log).await, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_root_marker_addresses_the_tree_root() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();
        root.add_channel("D").await;
        let d = root.channel("D").await.expect("D exists");

        // From a descendant, ^X.y attaches to root.X, exactly as X.y on
        // the root would.
        d.on("^X.y", tap(&log, "via-marker")).await;
        root.on("X.y", tap(&log, "via-root")).await;

        let x = root.channel("X").await.expect("X created under root");
        assert_eq!(x.listener_count("y").await, 2);

        assert!(root.emit("X.y", &true).await);
        assert_eq!(taken(&log).await, vec!["via-marker", "via-root"]);
    }

    #[tokio::test]
    async fn test_propagation_on_unresolved_path_is_false() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();
        root.on("rootOn", tap(&log, "root")).await;

        assert!(!root.emit("foo.rootOn", &true).await);
        assert!(!root.broadcast("foo.rootOn", &true).await);
        assert!(taken(&log).await.is_empty());
    }

    #[tokio::test]
    async fn test_propagation_does_not_disambiguate_channel_names() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();

        // "a" is both a child channel and an event on the root.
        root.add_channel("a").await;
        root.on("a", tap(&log, "event-a")).await;

        assert!(root.emit("a", &true).await);
        assert_eq!(taken(&log).await, vec!["event-a"]);
    }

    #[tokio::test]
    async fn test_listener_count_on_channel_only_address_is_zero() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();
        root.on("NSubA.NSubA.nsubAnsubA", tap(&log, "deep")).await;

        assert_eq!(root.listener_count("NSubA.NSubA.nsubAnsubA").await, 1);
        // Channel-only address: not misread as event "NSubA" on NSubA.
        assert_eq!(root.listener_count("NSubA.NSubA").await, 0);
        assert_eq!(root.listener_count("NSubA.NSubA.other").await, 0);
        assert_eq!(root.listener_count("NSubA.NSubB.nsubAnsubA").await, 0);

        assert_eq!(root.listeners("NSubA.NSubA.nsubAnsubA").await.len(), 1);
        assert!(root.listeners("NSubA.NSubA").await.is_empty());
        assert!(root.listeners("NSubA.NSubB.nsubAnsubA").await.is_empty());
    }

    #[tokio::test]
    async fn test_event_names_with_optional_channel_address() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();
        root.on("rootOn", tap(&log, "a")).await;
        root.on("NSubA.NSubA.nsubAnsubA", tap(&log, "b")).await;

        let names = root.event_names(None).await;
        assert_eq!(names, vec![Arc::<str>::from("rootOn")]);

        let names = root.event_names(Some("NSubA.NSubA")).await;
        assert_eq!(names, vec![Arc::<str>::from("nsubAnsubA")]);

        // From a sibling, through the root marker.
        let nsub_a = root.channel("NSubA").await.expect("NSubA exists");
        let names = nsub_a.event_names(Some("^NSubA.NSubA")).await;
        assert_eq!(names, vec![Arc::<str>::from("nsubAnsubA")]);

        // An event address names no channel.
        assert!(root.event_names(Some("rootOn")).await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_listener_on_wrong_channel_is_noop() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();
        let l = tap(&log, "keep");
        root.on("removeMe", Arc::clone(&l)).await;

        root.remove_listener("foo.removeMe", &l).await;
        assert_eq!(root.listener_count("removeMe").await, 1);

        root.remove_listener("removeMe", &l).await;
        assert_eq!(root.listener_count("removeMe").await, 0);
        assert!(!root.emit("removeMe", &true).await);
    }

    #[tokio::test]
    async fn test_remove_all_listeners_event_vs_channel_address() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();

        root.on("removeMe.foo", tap(&log, "foo1")).await;
        root.on("removeMe.foo", tap(&log, "foo2")).await;
        root.on("removeMe.bar", tap(&log, "bar")).await;
        assert_eq!(root.listener_count("removeMe.foo").await, 2);
        assert_eq!(root.listener_count("removeMe.bar").await, 1);

        // Event address clears only that event.
        root.remove_all_listeners(Some("removeMe.bar")).await;
        assert_eq!(root.listener_count("removeMe.foo").await, 2);
        assert_eq!(root.listener_count("removeMe.bar").await, 0);

        // Channel-only address clears the whole channel.
        root.remove_all_listeners(Some("removeMe")).await;
        assert_eq!(root.listener_count("removeMe.foo").await, 0);
        assert!(!root.emit("removeMe.foo", &true).await);

        // Unresolved address stays a no-op.
        root.remove_all_listeners(Some("ghost.bar")).await;
    }

    #[tokio::test]
    async fn test_remove_all_listeners_without_name_clears_this_channel() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();
        root.on("a", tap(&log, "a")).await;
        root.on("b", tap(&log, "b")).await;

        root.remove_all_listeners(None).await;
        assert!(root.event_names(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_once_fires_a_single_time_per_direction() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();

        root.once("once", tap(&log, "once")).await;
        assert!(root.emit("once", &true).await);
        assert!(!root.emit("once", &true).await);
        assert_eq!(taken(&log).await, vec!["once"]);

        root.once("once", tap(&log, "once")).await;
        assert!(root.broadcast("once", &true).await);
        assert!(!root.broadcast("once", &true).await);
        assert_eq!(taken(&log).await, vec!["once"]);
    }

    #[tokio::test]
    async fn test_detached_subtree_no_longer_bubbles_upward() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();

        root.on("ping", tap(&log, "root")).await;
        root.on("SubA.SubB.ping", tap(&log, "SubB")).await;
        let sub_a = root.channel("SubA").await.expect("SubA exists");
        let sub_b = root.channel("SubA.SubB").await.expect("SubB exists");

        root.remove_channel("SubA").await;
        assert!(root.channel("SubA").await.is_none());

        // The detached subtree still delivers internally...
        assert!(sub_a.broadcast("ping", &true).await);
        assert_eq!(taken(&log).await, vec!["SubB"]);

        // ...but emits from it stop at the detachment point.
        assert!(sub_b.emit("ping", &true).await);
        assert_eq!(taken(&log).await, vec!["SubB"]);
        assert!(sub_a.parent().await.is_none());
    }

    #[tokio::test]
    async fn test_prune_empty_removes_leaf_channels_bottom_up() {
        let root: Channel<bool> = Channel::root();
        let log: Log = Log::default();

        // a.b.c is an empty chain; x holds a listener and must survive.
        root.add_channel("a").await;
        let a = root.channel("a").await.expect("a exists");
        a.add_channel("b").await;
        a.channel("b").await.expect("b exists").add_channel("c").await;
        root.on("x.ev", tap(&log, "x")).await;

        assert_eq!(root.prune_empty().await, 3);
        assert!(root.channel("a").await.is_none());
        assert!(root.channel("x").await.is_some());
        assert_eq!(root.listener_count("x.ev").await, 1);
    }

    #[tokio::test]
    async fn test_listener_receives_the_payload() {
        let root: Channel<String> = Channel::root();
        let seen: Arc<Mutex<Vec<String>>> = Arc::default();
        let seen_by_listener = Arc::clone(&seen);

        root.on(
            "jobs.done",
            ListenerFn::arc("collect", move |msg: String| {
                let seen = Arc::clone(&seen_by_listener);
                async move {
                    seen.lock().await.push(msg);
                    Ok::<_, ListenerError>(())
                }
            }),
        )
        .await;

        assert!(root.emit("jobs.done", &"artifact ready".to_string()).await);
        assert_eq!(*seen.lock().await, vec!["artifact ready".to_string()]);
    }
}
