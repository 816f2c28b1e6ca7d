//! # Path walking and address resolution.
//!
//! One walking primitive serves every operation, parameterized by a
//! per-segment step policy ([`WalkMode`]):
//!
//! - [`WalkMode::Create`] (registration): a missing child is created
//!   (idempotently) and descended into, so the walk always ends on a
//!   channel. Empty segments are skipped — an empty channel name cannot
//!   exist.
//! - [`WalkMode::Lookup`] (removal, introspection, propagation): a missing
//!   child short-circuits the walk to `None`; later segments are not
//!   evaluated. Failure is a value, never a panic.
//!
//! On top of the walk sit three resolution flavors:
//!
//! - [`resolve_creating`] / [`resolve_lookup`]: `(channel, event)` for the
//!   registration and propagation wrappers.
//! - [`resolve_target`]: lookup plus channel-only disambiguation — when the
//!   resolved event name is itself an existing child of the resolved
//!   channel (or is empty), descend and report no event name. Used by the
//!   operations that must treat `"a.b"` and a real channel address for
//!   `a.b` identically: listener counting, listing, clearing, and event
//!   name introspection.

use std::sync::Arc;

use crate::address::address::Address;
use crate::channels::Node;

/// Per-segment step policy for the tree walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WalkMode {
    /// Create missing children and descend.
    Create,
    /// Descend only into existing children; fail on the first miss.
    Lookup,
}

/// Walks `segments` from `start`, honoring `from_root`, stepping per `mode`.
async fn walk<T: Send + Sync + 'static>(
    start: &Arc<Node<T>>,
    segments: &[&str],
    from_root: bool,
    mode: WalkMode,
) -> Option<Arc<Node<T>>> {
    let mut cur = if from_root {
        Node::root_of(start).await
    } else {
        Arc::clone(start)
    };

    for &segment in segments {
        match mode {
            WalkMode::Create => {
                if segment.is_empty() {
                    continue;
                }
                cur = Node::ensure_child(&cur, segment).await;
            }
            WalkMode::Lookup => {
                cur = cur.child(segment).await?;
            }
        }
    }

    Some(cur)
}

/// Creating walk: always yields a channel. Intermediate channels are
/// materialized as needed.
pub(crate) async fn resolve_creating<T: Send + Sync + 'static>(
    start: &Arc<Node<T>>,
    name: &str,
) -> (Arc<Node<T>>, String) {
    match Address::parse(name, &start.config()) {
        Address::Local(event) => (Arc::clone(start), event.to_string()),
        Address::Path {
            segments,
            event,
            from_root,
        } => {
            let node = walk(start, &segments, from_root, WalkMode::Create)
                .await
                .unwrap_or_else(|| Arc::clone(start)); // Create never fails
            (node, event.to_string())
        }
    }
}

/// Lookup walk: `None` when any path segment fails to resolve.
pub(crate) async fn resolve_lookup<T: Send + Sync + 'static>(
    start: &Arc<Node<T>>,
    name: &str,
) -> Option<(Arc<Node<T>>, String)> {
    match Address::parse(name, &start.config()) {
        Address::Local(event) => Some((Arc::clone(start), event.to_string())),
        Address::Path {
            segments,
            event,
            from_root,
        } => {
            let node = walk(start, &segments, from_root, WalkMode::Lookup).await?;
            Some((node, event.to_string()))
        }
    }
}

/// Lookup walk with channel-only disambiguation.
///
/// `None` input addresses the start channel itself. A resolved event name
/// that names an existing child of the resolved channel — or an empty
/// terminal segment — turns the result into a channel-only address.
pub(crate) async fn resolve_target<T: Send + Sync + 'static>(
    start: &Arc<Node<T>>,
    name: Option<&str>,
) -> Option<(Arc<Node<T>>, Option<String>)> {
    let Some(name) = name else {
        return Some((Arc::clone(start), None));
    };

    let (node, event) = resolve_lookup(start, name).await?;
    if event.is_empty() {
        return Some((node, None));
    }
    match node.child(&event).await {
        Some(child) => Some((child, None)),
        None => Some((node, Some(event))),
    }
}

/// Resolves a pure channel path: every segment, including the last, names a
/// channel. Honors the root marker on the first segment.
pub(crate) async fn resolve_channel<T: Send + Sync + 'static>(
    start: &Arc<Node<T>>,
    path: &str,
) -> Option<Arc<Node<T>>> {
    let config = start.config();
    let mut segments: Vec<&str> = path.split(config.delimiter).collect();

    let mut from_root = false;
    if let Some(first) = segments.first_mut() {
        if let Some(stripped) = first.strip_prefix(config.root_marker) {
            *first = stripped;
            from_root = true;
        }
    }

    walk(start, &segments, from_root, WalkMode::Lookup).await
}
