//! # Channel tree node.
//!
//! [`Node`] is the owned representation of one channel: its name, its
//! address configuration, a non-owning back-reference to its parent, the
//! ordered child collection, and the flat listener registry. Nodes are
//! shared as `Arc<Node<T>>`; a parent holds the only owning references to
//! its children, and the `Weak` back-reference never extends a child's
//! lifetime upward.
//!
//! ## Rules
//! - The root has no name and an empty parent reference.
//! - Child creation is idempotent per name ([`Node::ensure_child`]).
//! - Removing a child clears its back-reference: a detached subtree keeps
//!   working as a standalone tree, but its emits no longer bubble into the
//!   old tree.

use std::sync::{Arc, Weak};

use tokio::sync::RwLock;

use crate::channels::children::Children;
use crate::config::AddressConfig;
use crate::listeners::EventRegistry;

/// One channel in the tree. Public operations live on
/// [`Channel`](crate::Channel), which wraps this in a cheap-clone handle.
pub(crate) struct Node<T> {
    /// Name under the parent; `None` for the anonymous root.
    name: Option<Arc<str>>,
    config: AddressConfig,
    /// Non-owning back-reference; cleared when the node is detached.
    parent: RwLock<Weak<Node<T>>>,
    children: RwLock<Children<T>>,
    registry: EventRegistry<T>,
}

impl<T: Send + Sync + 'static> Node<T> {
    /// Creates an anonymous root node.
    pub(crate) fn root(config: AddressConfig) -> Arc<Self> {
        Arc::new(Self {
            name: None,
            config,
            parent: RwLock::new(Weak::new()),
            children: RwLock::new(Children::new()),
            registry: EventRegistry::new(),
        })
    }

    /// Creates a named node with no parent. Test scaffolding only.
    #[cfg(test)]
    pub(crate) fn detached(name: &str, config: AddressConfig) -> Arc<Self> {
        Arc::new(Self {
            name: Some(Arc::from(name)),
            config,
            parent: RwLock::new(Weak::new()),
            children: RwLock::new(Children::new()),
            registry: EventRegistry::new(),
        })
    }

    pub(crate) fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn config(&self) -> AddressConfig {
        self.config
    }

    pub(crate) fn registry(&self) -> &EventRegistry<T> {
        &self.registry
    }

    /// Upgrades the parent back-reference, if the node is still attached.
    pub(crate) async fn parent(&self) -> Option<Arc<Node<T>>> {
        self.parent.read().await.upgrade()
    }

    /// Climbs the parent chain from `start` to the root of its tree.
    pub(crate) async fn root_of(start: &Arc<Node<T>>) -> Arc<Node<T>> {
        let mut cur = Arc::clone(start);
        while let Some(up) = cur.parent().await {
            cur = up;
        }
        cur
    }

    /// Looks up a direct child by name.
    pub(crate) async fn child(&self, name: &str) -> Option<Arc<Node<T>>> {
        self.children.read().await.get(name)
    }

    /// Direct child names in insertion order.
    pub(crate) async fn child_names(&self) -> Vec<Arc<str>> {
        self.children.read().await.names()
    }

    /// Snapshot of the direct children in insertion order.
    pub(crate) async fn children_snapshot(&self) -> Vec<Arc<Node<T>>> {
        self.children.read().await.nodes()
    }

    /// Returns the existing child under `name`, creating it when absent.
    ///
    /// Idempotent: racing calls for the same name converge on one node.
    /// The caller guarantees `name` is non-empty.
    pub(crate) async fn ensure_child(parent: &Arc<Node<T>>, name: &str) -> Arc<Node<T>> {
        let mut children = parent.children.write().await;
        if let Some(existing) = children.get(name) {
            return existing;
        }

        let node = Arc::new(Node {
            name: Some(Arc::from(name)),
            config: parent.config,
            parent: RwLock::new(Arc::downgrade(parent)),
            children: RwLock::new(Children::new()),
            registry: EventRegistry::new(),
        });
        children.insert(Arc::from(name), Arc::clone(&node));
        node
    }

    /// Detaches the child under `name`, clearing its back-reference so the
    /// removed subtree can no longer deliver upward. No-op when missing.
    pub(crate) async fn remove_child(&self, name: &str) {
        let removed = self.children.write().await.remove(name);
        if let Some(node) = removed {
            *node.parent.write().await = Weak::new();
        }
    }

    /// `true` when the node has no listeners and no children.
    pub(crate) async fn is_leaf_without_listeners(&self) -> bool {
        self.children.read().await.is_empty() && self.registry.is_empty().await
    }
}
