//! # Ordered child-channel collection.
//!
//! [`Children`] pairs an explicit insertion-ordered list of child names with
//! a name → node map. The two always hold exactly the same set of names;
//! broadcast fan-out iterates the ordered list, lookups hit the map.
//!
//! ## Rules
//! - Insert is idempotent per name: an existing name is **kept**, never
//!   overwritten.
//! - Remove of a missing name is a no-op.

use std::collections::HashMap;
use std::sync::Arc;

use crate::channels::node::Node;

/// Insertion-ordered set of owned child channels.
pub(crate) struct Children<T> {
    order: Vec<Arc<str>>,
    map: HashMap<Arc<str>, Arc<Node<T>>>,
}

impl<T> Children<T> {
    pub(crate) fn new() -> Self {
        Self {
            order: Vec::new(),
            map: HashMap::new(),
        }
    }

    /// Looks up a child by name.
    pub(crate) fn get(&self, name: &str) -> Option<Arc<Node<T>>> {
        self.map.get(name).map(Arc::clone)
    }

    /// Attaches `node` under `name` unless the name is taken.
    /// Returns `true` when the node was inserted.
    pub(crate) fn insert(&mut self, name: Arc<str>, node: Arc<Node<T>>) -> bool {
        if self.map.contains_key(&name) {
            return false;
        }
        self.order.push(Arc::clone(&name));
        self.map.insert(name, node);
        true
    }

    /// Detaches and returns the child under `name`, if any.
    pub(crate) fn remove(&mut self, name: &str) -> Option<Arc<Node<T>>> {
        let node = self.map.remove(name)?;
        self.order.retain(|n| n.as_ref() != name);
        Some(node)
    }

    /// Child names in insertion order.
    pub(crate) fn names(&self) -> Vec<Arc<str>> {
        self.order.clone()
    }

    /// Child nodes in insertion order.
    pub(crate) fn nodes(&self) -> Vec<Arc<Node<T>>> {
        self.order
            .iter()
            .filter_map(|name| self.map.get(name).map(Arc::clone))
            .collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
