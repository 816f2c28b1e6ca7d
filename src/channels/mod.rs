//! # The channel tree.
//!
//! This module contains the tree itself and its public handle:
//! - [`Channel`] - cheap-clone handle exposing every router operation
//!
//! Internal modules:
//! - [`node`]: owned tree node (name, weak parent, children, registry);
//! - [`children`]: insertion-ordered child collection with idempotent insert;
//! - [`channel`]: the public handle, propagation engine and pruning.

mod channel;
mod children;
mod node;

pub use channel::Channel;

pub(crate) use node::Node;
