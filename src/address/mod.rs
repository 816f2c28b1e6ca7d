//! Name resolution: dotted-path parsing and tree walking.
//!
//! Internal to the crate. [`address`] turns a name string into its syntactic
//! parts; [`resolve`] walks the channel tree with a creating or lookup step
//! policy and applies the channel-only disambiguation for introspection
//! operations. The public entry points live on
//! [`Channel`](crate::Channel).

pub(crate) mod address;
pub(crate) mod resolve;
