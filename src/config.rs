//! # Address syntax configuration.
//!
//! [`AddressConfig`] defines the two reserved characters of the dotted
//! address syntax: the segment delimiter and the root marker. Both are fixed
//! per tree when the root channel is built and inherited by every channel
//! created under it, so a whole tree always parses names the same way.
//!
//! Channel and event names that contain the delimiter, or begin with the
//! root marker, cannot be addressed and are rejected by
//! [`Channel::add_channel`](crate::Channel::add_channel).
//!
//! # Example
//! ```
//! use treecast::AddressConfig;
//!
//! let cfg = AddressConfig::default();
//! assert_eq!(cfg.delimiter, '.');
//! assert_eq!(cfg.root_marker, '^');
//!
//! // A tree that routes on '/' instead:
//! let cfg = AddressConfig { delimiter: '/', ..AddressConfig::default() };
//! assert_eq!(cfg.root_marker, '^');
//! ```

/// Reserved characters of the dotted address syntax.
///
/// Applies to every name handed to registration, introspection and
/// propagation calls on a tree built with this configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressConfig {
    /// Separates channel-path segments from each other and from the
    /// terminal event name.
    pub delimiter: char,
    /// When the first path segment starts with this marker, resolution
    /// begins at the tree root instead of the receiving channel.
    pub root_marker: char,
}

impl Default for AddressConfig {
    /// Provides the default syntax:
    /// - `delimiter = '.'`
    /// - `root_marker = '^'`
    fn default() -> Self {
        Self {
            delimiter: '.',
            root_marker: '^',
        }
    }
}

impl AddressConfig {
    /// Returns `true` if `name` is usable as a single channel or event name:
    /// non-empty, no embedded delimiter, no leading root marker.
    pub fn is_plain_name(&self, name: &str) -> bool {
        !name.is_empty() && !name.contains(self.delimiter) && !name.starts_with(self.root_marker)
    }
}
