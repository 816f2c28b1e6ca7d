//! # Dotted name parsing.
//!
//! [`Address`] is the purely syntactic view of an event name: either a local
//! name with no delimiter in it, or a channel path plus a terminal event
//! name, with an optional root marker on the first path segment. Parsing
//! borrows from the input and never fails; whether the path resolves is the
//! walking layer's concern ([`resolve`](crate::address::resolve)).

use crate::config::AddressConfig;

/// Parsed form of a possibly-dotted event name.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Address<'a> {
    /// No delimiter present: the whole name is an event on the receiver.
    Local(&'a str),
    /// Delimited name: channel-path segments plus the terminal event name.
    Path {
        /// Channel-path segments, left to right. The root marker, when
        /// present, has already been stripped from the first segment.
        segments: Vec<&'a str>,
        /// Terminal segment. Empty when the name ends with the delimiter,
        /// which addresses the channel itself rather than an event on it.
        event: &'a str,
        /// `true` when resolution must start at the tree root.
        from_root: bool,
    },
}

impl<'a> Address<'a> {
    /// Splits `name` on the configured delimiter.
    ///
    /// The root marker is only meaningful at the start of the *first* path
    /// segment; anywhere else it is an ordinary character. A name with no
    /// delimiter is always [`Address::Local`], marker or not.
    pub(crate) fn parse(name: &'a str, config: &AddressConfig) -> Self {
        if !name.contains(config.delimiter) {
            return Address::Local(name);
        }

        let mut segments: Vec<&str> = name.split(config.delimiter).collect();
        // A delimiter is present, so split produced at least two pieces.
        let event = segments.pop().unwrap_or("");

        let mut from_root = false;
        if let Some(first) = segments.first_mut() {
            if let Some(stripped) = first.strip_prefix(config.root_marker) {
                *first = stripped;
                from_root = true;
            }
        }

        Address::Path {
            segments,
            event,
            from_root,
        }
    }
}
