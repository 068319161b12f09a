//! Stable handles into the [`LGraph`](crate::LGraph) arenas.
//!
//! Handles are plain indices. A handle stays valid until its element is removed; slots are never
//! reused within one graph, so a stale handle can be detected instead of aliasing a new element.

use std::fmt;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                Self(index)
            }

            /// Position of the element in its arena.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

handle!(
    /// Handle of a node.
    NodeId,
    "n"
);
handle!(
    /// Handle of a port.
    PortId,
    "p"
);
handle!(
    /// Handle of an edge.
    EdgeId,
    "e"
);
handle!(
    /// Handle of a label. Labels are owned by whichever list (node, edge, port or dummy
    /// provenance) currently holds the handle.
    LabelId,
    "l"
);
