use core::fmt;
use core::num::NonZeroU32;

/// Defines a compact handle type referencing one kind of host-owned object.
///
/// Every handle is a `u32` index into host storage, stored as `NonZero` so
/// `Option<Handle>` stays pointer-sized. Handles of different kinds are
/// distinct types: a `NodeId` cannot be passed where a `SocketId` is
/// expected, which removes a whole class of malformed host calls at compile
/// time.
macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create a handle from a 0-based index by storing index+1.
            pub fn from_index(index: u32) -> Self {
                // index+1 must be nonzero
                Self(NonZeroU32::new(index + 1).expect("index+1 is nonzero"))
            }

            /// Recover the 0-based index.
            pub fn index(self) -> u32 {
                self.0.get() - 1
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.index())
            }
        }
    };
}

handle! {
    /// Handle to a host-side graph container.
    GraphId
}

handle! {
    /// Handle to a node inside a graph.
    NodeId
}

handle! {
    /// Handle to an interface socket declared on a graph.
    SocketId
}

handle! {
    /// Handle to a link between two node sockets.
    LinkId
}

handle! {
    /// Handle to a host-side target object.
    ObjectId
}

handle! {
    /// Handle to a modifier instance attaching a graph to an object.
    ModifierId
}

handle! {
    /// Handle to a live driver binding.
    DriverId
}
