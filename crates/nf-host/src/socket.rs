//! Socket primitive types shared between hosts and builders.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Direction of an interface socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketDirection {
    /// Value flows from outside into the graph.
    Input,
    /// Value flows out of the graph.
    Output,
}

impl fmt::Display for SocketDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketDirection::Input => f.write_str("input"),
            SocketDirection::Output => f.write_str("output"),
        }
    }
}

/// Declared data type of a socket.
///
/// This is the closed set the builder layer declares. Hosts may register
/// further types; those are reachable only through capability-gated node
/// instantiation, never through interface declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketType {
    Float,
    Int,
    Bool,
    Vector,
    Rotation,
    Geometry,
}

impl fmt::Display for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SocketType::Float => "Float",
            SocketType::Int => "Int",
            SocketType::Bool => "Bool",
            SocketType::Vector => "Vector",
            SocketType::Rotation => "Rotation",
            SocketType::Geometry => "Geometry",
        };
        f.write_str(name)
    }
}

/// Numeric attribute slots a socket may expose.
///
/// Which slots exist on a concrete socket depends on its declared type and
/// on the host version; availability must be queried per socket, never
/// assumed from the type alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketAttr {
    /// Default value when the socket is unconnected.
    Default,
    /// Lower bound of the socket's value range.
    Min,
    /// Upper bound of the socket's value range.
    Max,
}

impl fmt::Display for SocketAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketAttr::Default => f.write_str("default"),
            SocketAttr::Min => f.write_str("min"),
            SocketAttr::Max => f.write_str("max"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(SocketType::Float.to_string(), "Float");
        assert_eq!(SocketDirection::Output.to_string(), "output");
        assert_eq!(SocketAttr::Min.to_string(), "min");
    }
}
