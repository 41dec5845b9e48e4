//! nf-host: the host abstraction for nodeflow.
//!
//! Provides:
//! - Socket, value and path primitive types shared between hosts and builders
//! - The [`Host`] trait: the black-box surface of a versioned
//!   graph-construction API (capability introspection, graph containers,
//!   node instantiation, links, drivers, modifiers)
//! - [`HostError`]: the enumerable host-level failure conditions
//! - [`MemoryHost`]: a hermetic in-process reference host for tests,
//!   examples and embedding

pub mod error;
pub mod host;
pub mod memory;
pub mod path;
pub mod socket;
pub mod value;

// Re-exports for ergonomics
pub use error::{HostError, HostResult};
pub use host::{Host, PortRef, Position, GROUP_INPUT_KIND, GROUP_OUTPUT_KIND};
pub use memory::{MemoryHost, NodeKindDef};
pub use path::{DriverTarget, ParamPath};
pub use socket::{SocketAttr, SocketDirection, SocketType};
pub use value::Value;
