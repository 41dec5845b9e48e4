//! The host trait: the black-box surface of a versioned graph API.

use nf_core::{CapabilityId, DriverId, GraphId, LinkId, ModifierId, NodeId, ObjectId, SocketId};
use serde::{Deserialize, Serialize};

use crate::error::HostResult;
use crate::path::{DriverTarget, ParamPath};
use crate::socket::{SocketAttr, SocketDirection, SocketType};
use crate::value::Value;

/// Builtin node kind exposing the graph's input interface inside its body.
///
/// Every conforming host registers this kind; its output sockets mirror the
/// graph's declared input sockets.
pub const GROUP_INPUT_KIND: &str = "GroupInput";

/// Builtin node kind exposing the graph's output interface inside its body.
///
/// Its input sockets mirror the graph's declared output sockets.
pub const GROUP_OUTPUT_KIND: &str = "GroupOutput";

/// 2-D layout position of a node in its graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Position {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Reference to a named socket on a specific node, used as a link endpoint.
///
/// Interface sockets participate in links through the builtin
/// [`GROUP_INPUT_KIND`] / [`GROUP_OUTPUT_KIND`] nodes, so every link endpoint
/// is a (node, socket name) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRef {
    pub node: NodeId,
    pub socket: String,
}

impl PortRef {
    pub fn new(node: NodeId, socket: impl Into<String>) -> Self {
        Self {
            node,
            socket: socket.into(),
        }
    }
}

/// The external graph-construction API the builder layer wraps.
///
/// The trait is the concrete Rust form of the host surface: capability
/// introspection by identifier, graph containers with mutable node
/// collections and interface lists, node instantiation by kind, a link
/// primitive, per-object modifier collections and a driver-binding primitive
/// per data path.
///
/// Hosts own every object's lifetime; implementations hand out handles, and
/// a handle outliving its object yields [`crate::HostError::StaleHandle`]
/// rather than undefined behavior. All mutation is synchronous and
/// non-reentrant: the builder assumes exclusive access for the duration of a
/// build, so no method takes locks and nothing here is `Send`-bound.
pub trait Host {
    /// Does the running host version support the named construct?
    ///
    /// Never fails: an identifier the host does not recognize yields
    /// `false`. Results are constant within one process run but legitimately
    /// differ across host versions.
    fn supports(&self, ident: &CapabilityId) -> bool;

    // ---- graph containers ----

    /// Find a graph by exact name.
    fn find_graph(&self, name: &str) -> Option<GraphId>;

    /// Create a new, empty graph container.
    ///
    /// The host may uniquify the name if it is already taken.
    fn create_graph(&mut self, name: &str) -> HostResult<GraphId>;

    /// Remove every node (and with them, every link) from a graph.
    ///
    /// The graph's interface declaration is not touched. Returns the number
    /// of nodes removed.
    fn clear_nodes(&mut self, graph: GraphId) -> HostResult<usize>;

    /// Number of nodes currently in the graph.
    fn node_count(&self, graph: GraphId) -> HostResult<usize>;

    // ---- interface sockets ----

    /// Find an interface socket by name.
    fn find_interface_socket(&self, graph: GraphId, name: &str) -> HostResult<Option<SocketId>>;

    /// Declare a new interface socket on the graph.
    fn create_interface_socket(
        &mut self,
        graph: GraphId,
        name: &str,
        direction: SocketDirection,
        ty: SocketType,
        description: &str,
    ) -> HostResult<SocketId>;

    /// Re-point an existing interface socket at a new shape.
    ///
    /// Used by declaration upserts; the socket keeps its handle and its
    /// position in the interface.
    fn update_interface_socket(
        &mut self,
        socket: SocketId,
        direction: SocketDirection,
        ty: SocketType,
        description: &str,
    ) -> HostResult<()>;

    /// Does this socket expose the given numeric attribute slot?
    ///
    /// Availability varies by declared type and host version. Never fails;
    /// a stale handle simply reports `false`.
    fn socket_has_attr(&self, socket: SocketId, attr: SocketAttr) -> bool;

    /// Assign a numeric attribute on an interface socket.
    fn set_socket_attr(
        &mut self,
        socket: SocketId,
        attr: SocketAttr,
        value: f64,
    ) -> HostResult<()>;

    // ---- nodes ----

    /// Instantiate a node of a registered kind at a layout position.
    ///
    /// Fails with [`crate::HostError::UnknownKind`] if the kind is not
    /// registered in the running version; capability-gated callers check
    /// [`Host::supports`] first and never trigger that path.
    fn create_node(
        &mut self,
        graph: GraphId,
        kind: &CapabilityId,
        position: Position,
    ) -> HostResult<NodeId>;

    /// Set a node's human-readable label.
    fn set_node_label(&mut self, node: NodeId, label: &str) -> HostResult<()>;

    /// Assign a constant to an unconnected node input.
    fn set_input_default(&mut self, node: NodeId, input: &str, value: Value) -> HostResult<()>;

    // ---- links ----

    /// Connect a node output to a node input within one graph.
    ///
    /// Type compatibility is judged by the host's own conversion rules; a
    /// refusal is reported as [`crate::HostError::LinkRejected`]. Connecting
    /// into an already-fed input replaces the previous link.
    fn connect(&mut self, graph: GraphId, from: &PortRef, to: &PortRef) -> HostResult<LinkId>;

    // ---- drivable parameter paths ----

    /// Mint the data path addressing a node's output value.
    fn node_output_path(&self, node: NodeId, output: &str) -> HostResult<ParamPath>;

    /// Mint the data path addressing a graph parameter exposed on a
    /// modifier, resolved through the host-generated parameter key of the
    /// named interface socket.
    fn modifier_param_path(
        &self,
        modifier: ModifierId,
        socket_name: &str,
    ) -> HostResult<ParamPath>;

    // ---- drivers ----

    /// Remove the driver bound to a target, if any.
    ///
    /// Returns whether a driver was present. Absence is not an error.
    fn remove_driver(&mut self, target: &DriverTarget) -> bool;

    /// Bind an expression-driven value to a target.
    fn add_driver(&mut self, target: &DriverTarget, expression: &str) -> HostResult<DriverId>;

    // ---- objects and modifiers ----

    /// First modifier of the managed (graph) kind on the object, if any.
    ///
    /// Modifiers of other kinds are skipped, not counted.
    fn find_graph_modifier(&self, object: ObjectId) -> HostResult<Option<ModifierId>>;

    /// Append a new modifier of the managed kind to the object.
    fn create_graph_modifier(&mut self, object: ObjectId, name: &str) -> HostResult<ModifierId>;

    /// Point a managed modifier at a graph, overwriting any previous
    /// assignment.
    fn assign_modifier_graph(&mut self, modifier: ModifierId, graph: GraphId) -> HostResult<()>;
}
