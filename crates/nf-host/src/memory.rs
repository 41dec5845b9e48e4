//! In-memory reference host.
//!
//! This is the reference implementation of [`Host`], backed by plain
//! collections. Its capability set is whatever node kinds were registered at
//! construction, plus the builtin group interface kinds.
//!
//! ## Limitations
//!
//! - **Single document**: there is no notion of separate scenes or files;
//!   all graphs and objects live in one flat store.
//! - **Dangling drivers are tolerated**: clearing a graph's nodes does not
//!   garbage-collect drivers whose paths pointed into the removed nodes,
//!   matching the behavior of the production hosts this models. Such drivers
//!   are inert.
//! - **No undo**: mutations apply immediately.
//!
//! Use this host for:
//! - Exercising the builder layer in tests and examples
//! - Embedding graph construction in tools that never talk to a real host

use std::collections::HashMap;

use nf_core::{CapabilityId, DriverId, GraphId, LinkId, ModifierId, NodeId, ObjectId, SocketId};

use crate::error::{HostError, HostResult};
use crate::host::{Host, PortRef, Position, GROUP_INPUT_KIND, GROUP_OUTPUT_KIND};
use crate::path::{DriverTarget, ParamPath};
use crate::socket::{SocketAttr, SocketDirection, SocketType};
use crate::value::Value;

/// Definition of an instantiable node kind: its typed input and output
/// sockets.
///
/// Registering a kind is what makes its identifier a supported capability.
#[derive(Debug, Clone)]
pub struct NodeKindDef {
    name: String,
    inputs: Vec<(String, SocketType)>,
    outputs: Vec<(String, SocketType)>,
}

impl NodeKindDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Add a typed input socket.
    pub fn input(mut self, name: impl Into<String>, ty: SocketType) -> Self {
        self.inputs.push((name.into(), ty));
        self
    }

    /// Add a typed output socket.
    pub fn output(mut self, name: impl Into<String>, ty: SocketType) -> Self {
        self.outputs.push((name.into(), ty));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn input_type(&self, socket: &str) -> Option<SocketType> {
        self.inputs
            .iter()
            .find(|(n, _)| n == socket)
            .map(|&(_, ty)| ty)
    }

    fn output_type(&self, socket: &str) -> Option<SocketType> {
        self.outputs
            .iter()
            .find(|(n, _)| n == socket)
            .map(|&(_, ty)| ty)
    }
}

#[derive(Debug, Clone)]
struct SocketData {
    name: String,
    direction: SocketDirection,
    ty: SocketType,
    description: String,
    attrs: HashMap<SocketAttr, f64>,
}

#[derive(Debug, Clone)]
struct NodeData {
    graph: GraphId,
    kind: String,
    /// Host-assigned name, unique within the graph. Data paths are keyed on
    /// it, so a rebuild that recreates nodes in the same order mints the
    /// same paths.
    name: String,
    position: Position,
    label: Option<String>,
    input_defaults: HashMap<String, Value>,
}

#[derive(Debug, Clone)]
struct Link {
    id: LinkId,
    from: (NodeId, String),
    to: (NodeId, String),
}

#[derive(Debug, Clone)]
struct GraphData {
    name: String,
    /// Interface sockets in declaration order; position in this list is
    /// what the host-generated `Socket_N` parameter keys index.
    interface: Vec<SocketId>,
    nodes: Vec<NodeId>,
    links: Vec<Link>,
}

#[derive(Debug, Clone)]
struct ModifierData {
    name: String,
    graph_kind: bool,
    graph: Option<GraphId>,
}

#[derive(Debug, Clone)]
struct ObjectData {
    name: String,
    modifiers: Vec<ModifierId>,
}

#[derive(Debug, Clone)]
struct DriverEntry {
    id: DriverId,
    expression: String,
}

/// In-memory implementation of [`Host`].
#[derive(Debug, Default)]
pub struct MemoryHost {
    kinds: HashMap<String, NodeKindDef>,
    graphs: Vec<GraphData>,
    sockets: Vec<SocketData>,
    nodes: HashMap<NodeId, NodeData>,
    objects: Vec<ObjectData>,
    modifiers: Vec<ModifierData>,
    drivers: HashMap<DriverTarget, DriverEntry>,
    next_node: u32,
    next_link: u32,
    next_driver: u32,
}

/// Which numeric attribute slots a socket type exposes in this host version.
fn attr_available(ty: SocketType, attr: SocketAttr) -> bool {
    match ty {
        SocketType::Float | SocketType::Int => true,
        SocketType::Bool => matches!(attr, SocketAttr::Default),
        SocketType::Vector | SocketType::Rotation | SocketType::Geometry => false,
    }
}

/// This host version's implicit conversion rules for links and constants.
fn convertible(from: SocketType, to: SocketType) -> bool {
    use SocketType::*;
    let numeric = |t: SocketType| matches!(t, Float | Int | Bool);
    match (from, to) {
        (a, b) if a == b => true,
        (a, b) if numeric(a) && numeric(b) => true,
        (a, Vector) if numeric(a) => true,
        (Vector, b) if numeric(b) => true,
        (Vector, Rotation) | (Rotation, Vector) => true,
        _ => false,
    }
}

impl MemoryHost {
    /// Create an empty host with only the builtin group kinds available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host whose capability set is the given kinds.
    pub fn with_kinds(kinds: impl IntoIterator<Item = NodeKindDef>) -> Self {
        let mut host = Self::new();
        for def in kinds {
            host.register_kind(def);
        }
        host
    }

    /// Register a node kind, making its identifier a supported capability.
    pub fn register_kind(&mut self, def: NodeKindDef) {
        self.kinds.insert(def.name.clone(), def);
    }

    /// Add a target object to the document.
    pub fn create_object(&mut self, name: impl Into<String>) -> ObjectId {
        let id = ObjectId::from_index(self.objects.len() as u32);
        self.objects.push(ObjectData {
            name: name.into(),
            modifiers: Vec::new(),
        });
        id
    }

    /// Append a modifier of some unmanaged kind to an object.
    ///
    /// The builder layer never creates these; tests use them to verify that
    /// managed-modifier lookup skips foreign instances.
    pub fn create_other_modifier(&mut self, object: ObjectId, name: impl Into<String>) -> ModifierId {
        let id = ModifierId::from_index(self.modifiers.len() as u32);
        self.modifiers.push(ModifierData {
            name: name.into(),
            graph_kind: false,
            graph: None,
        });
        self.objects[object.index() as usize].modifiers.push(id);
        id
    }

    // ---- inspection (tests, examples) ----

    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    pub fn graph_name(&self, graph: GraphId) -> Option<&str> {
        self.graphs.get(graph.index() as usize).map(|g| g.name.as_str())
    }

    /// Interface sockets of a graph in declaration order.
    pub fn interface(&self, graph: GraphId) -> &[SocketId] {
        self.graphs
            .get(graph.index() as usize)
            .map(|g| g.interface.as_slice())
            .unwrap_or(&[])
    }

    pub fn socket_name(&self, socket: SocketId) -> Option<&str> {
        self.sockets.get(socket.index() as usize).map(|s| s.name.as_str())
    }

    pub fn socket_direction(&self, socket: SocketId) -> Option<SocketDirection> {
        self.sockets.get(socket.index() as usize).map(|s| s.direction)
    }

    pub fn socket_type(&self, socket: SocketId) -> Option<SocketType> {
        self.sockets.get(socket.index() as usize).map(|s| s.ty)
    }

    pub fn socket_description(&self, socket: SocketId) -> Option<&str> {
        self.sockets
            .get(socket.index() as usize)
            .map(|s| s.description.as_str())
    }

    /// Current value of a socket attribute, if one has been assigned.
    pub fn socket_attr(&self, socket: SocketId, attr: SocketAttr) -> Option<f64> {
        self.sockets
            .get(socket.index() as usize)
            .and_then(|s| s.attrs.get(&attr).copied())
    }

    pub fn node_kind(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|n| n.kind.as_str())
    }

    /// Host-assigned node name, unique within the node's graph.
    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).map(|n| n.name.as_str())
    }

    pub fn node_label(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).and_then(|n| n.label.as_deref())
    }

    pub fn node_position(&self, node: NodeId) -> Option<Position> {
        self.nodes.get(&node).map(|n| n.position)
    }

    pub fn input_default(&self, node: NodeId, input: &str) -> Option<Value> {
        self.nodes
            .get(&node)
            .and_then(|n| n.input_defaults.get(input).copied())
    }

    pub fn link_count(&self, graph: GraphId) -> usize {
        self.graphs
            .get(graph.index() as usize)
            .map(|g| g.links.len())
            .unwrap_or(0)
    }

    /// Endpoints of a link, as (from, to) port references.
    pub fn link_endpoints(&self, graph: GraphId, link: LinkId) -> Option<(PortRef, PortRef)> {
        self.graphs
            .get(graph.index() as usize)?
            .links
            .iter()
            .find(|l| l.id == link)
            .map(|l| {
                (
                    PortRef::new(l.from.0, l.from.1.clone()),
                    PortRef::new(l.to.0, l.to.1.clone()),
                )
            })
    }

    pub fn object_name(&self, object: ObjectId) -> Option<&str> {
        self.objects
            .get(object.index() as usize)
            .map(|o| o.name.as_str())
    }

    /// Total number of live drivers, dangling ones included.
    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    pub fn driver_expression(&self, target: &DriverTarget) -> Option<&str> {
        self.drivers.get(target).map(|d| d.expression.as_str())
    }

    pub fn driver_id(&self, target: &DriverTarget) -> Option<DriverId> {
        self.drivers.get(target).map(|d| d.id)
    }

    /// All modifiers on an object, managed or not.
    pub fn modifier_count(&self, object: ObjectId) -> usize {
        self.objects
            .get(object.index() as usize)
            .map(|o| o.modifiers.len())
            .unwrap_or(0)
    }

    /// Managed (graph-kind) modifiers on an object.
    pub fn graph_modifier_count(&self, object: ObjectId) -> usize {
        self.objects
            .get(object.index() as usize)
            .map(|o| {
                o.modifiers
                    .iter()
                    .filter(|m| self.modifiers[m.index() as usize].graph_kind)
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn modifier_name(&self, modifier: ModifierId) -> Option<&str> {
        self.modifiers
            .get(modifier.index() as usize)
            .map(|m| m.name.as_str())
    }

    pub fn modifier_graph(&self, modifier: ModifierId) -> Option<GraphId> {
        self.modifiers
            .get(modifier.index() as usize)
            .and_then(|m| m.graph)
    }

    // ---- internal lookups ----

    fn graph_data(&self, graph: GraphId) -> HostResult<&GraphData> {
        self.graphs
            .get(graph.index() as usize)
            .ok_or(HostError::StaleHandle {
                what: "graph",
                index: graph.index(),
            })
    }

    fn graph_data_mut(&mut self, graph: GraphId) -> HostResult<&mut GraphData> {
        self.graphs
            .get_mut(graph.index() as usize)
            .ok_or(HostError::StaleHandle {
                what: "graph",
                index: graph.index(),
            })
    }

    fn node_data(&self, node: NodeId) -> HostResult<&NodeData> {
        self.nodes.get(&node).ok_or(HostError::StaleHandle {
            what: "node",
            index: node.index(),
        })
    }

    fn socket_data_mut(&mut self, socket: SocketId) -> HostResult<&mut SocketData> {
        self.sockets
            .get_mut(socket.index() as usize)
            .ok_or(HostError::StaleHandle {
                what: "socket",
                index: socket.index(),
            })
    }

    fn kind_def(&self, kind: &str) -> HostResult<&NodeKindDef> {
        self.kinds.get(kind).ok_or_else(|| HostError::UnknownKind {
            kind: kind.to_string(),
        })
    }

    /// Resolve the type of an output endpoint. Group-input nodes mirror the
    /// graph's input interface.
    fn resolve_output(&self, graph: &GraphData, node: &NodeData, socket: &str) -> HostResult<SocketType> {
        if node.kind == GROUP_INPUT_KIND {
            return graph
                .interface
                .iter()
                .map(|&sid| &self.sockets[sid.index() as usize])
                .find(|s| s.direction == SocketDirection::Input && s.name == socket)
                .map(|s| s.ty)
                .ok_or_else(|| HostError::MissingSocket {
                    what: "group input node",
                    socket: socket.to_string(),
                });
        }
        if node.kind == GROUP_OUTPUT_KIND {
            return Err(HostError::MissingSocket {
                what: "group output node",
                socket: socket.to_string(),
            });
        }
        self.kind_def(&node.kind)?
            .output_type(socket)
            .ok_or_else(|| HostError::MissingSocket {
                what: "node output",
                socket: socket.to_string(),
            })
    }

    /// Resolve the type of an input endpoint. Group-output nodes mirror the
    /// graph's output interface.
    fn resolve_input(&self, graph: &GraphData, node: &NodeData, socket: &str) -> HostResult<SocketType> {
        if node.kind == GROUP_OUTPUT_KIND {
            return graph
                .interface
                .iter()
                .map(|&sid| &self.sockets[sid.index() as usize])
                .find(|s| s.direction == SocketDirection::Output && s.name == socket)
                .map(|s| s.ty)
                .ok_or_else(|| HostError::MissingSocket {
                    what: "group output node",
                    socket: socket.to_string(),
                });
        }
        if node.kind == GROUP_INPUT_KIND {
            return Err(HostError::MissingSocket {
                what: "group input node",
                socket: socket.to_string(),
            });
        }
        self.kind_def(&node.kind)?
            .input_type(socket)
            .ok_or_else(|| HostError::MissingSocket {
                what: "node input",
                socket: socket.to_string(),
            })
    }
}

impl Host for MemoryHost {
    fn supports(&self, ident: &CapabilityId) -> bool {
        ident.as_str() == GROUP_INPUT_KIND
            || ident.as_str() == GROUP_OUTPUT_KIND
            || self.kinds.contains_key(ident.as_str())
    }

    fn find_graph(&self, name: &str) -> Option<GraphId> {
        self.graphs
            .iter()
            .position(|g| g.name == name)
            .map(|i| GraphId::from_index(i as u32))
    }

    fn create_graph(&mut self, name: &str) -> HostResult<GraphId> {
        if name.trim().is_empty() {
            return Err(HostError::InvalidName {
                what: "empty graph name".to_string(),
            });
        }
        // Uniquify a taken name with numeric suffixes, the way the modeled
        // hosts do.
        let mut unique = name.to_string();
        let mut counter = 0u32;
        while self.graphs.iter().any(|g| g.name == unique) {
            counter += 1;
            unique = format!("{name}.{counter:03}");
        }
        let id = GraphId::from_index(self.graphs.len() as u32);
        self.graphs.push(GraphData {
            name: unique,
            interface: Vec::new(),
            nodes: Vec::new(),
            links: Vec::new(),
        });
        Ok(id)
    }

    fn clear_nodes(&mut self, graph: GraphId) -> HostResult<usize> {
        let data = self.graph_data_mut(graph)?;
        let removed_ids = std::mem::take(&mut data.nodes);
        data.links.clear();
        for id in &removed_ids {
            self.nodes.remove(id);
        }
        Ok(removed_ids.len())
    }

    fn node_count(&self, graph: GraphId) -> HostResult<usize> {
        Ok(self.graph_data(graph)?.nodes.len())
    }

    fn find_interface_socket(&self, graph: GraphId, name: &str) -> HostResult<Option<SocketId>> {
        let data = self.graph_data(graph)?;
        Ok(data
            .interface
            .iter()
            .copied()
            .find(|&sid| self.sockets[sid.index() as usize].name == name))
    }

    fn create_interface_socket(
        &mut self,
        graph: GraphId,
        name: &str,
        direction: SocketDirection,
        ty: SocketType,
        description: &str,
    ) -> HostResult<SocketId> {
        if name.trim().is_empty() {
            return Err(HostError::InvalidName {
                what: "empty socket name".to_string(),
            });
        }
        self.graph_data(graph)?;
        let id = SocketId::from_index(self.sockets.len() as u32);
        self.sockets.push(SocketData {
            name: name.to_string(),
            direction,
            ty,
            description: description.to_string(),
            attrs: HashMap::new(),
        });
        self.graph_data_mut(graph)?.interface.push(id);
        Ok(id)
    }

    fn update_interface_socket(
        &mut self,
        socket: SocketId,
        direction: SocketDirection,
        ty: SocketType,
        description: &str,
    ) -> HostResult<()> {
        let data = self.socket_data_mut(socket)?;
        data.direction = direction;
        data.description = description.to_string();
        if data.ty != ty {
            data.ty = ty;
            // Attribute values assigned under the old type may not exist
            // under the new one.
            data.attrs.retain(|&attr, _| attr_available(ty, attr));
        }
        Ok(())
    }

    fn socket_has_attr(&self, socket: SocketId, attr: SocketAttr) -> bool {
        self.sockets
            .get(socket.index() as usize)
            .map(|s| attr_available(s.ty, attr))
            .unwrap_or(false)
    }

    fn set_socket_attr(&mut self, socket: SocketId, attr: SocketAttr, value: f64) -> HostResult<()> {
        let data = self.socket_data_mut(socket)?;
        if !attr_available(data.ty, attr) {
            return Err(HostError::AttrNotApplicable { attr, ty: data.ty });
        }
        data.attrs.insert(attr, value);
        Ok(())
    }

    fn create_node(
        &mut self,
        graph: GraphId,
        kind: &CapabilityId,
        position: Position,
    ) -> HostResult<NodeId> {
        self.graph_data(graph)?;
        let kind = kind.as_str();
        if kind != GROUP_INPUT_KIND && kind != GROUP_OUTPUT_KIND {
            self.kind_def(kind)?;
        }
        // Name the node after its kind, uniquified within the graph.
        let mut name = kind.to_string();
        let mut counter = 0u32;
        let taken = |nodes: &HashMap<NodeId, NodeData>, graph_nodes: &[NodeId], candidate: &str| {
            graph_nodes
                .iter()
                .any(|id| nodes[id].name == candidate)
        };
        {
            let graph_nodes = &self.graphs[graph.index() as usize].nodes;
            while taken(&self.nodes, graph_nodes, &name) {
                counter += 1;
                name = format!("{kind}.{counter:03}");
            }
        }
        let id = NodeId::from_index(self.next_node);
        self.next_node += 1;
        self.nodes.insert(
            id,
            NodeData {
                graph,
                kind: kind.to_string(),
                name,
                position,
                label: None,
                input_defaults: HashMap::new(),
            },
        );
        self.graph_data_mut(graph)?.nodes.push(id);
        Ok(id)
    }

    fn set_node_label(&mut self, node: NodeId, label: &str) -> HostResult<()> {
        let index = node.index();
        let data = self.nodes.get_mut(&node).ok_or(HostError::StaleHandle {
            what: "node",
            index,
        })?;
        data.label = Some(label.to_string());
        Ok(())
    }

    fn set_input_default(&mut self, node: NodeId, input: &str, value: Value) -> HostResult<()> {
        let data = self.node_data(node)?;
        if data.kind == GROUP_INPUT_KIND || data.kind == GROUP_OUTPUT_KIND {
            return Err(HostError::MissingSocket {
                what: "builtin interface node",
                socket: input.to_string(),
            });
        }
        let input_ty =
            self.kind_def(&data.kind)?
                .input_type(input)
                .ok_or_else(|| HostError::MissingSocket {
                    what: "node input",
                    socket: input.to_string(),
                })?;
        let value_ty = value.socket_type();
        if input_ty == SocketType::Geometry || !convertible(value_ty, input_ty) {
            return Err(HostError::ValueMismatch {
                expected: input_ty,
                got: value_ty,
            });
        }
        let index = node.index();
        let data = self.nodes.get_mut(&node).ok_or(HostError::StaleHandle {
            what: "node",
            index,
        })?;
        data.input_defaults.insert(input.to_string(), value);
        Ok(())
    }

    fn connect(&mut self, graph: GraphId, from: &PortRef, to: &PortRef) -> HostResult<LinkId> {
        let data = self.graph_data(graph)?;
        let from_node = self.node_data(from.node)?;
        let to_node = self.node_data(to.node)?;
        if from_node.graph != graph {
            return Err(HostError::NodeOutsideGraph {
                node: from.node,
                graph,
            });
        }
        if to_node.graph != graph {
            return Err(HostError::NodeOutsideGraph { node: to.node, graph });
        }
        let from_ty = self.resolve_output(data, from_node, &from.socket)?;
        let to_ty = self.resolve_input(data, to_node, &to.socket)?;
        if !convertible(from_ty, to_ty) {
            return Err(HostError::LinkRejected {
                from: from_ty,
                to: to_ty,
            });
        }
        let id = LinkId::from_index(self.next_link);
        self.next_link += 1;
        let data = self.graph_data_mut(graph)?;
        // An input holds at most one link; connecting again replaces it.
        data.links
            .retain(|l| !(l.to.0 == to.node && l.to.1 == to.socket));
        data.links.push(Link {
            id,
            from: (from.node, from.socket.clone()),
            to: (to.node, to.socket.clone()),
        });
        Ok(id)
    }

    fn node_output_path(&self, node: NodeId, output: &str) -> HostResult<ParamPath> {
        let data = self.node_data(node)?;
        let graph = self.graph_data(data.graph)?;
        self.resolve_output(graph, data, output)?;
        Ok(ParamPath::new(format!(
            "graphs[{}].nodes[\"{}\"].outputs[\"{}\"]",
            data.graph.index(),
            data.name,
            output
        )))
    }

    fn modifier_param_path(&self, modifier: ModifierId, socket_name: &str) -> HostResult<ParamPath> {
        let index = modifier.index();
        let data = self
            .modifiers
            .get(index as usize)
            .filter(|m| m.graph_kind)
            .ok_or(HostError::StaleHandle {
                what: "graph modifier",
                index,
            })?;
        let graph = data.graph.ok_or(HostError::MissingSocket {
            what: "modifier without a graph",
            socket: socket_name.to_string(),
        })?;
        let graph_data = self.graph_data(graph)?;
        // Parameter keys are host-generated from interface position, not
        // from the socket name.
        let key_index = graph_data
            .interface
            .iter()
            .position(|&sid| self.sockets[sid.index() as usize].name == socket_name)
            .ok_or_else(|| HostError::MissingSocket {
                what: "modifier parameter",
                socket: socket_name.to_string(),
            })?;
        Ok(ParamPath::new(format!(
            "modifiers[\"{}\"][\"Socket_{}\"]",
            data.name, key_index
        )))
    }

    fn remove_driver(&mut self, target: &DriverTarget) -> bool {
        self.drivers.remove(target).is_some()
    }

    fn add_driver(&mut self, target: &DriverTarget, expression: &str) -> HostResult<DriverId> {
        let id = DriverId::from_index(self.next_driver);
        self.next_driver += 1;
        self.drivers.insert(
            target.clone(),
            DriverEntry {
                id,
                expression: expression.to_string(),
            },
        );
        Ok(id)
    }

    fn find_graph_modifier(&self, object: ObjectId) -> HostResult<Option<ModifierId>> {
        let index = object.index();
        let data = self
            .objects
            .get(index as usize)
            .ok_or(HostError::StaleHandle {
                what: "object",
                index,
            })?;
        Ok(data
            .modifiers
            .iter()
            .copied()
            .find(|m| self.modifiers[m.index() as usize].graph_kind))
    }

    fn create_graph_modifier(&mut self, object: ObjectId, name: &str) -> HostResult<ModifierId> {
        if name.trim().is_empty() {
            return Err(HostError::InvalidName {
                what: "empty modifier name".to_string(),
            });
        }
        let index = object.index();
        self.objects
            .get(index as usize)
            .ok_or(HostError::StaleHandle {
                what: "object",
                index,
            })?;
        let id = ModifierId::from_index(self.modifiers.len() as u32);
        self.modifiers.push(ModifierData {
            name: name.to_string(),
            graph_kind: true,
            graph: None,
        });
        self.objects[index as usize].modifiers.push(id);
        Ok(id)
    }

    fn assign_modifier_graph(&mut self, modifier: ModifierId, graph: GraphId) -> HostResult<()> {
        self.graph_data(graph)?;
        let index = modifier.index();
        let data = self
            .modifiers
            .get_mut(index as usize)
            .filter(|m| m.graph_kind)
            .ok_or(HostError::StaleHandle {
                what: "graph modifier",
                index,
            })?;
        data.graph = Some(graph);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn math_host() -> MemoryHost {
        MemoryHost::with_kinds([
            NodeKindDef::new("MathAdd")
                .input("A", SocketType::Float)
                .input("B", SocketType::Float)
                .output("Value", SocketType::Float),
            NodeKindDef::new("MeshCube").output("Mesh", SocketType::Geometry),
        ])
    }

    #[test]
    fn capability_membership() {
        let host = math_host();
        assert!(host.supports(&CapabilityId::new("MathAdd")));
        assert!(host.supports(&CapabilityId::new(GROUP_OUTPUT_KIND)));
        assert!(!host.supports(&CapabilityId::new("MathHyperbolicFold")));
    }

    #[test]
    fn taken_graph_names_get_suffixes() {
        let mut host = math_host();
        let a = host.create_graph("Wave").unwrap();
        let b = host.create_graph("Wave").unwrap();
        let c = host.create_graph("Wave").unwrap();
        assert_eq!(host.graph_name(a), Some("Wave"));
        assert_eq!(host.graph_name(b), Some("Wave.001"));
        assert_eq!(host.graph_name(c), Some("Wave.002"));
        assert_eq!(host.find_graph("Wave"), Some(a));
    }

    #[test]
    fn connect_replaces_link_into_same_input() {
        let mut host = math_host();
        let g = host.create_graph("G").unwrap();
        let add = CapabilityId::new("MathAdd");
        let a = host.create_node(g, &add, Position::ORIGIN).unwrap();
        let b = host.create_node(g, &add, Position::ORIGIN).unwrap();
        let c = host.create_node(g, &add, Position::ORIGIN).unwrap();

        host.connect(g, &PortRef::new(a, "Value"), &PortRef::new(c, "A"))
            .unwrap();
        let replacement = host
            .connect(g, &PortRef::new(b, "Value"), &PortRef::new(c, "A"))
            .unwrap();
        assert_eq!(host.link_count(g), 1);
        assert_eq!(
            host.link_endpoints(g, replacement),
            Some((PortRef::new(b, "Value"), PortRef::new(c, "A")))
        );
    }

    #[test]
    fn geometry_does_not_convert_to_float() {
        let mut host = math_host();
        let g = host.create_graph("G").unwrap();
        let cube = host
            .create_node(g, &CapabilityId::new("MeshCube"), Position::ORIGIN)
            .unwrap();
        let add = host
            .create_node(g, &CapabilityId::new("MathAdd"), Position::ORIGIN)
            .unwrap();
        let err = host
            .connect(g, &PortRef::new(cube, "Mesh"), &PortRef::new(add, "A"))
            .unwrap_err();
        assert_eq!(
            err,
            HostError::LinkRejected {
                from: SocketType::Geometry,
                to: SocketType::Float,
            }
        );
        assert_eq!(host.link_count(g), 0);
    }

    #[test]
    fn group_nodes_mirror_the_interface() {
        let mut host = math_host();
        let g = host.create_graph("G").unwrap();
        host.create_interface_socket(g, "Scale", SocketDirection::Input, SocketType::Float, "scale")
            .unwrap();
        host.create_interface_socket(
            g,
            "Geometry",
            SocketDirection::Output,
            SocketType::Geometry,
            "result",
        )
        .unwrap();

        let gin = host
            .create_node(g, &CapabilityId::new(GROUP_INPUT_KIND), Position::ORIGIN)
            .unwrap();
        let gout = host
            .create_node(g, &CapabilityId::new(GROUP_OUTPUT_KIND), Position::ORIGIN)
            .unwrap();
        let add = host
            .create_node(g, &CapabilityId::new("MathAdd"), Position::ORIGIN)
            .unwrap();
        let cube = host
            .create_node(g, &CapabilityId::new("MeshCube"), Position::ORIGIN)
            .unwrap();

        host.connect(g, &PortRef::new(gin, "Scale"), &PortRef::new(add, "A"))
            .unwrap();
        host.connect(g, &PortRef::new(cube, "Mesh"), &PortRef::new(gout, "Geometry"))
            .unwrap();
        assert_eq!(host.link_count(g), 2);

        // The mirror is direction-aware: no output socket "Scale" exists on
        // the group output node.
        let err = host
            .connect(g, &PortRef::new(gin, "Scale"), &PortRef::new(gout, "Scale"))
            .unwrap_err();
        assert!(matches!(err, HostError::MissingSocket { .. }));
    }

    #[test]
    fn clear_nodes_keeps_interface_and_drops_links() {
        let mut host = math_host();
        let g = host.create_graph("G").unwrap();
        host.create_interface_socket(g, "Scale", SocketDirection::Input, SocketType::Float, "scale")
            .unwrap();
        let add = CapabilityId::new("MathAdd");
        let a = host.create_node(g, &add, Position::ORIGIN).unwrap();
        let b = host.create_node(g, &add, Position::ORIGIN).unwrap();
        host.connect(g, &PortRef::new(a, "Value"), &PortRef::new(b, "A"))
            .unwrap();

        assert_eq!(host.clear_nodes(g).unwrap(), 2);
        assert_eq!(host.node_count(g).unwrap(), 0);
        assert_eq!(host.link_count(g), 0);
        assert_eq!(host.interface(g).len(), 1);
    }

    #[test]
    fn attr_slots_follow_socket_type() {
        let mut host = math_host();
        let g = host.create_graph("G").unwrap();
        let f = host
            .create_interface_socket(g, "F", SocketDirection::Input, SocketType::Float, "f")
            .unwrap();
        let flag = host
            .create_interface_socket(g, "Flag", SocketDirection::Input, SocketType::Bool, "flag")
            .unwrap();

        assert!(host.socket_has_attr(f, SocketAttr::Min));
        assert!(host.socket_has_attr(flag, SocketAttr::Default));
        assert!(!host.socket_has_attr(flag, SocketAttr::Min));

        let err = host.set_socket_attr(flag, SocketAttr::Min, 0.0).unwrap_err();
        assert_eq!(
            err,
            HostError::AttrNotApplicable {
                attr: SocketAttr::Min,
                ty: SocketType::Bool,
            }
        );
    }

    #[test]
    fn retyping_a_socket_drops_inapplicable_attrs() {
        let mut host = math_host();
        let g = host.create_graph("G").unwrap();
        let s = host
            .create_interface_socket(g, "X", SocketDirection::Input, SocketType::Float, "x")
            .unwrap();
        host.set_socket_attr(s, SocketAttr::Min, -1.0).unwrap();
        host.set_socket_attr(s, SocketAttr::Default, 0.5).unwrap();

        host.update_interface_socket(s, SocketDirection::Input, SocketType::Bool, "x")
            .unwrap();
        assert_eq!(host.socket_attr(s, SocketAttr::Min), None);
        assert_eq!(host.socket_attr(s, SocketAttr::Default), Some(0.5));
    }

    #[test]
    fn rebuilt_nodes_regain_their_paths() {
        let mut host = math_host();
        let g = host.create_graph("G").unwrap();
        let add = CapabilityId::new("MathAdd");

        let a = host.create_node(g, &add, Position::ORIGIN).unwrap();
        let b = host.create_node(g, &add, Position::ORIGIN).unwrap();
        assert_eq!(host.node_name(a), Some("MathAdd"));
        assert_eq!(host.node_name(b), Some("MathAdd.001"));
        let first = host.node_output_path(a, "Value").unwrap();

        host.clear_nodes(g).unwrap();
        let a2 = host.create_node(g, &add, Position::ORIGIN).unwrap();
        assert_ne!(a, a2);
        // Same creation order, same name, same path.
        assert_eq!(host.node_output_path(a2, "Value").unwrap(), first);
    }

    #[test]
    fn modifier_param_keys_are_positional() {
        let mut host = math_host();
        let g = host.create_graph("G").unwrap();
        host.create_interface_socket(g, "Scale", SocketDirection::Input, SocketType::Float, "s")
            .unwrap();
        host.create_interface_socket(g, "Time", SocketDirection::Input, SocketType::Float, "t")
            .unwrap();
        let obj = host.create_object("Plane");
        assert_eq!(host.object_name(obj), Some("Plane"));
        let m = host.create_graph_modifier(obj, "Waves").unwrap();
        host.assign_modifier_graph(m, g).unwrap();

        let path = host.modifier_param_path(m, "Time").unwrap();
        assert_eq!(path.as_str(), "modifiers[\"Waves\"][\"Socket_1\"]");
    }
}
