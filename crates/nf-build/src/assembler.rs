//! Graph container management and capability-checked node construction.

use nf_core::{CapabilityId, GraphId, LinkId, NodeId};
use nf_host::{Host, HostError, PortRef, Position, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{BuildError, BuildResult};
use crate::probe;

/// What `create_or_reset` does when a graph with the requested name already
/// exists.
///
/// This is a caller decision, not a hidden default: the two policies differ
/// observably (handle stability, name uniquification) and neither is right
/// for every build script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetPolicy {
    /// Reuse the named graph, clearing all of its nodes first. Its interface
    /// declaration and its handle survive.
    Reuse,
    /// Always create a new container; the host uniquifies the name if taken.
    Fresh,
}

/// Return a graph with the given name whose node collection is empty.
///
/// Under [`ResetPolicy::Reuse`], repeated builds converge on one container:
/// result state is independent of how many times the build has run before.
pub fn create_or_reset<H: Host>(
    host: &mut H,
    name: &str,
    policy: ResetPolicy,
) -> BuildResult<GraphId> {
    if policy == ResetPolicy::Reuse {
        if let Some(graph) = host.find_graph(name) {
            let removed = host.clear_nodes(graph)?;
            debug!(graph = name, removed, "reusing graph, cleared nodes");
            return Ok(graph);
        }
    }
    let graph = host.create_graph(name)?;
    debug!(graph = name, "created graph");
    Ok(graph)
}

/// Instantiate a node of the given kind, gated on a capability probe.
///
/// An unsupported kind fails with [`BuildError::UnsupportedNodeKind`] before
/// any host mutation: the graph is left exactly as it was, and the caller
/// can substitute a fallback construction.
pub fn instantiate<H: Host>(
    host: &mut H,
    graph: GraphId,
    kind: &CapabilityId,
    position: Position,
) -> BuildResult<NodeId> {
    probe::require(host, kind)?;
    let node = host.create_node(graph, kind, position)?;
    trace!(%kind, node = %node, "instantiated node");
    Ok(node)
}

/// Connect a node output to a node input.
///
/// Type compatibility is the host's judgment; its refusal surfaces as
/// [`BuildError::IncompatibleLink`] and is not auto-corrected.
pub fn link<H: Host>(
    host: &mut H,
    graph: GraphId,
    from: &PortRef,
    to: &PortRef,
) -> BuildResult<LinkId> {
    match host.connect(graph, from, to) {
        Ok(id) => Ok(id),
        Err(HostError::LinkRejected { from, to }) => {
            Err(BuildError::IncompatibleLink { from, to })
        }
        Err(err) => Err(err.into()),
    }
}

/// Assign a constant to an unconnected node input.
pub fn set_input<H: Host>(
    host: &mut H,
    node: NodeId,
    input: &str,
    value: impl Into<Value>,
) -> BuildResult<()> {
    host.set_input_default(node, input, value.into())?;
    Ok(())
}

/// Set a node's human-readable label.
pub fn set_label<H: Host>(host: &mut H, node: NodeId, label: &str) -> BuildResult<()> {
    host.set_node_label(node, label)?;
    Ok(())
}
