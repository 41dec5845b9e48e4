//! Host-level error types.

use nf_core::{GraphId, NodeId};
use thiserror::Error;

use crate::socket::{SocketAttr, SocketType};

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Failure conditions a host implementation can raise.
///
/// Only the conditions the builder layer is specified to interpret get
/// dedicated variants ([`HostError::LinkRejected`],
/// [`HostError::AttrNotApplicable`]); everything else passes through the
/// builder surface unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    /// A handle does not name a live host object.
    #[error("stale {what} handle: {index}")]
    StaleHandle { what: &'static str, index: u32 },

    /// A node kind reached the host without being registered in the running
    /// version. Capability-gated callers never see this.
    #[error("node kind not registered with this host: {kind}")]
    UnknownKind { kind: String },

    /// A named socket does not exist where one was required.
    #[error("no socket named '{socket}' on {what}")]
    MissingSocket { what: &'static str, socket: String },

    /// The host refused to connect two sockets of these types.
    #[error("cannot link {from} output to {to} input")]
    LinkRejected { from: SocketType, to: SocketType },

    /// The socket's type exposes no such attribute in this host version.
    #[error("socket attribute '{attr}' not applicable to {ty} sockets")]
    AttrNotApplicable { attr: SocketAttr, ty: SocketType },

    /// A constant of the wrong type was assigned to a node input.
    #[error("value of type {got} does not fit {expected} input")]
    ValueMismatch { expected: SocketType, got: SocketType },

    /// A link endpoint names a node that lives in a different graph.
    #[error("node {node} is not part of graph {graph}")]
    NodeOutsideGraph { node: NodeId, graph: GraphId },

    /// The host rejected a malformed name.
    #[error("invalid name: {what}")]
    InvalidName { what: String },
}
