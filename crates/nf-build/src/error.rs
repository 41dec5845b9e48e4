//! Builder-level error taxonomy.

use nf_core::CapabilityId;
use nf_host::{HostError, SocketType};
use thiserror::Error;

/// Result type for builder operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Failures a build sequence can surface.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    /// The running host version does not register the requested node kind.
    ///
    /// Recoverable: callers are expected to substitute a fallback built from
    /// supported primitives rather than abort the whole build.
    #[error("unsupported node kind: {kind}")]
    UnsupportedNodeKind { kind: CapabilityId },

    /// The host refused to connect two sockets of these declared types.
    #[error("incompatible link: {from} output into {to} input")]
    IncompatibleLink { from: SocketType, to: SocketType },

    /// A socket declaration is malformed. Raised before any host mutation,
    /// since this indicates an authoring error rather than a host-version
    /// mismatch.
    #[error("invalid socket spec '{name}': {reason}")]
    InvalidSocketSpec { name: String, reason: String },

    /// Any other host-level failure, propagated unchanged.
    #[error("host error: {0}")]
    Host(#[from] HostError),
}
