//! Capability probing.
//!
//! The leaf of the builder layer: every construction attempt the host cannot
//! validate structurally goes through a probe first, turning a would-be
//! host-fatal call into a typed, recoverable refusal.

use nf_core::CapabilityId;
use nf_host::Host;

use crate::error::{BuildError, BuildResult};

/// Does the running host support the named construct?
///
/// Never fails and has no side effects; an unrecognized identifier yields
/// `false`. Safe to call at arbitrary frequency; the answer is constant for
/// the lifetime of the host process.
pub fn supports<H: Host>(host: &H, ident: &CapabilityId) -> bool {
    host.supports(ident)
}

/// Gate form of [`supports`]: `Err(UnsupportedNodeKind)` instead of `false`.
pub fn require<H: Host>(host: &H, kind: &CapabilityId) -> BuildResult<()> {
    if host.supports(kind) {
        Ok(())
    } else {
        Err(BuildError::UnsupportedNodeKind { kind: kind.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_host::{MemoryHost, NodeKindDef, SocketType};

    #[test]
    fn unknown_identifier_is_false_not_an_error() {
        let host = MemoryHost::new();
        assert!(!supports(&host, &CapabilityId::new("CurveSpiral")));
    }

    #[test]
    fn require_reports_the_missing_kind() {
        let host = MemoryHost::with_kinds([
            NodeKindDef::new("MathAdd").output("Value", SocketType::Float)
        ]);
        assert!(require(&host, &CapabilityId::new("MathAdd")).is_ok());

        let err = require(&host, &CapabilityId::new("MathAdd2")).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnsupportedNodeKind {
                kind: CapabilityId::new("MathAdd2"),
            }
        );
    }
}
