//! Interface socket declaration.

use nf_core::{GraphId, SocketId};
use nf_host::{Host, HostError, SocketAttr, SocketDirection, SocketType};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{BuildError, BuildResult};

/// Declarative description of one interface socket.
///
/// Unlike the raw host call, the description is mandatory: omitting it is a
/// common and otherwise silent quality defect in generated build scripts, so
/// the declarator refuses to proceed without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketSpec {
    /// Socket name, unique within a graph's interface.
    pub name: String,
    pub direction: SocketDirection,
    pub ty: SocketType,
    /// Human-readable description. Must be non-empty.
    pub description: String,
    /// Default value when unconnected. Applied only if the socket's type
    /// exposes the attribute in the running host version.
    pub default: Option<f64>,
    /// Lower bound. Applied opportunistically, like `default`.
    pub min: Option<f64>,
    /// Upper bound. Applied opportunistically, like `default`.
    pub max: Option<f64>,
}

impl SocketSpec {
    pub fn new(
        name: impl Into<String>,
        direction: SocketDirection,
        ty: SocketType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            direction,
            ty,
            description: description.into(),
            default: None,
            min: None,
            max: None,
        }
    }

    /// Shorthand for an input socket.
    pub fn input(name: impl Into<String>, ty: SocketType, description: impl Into<String>) -> Self {
        Self::new(name, SocketDirection::Input, ty, description)
    }

    /// Shorthand for an output socket.
    pub fn output(name: impl Into<String>, ty: SocketType, description: impl Into<String>) -> Self {
        Self::new(name, SocketDirection::Output, ty, description)
    }

    pub fn with_default(mut self, value: f64) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    fn invalid(&self, reason: &str) -> BuildError {
        BuildError::InvalidSocketSpec {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }

    /// Check the declaration's own invariants. Host state is not consulted.
    fn validate(&self) -> BuildResult<()> {
        if self.description.trim().is_empty() {
            return Err(self.invalid("description must not be empty"));
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(self.invalid("min exceeds max"));
            }
        }
        if let (Some(min), Some(default)) = (self.min, self.default) {
            if default < min {
                return Err(self.invalid("default below min"));
            }
        }
        if let (Some(max), Some(default)) = (self.max, self.default) {
            if default > max {
                return Err(self.invalid("default above max"));
            }
        }
        Ok(())
    }
}

/// Declare an interface socket on a graph.
///
/// Upserts by name: declaring under an existing name updates that socket in
/// place instead of duplicating it, so repeated builds converge on one
/// interface. Numeric attributes are applied only where the resulting
/// socket's type exposes them; an attribute the host rejects as
/// type-incompatible is skipped without failing the declaration, since
/// attribute availability varies by declared type and host version.
pub fn declare<H: Host>(host: &mut H, graph: GraphId, spec: &SocketSpec) -> BuildResult<SocketId> {
    spec.validate()?;

    let socket = match host.find_interface_socket(graph, &spec.name)? {
        Some(existing) => {
            host.update_interface_socket(existing, spec.direction, spec.ty, &spec.description)?;
            trace!(socket = %spec.name, "updated existing interface socket");
            existing
        }
        None => host.create_interface_socket(
            graph,
            &spec.name,
            spec.direction,
            spec.ty,
            &spec.description,
        )?,
    };

    let assignments = [
        (SocketAttr::Default, spec.default),
        (SocketAttr::Min, spec.min),
        (SocketAttr::Max, spec.max),
    ];
    for (attr, value) in assignments {
        let Some(value) = value else { continue };
        if !host.socket_has_attr(socket, attr) {
            trace!(socket = %spec.name, %attr, "attribute slot absent, skipped");
            continue;
        }
        match host.set_socket_attr(socket, attr, value) {
            Ok(()) => {}
            Err(HostError::AttrNotApplicable { .. }) => {
                trace!(socket = %spec.name, %attr, "host rejected attribute, skipped");
            }
            Err(err) => return Err(err.into()),
        }
    }

    debug!(socket = %spec.name, direction = %spec.direction, "declared interface socket");
    Ok(socket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_host::MemoryHost;

    fn host_and_graph() -> (MemoryHost, GraphId) {
        let mut host = MemoryHost::new();
        let graph = host.create_graph("G").unwrap();
        (host, graph)
    }

    #[test]
    fn declare_reflects_name_and_direction() {
        let (mut host, graph) = host_and_graph();
        let spec = SocketSpec::input("Time", SocketType::Float, "Animation time")
            .with_default(0.0)
            .with_range(0.0, 1.0);
        let socket = declare(&mut host, graph, &spec).unwrap();

        assert_eq!(host.socket_name(socket), Some("Time"));
        assert_eq!(host.socket_direction(socket), Some(SocketDirection::Input));
        assert_eq!(host.socket_attr(socket, SocketAttr::Default), Some(0.0));
        assert_eq!(host.socket_attr(socket, SocketAttr::Max), Some(1.0));
    }

    #[test]
    fn empty_description_fails_before_any_host_call() {
        let (mut host, graph) = host_and_graph();
        let spec = SocketSpec::input("Time", SocketType::Float, "   ");
        let err = declare(&mut host, graph, &spec).unwrap_err();
        assert!(matches!(err, BuildError::InvalidSocketSpec { .. }));
        assert!(host.interface(graph).is_empty());
    }

    #[test]
    fn inverted_range_fails_before_any_host_call() {
        let (mut host, graph) = host_and_graph();
        let spec = SocketSpec::input("Scale", SocketType::Float, "Scale factor")
            .with_default(1.0)
            .with_range(2.0, 1.0);
        let err = declare(&mut host, graph, &spec).unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidSocketSpec {
                name: "Scale".to_string(),
                reason: "min exceeds max".to_string(),
            }
        );
        assert!(host.interface(graph).is_empty());
    }

    #[test]
    fn default_outside_range_is_rejected() {
        let (mut host, graph) = host_and_graph();
        let spec = SocketSpec::input("Scale", SocketType::Float, "Scale factor")
            .with_default(5.0)
            .with_range(0.0, 1.0);
        assert!(matches!(
            declare(&mut host, graph, &spec).unwrap_err(),
            BuildError::InvalidSocketSpec { .. }
        ));
    }

    #[test]
    fn redeclaration_updates_instead_of_duplicating() {
        let (mut host, graph) = host_and_graph();
        let first = declare(
            &mut host,
            graph,
            &SocketSpec::input("Scale", SocketType::Float, "Scale factor"),
        )
        .unwrap();
        let second = declare(
            &mut host,
            graph,
            &SocketSpec::input("Scale", SocketType::Int, "Instance count"),
        )
        .unwrap();

        assert_eq!(first, second);
        assert_eq!(host.interface(graph).len(), 1);
        assert_eq!(host.socket_type(first), Some(SocketType::Int));
        assert_eq!(host.socket_description(first), Some("Instance count"));
    }

    #[test]
    fn inapplicable_attrs_are_skipped_not_fatal() {
        let (mut host, graph) = host_and_graph();
        // Geometry sockets expose no numeric slots at all; the declaration
        // must still succeed.
        let spec = SocketSpec::output("Geometry", SocketType::Geometry, "Final geometry")
            .with_default(0.0)
            .with_range(0.0, 1.0);
        let socket = declare(&mut host, graph, &spec).unwrap();
        assert_eq!(host.socket_attr(socket, SocketAttr::Default), None);

        // Bool sockets take a default but no range.
        let spec = SocketSpec::input("Enabled", SocketType::Bool, "Toggle the effect")
            .with_default(1.0)
            .with_range(0.0, 1.0);
        let socket = declare(&mut host, graph, &spec).unwrap();
        assert_eq!(host.socket_attr(socket, SocketAttr::Default), Some(1.0));
        assert_eq!(host.socket_attr(socket, SocketAttr::Min), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use nf_host::MemoryHost;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ordered_numeric_specs_always_declare(
            min in -1000.0_f64..1000.0,
            spread_a in 0.0_f64..100.0,
            spread_b in 0.0_f64..100.0,
        ) {
            let default = min + spread_a;
            let max = default + spread_b;
            let mut host = MemoryHost::new();
            let graph = host.create_graph("G").unwrap();
            let spec = SocketSpec::input("X", SocketType::Float, "A value")
                .with_default(default)
                .with_range(min, max);

            let socket = declare(&mut host, graph, &spec).unwrap();
            prop_assert_eq!(host.socket_attr(socket, SocketAttr::Default), Some(default));
            prop_assert_eq!(host.socket_attr(socket, SocketAttr::Min), Some(min));
            prop_assert_eq!(host.socket_attr(socket, SocketAttr::Max), Some(max));
        }

        #[test]
        fn inverted_ranges_never_reach_the_host(
            min in 0.0_f64..1000.0,
            gap in 0.001_f64..100.0,
        ) {
            let max = min - gap;
            let mut host = MemoryHost::new();
            let graph = host.create_graph("G").unwrap();
            let spec = SocketSpec::input("X", SocketType::Float, "A value")
                .with_range(min, max);

            prop_assert!(declare(&mut host, graph, &spec).is_err());
            prop_assert!(host.interface(graph).is_empty());
        }
    }
}
