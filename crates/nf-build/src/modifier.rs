//! Attaching graphs to objects without duplicating modifier instances.

use nf_core::{GraphId, ModifierId, ObjectId};
use nf_host::Host;
use tracing::{debug, trace};

use crate::error::BuildResult;

/// Attach a graph to a target object through its managed modifier.
///
/// Finds the first modifier of the managed kind on the object and reuses it;
/// only if none exists is a new one created with the given name. The graph
/// assignment always overwrites, so the object ends up with exactly one
/// managed modifier pointing at `graph` no matter how many times the build
/// has run.
pub fn attach<H: Host>(
    host: &mut H,
    object: ObjectId,
    graph: GraphId,
    name: &str,
) -> BuildResult<ModifierId> {
    let modifier = match host.find_graph_modifier(object)? {
        Some(existing) => {
            trace!(modifier = %existing, "reusing managed modifier");
            existing
        }
        None => host.create_graph_modifier(object, name)?,
    };
    host.assign_modifier_graph(modifier, graph)?;
    debug!(modifier = name, graph = %graph, "attached graph to object");
    Ok(modifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_host::MemoryHost;

    #[test]
    fn repeated_attach_reuses_the_instance() {
        let mut host = MemoryHost::new();
        let graph_a = host.create_graph("A").unwrap();
        let graph_b = host.create_graph("B").unwrap();
        let object = host.create_object("Plane");

        let first = attach(&mut host, object, graph_a, "Effect").unwrap();
        let second = attach(&mut host, object, graph_b, "Effect").unwrap();

        assert_eq!(first, second);
        assert_eq!(host.graph_modifier_count(object), 1);
        assert_eq!(host.modifier_graph(first), Some(graph_b));
    }

    #[test]
    fn foreign_modifiers_are_skipped_not_reused() {
        let mut host = MemoryHost::new();
        let graph = host.create_graph("A").unwrap();
        let object = host.create_object("Plane");
        host.create_other_modifier(object, "Subdivision");

        let modifier = attach(&mut host, object, graph, "Effect").unwrap();
        assert_eq!(host.modifier_name(modifier), Some("Effect"));
        assert_eq!(host.modifier_count(object), 2);
        assert_eq!(host.graph_modifier_count(object), 1);
    }
}
