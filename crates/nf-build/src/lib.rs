//! nf-build: capability-gated construction layer for node-graph hosts.
//!
//! Provides:
//! - Capability probing (`probe`): membership-test a host construct before
//!   using it
//! - Interface declaration (`socket`): validated, upserting socket specs
//! - Graph assembly (`assembler`): create-or-reset containers,
//!   capability-checked node instantiation, links
//! - Driver binding (`driver`): remove-before-add time expressions
//! - Modifier binding (`modifier`): find-or-create graph attachment
//!
//! Every operation takes its host and handles as explicit arguments; there
//! is no ambient "current object" or "current graph". All mutations are
//! idempotent upserts, so running the same build twice leaves the document
//! in the same state as running it once.
//!
//! # Example
//!
//! ```
//! use nf_build::{assembler, modifier, socket, ResetPolicy, SocketSpec};
//! use nf_core::CapabilityId;
//! use nf_host::{MemoryHost, NodeKindDef, PortRef, Position, SocketType, GROUP_OUTPUT_KIND};
//!
//! let mut host = MemoryHost::with_kinds([
//!     NodeKindDef::new("MeshCube").output("Mesh", SocketType::Geometry),
//! ]);
//!
//! let graph = assembler::create_or_reset(&mut host, "Cubes", ResetPolicy::Reuse).unwrap();
//! socket::declare(
//!     &mut host,
//!     graph,
//!     &SocketSpec::output("Geometry", SocketType::Geometry, "Final geometry"),
//! )
//! .unwrap();
//!
//! let cube = assembler::instantiate(
//!     &mut host,
//!     graph,
//!     &CapabilityId::new("MeshCube"),
//!     Position::ORIGIN,
//! )
//! .unwrap();
//! let out = assembler::instantiate(
//!     &mut host,
//!     graph,
//!     &CapabilityId::new(GROUP_OUTPUT_KIND),
//!     Position::new(200.0, 0.0),
//! )
//! .unwrap();
//! assembler::link(
//!     &mut host,
//!     graph,
//!     &PortRef::new(cube, "Mesh"),
//!     &PortRef::new(out, "Geometry"),
//! )
//! .unwrap();
//!
//! let plane = host.create_object("Plane");
//! modifier::attach(&mut host, plane, graph, "Cubes").unwrap();
//! ```

pub mod assembler;
pub mod driver;
pub mod error;
pub mod modifier;
pub mod probe;
pub mod socket;

// Re-exports for ergonomics
pub use assembler::ResetPolicy;
pub use error::{BuildError, BuildResult};
pub use socket::SocketSpec;
