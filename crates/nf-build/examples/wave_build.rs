//! Build an animated waving-circle graph against the in-memory host.
//!
//! Mirrors the classic build sequence: reset the container, declare the
//! interface, lay out capability-checked nodes, wire them, drive the time
//! value, attach to an object. Run it twice and the document is unchanged.

use nf_build::{assembler, driver, modifier, socket, BuildResult, ResetPolicy, SocketSpec};
use nf_core::{CapabilityId, GraphId, ObjectId};
use nf_host::{
    DriverTarget, Host, MemoryHost, NodeKindDef, PortRef, Position, SocketType, GROUP_INPUT_KIND,
    GROUP_OUTPUT_KIND,
};

fn demo_host() -> MemoryHost {
    MemoryHost::with_kinds([
        NodeKindDef::new("ValueSource").output("Value", SocketType::Float),
        NodeKindDef::new("CurveCircle")
            .input("Resolution", SocketType::Int)
            .input("Radius", SocketType::Float)
            .output("Curve", SocketType::Geometry),
        NodeKindDef::new("MathAdd")
            .input("A", SocketType::Float)
            .input("B", SocketType::Float)
            .output("Value", SocketType::Float),
        NodeKindDef::new("MathSine")
            .input("Value", SocketType::Float)
            .output("Value", SocketType::Float),
        NodeKindDef::new("CombineXYZ")
            .input("X", SocketType::Float)
            .input("Y", SocketType::Float)
            .input("Z", SocketType::Float)
            .output("Vector", SocketType::Vector),
        NodeKindDef::new("SetPosition")
            .input("Geometry", SocketType::Geometry)
            .input("Offset", SocketType::Vector)
            .output("Geometry", SocketType::Geometry),
    ])
}

fn build_waving_circle(host: &mut MemoryHost, target: ObjectId) -> BuildResult<GraphId> {
    let graph = assembler::create_or_reset(host, "Waving Circle", ResetPolicy::Reuse)?;

    socket::declare(
        host,
        graph,
        &SocketSpec::input("Scale", SocketType::Float, "Overall scale of the circle")
            .with_default(1.0)
            .with_range(0.0, 10.0),
    )?;
    socket::declare(
        host,
        graph,
        &SocketSpec::output("Geometry", SocketType::Geometry, "The deformed circle"),
    )?;

    let group_in = assembler::instantiate(
        host,
        graph,
        &CapabilityId::new(GROUP_INPUT_KIND),
        Position::new(-1600.0, 0.0),
    )?;
    let group_out = assembler::instantiate(
        host,
        graph,
        &CapabilityId::new(GROUP_OUTPUT_KIND),
        Position::new(800.0, 0.0),
    )?;

    let circle = assembler::instantiate(
        host,
        graph,
        &CapabilityId::new("CurveCircle"),
        Position::new(-1400.0, 200.0),
    )?;
    assembler::set_input(host, circle, "Resolution", 128_i64)?;
    assembler::set_input(host, circle, "Radius", 1.0)?;

    let time = assembler::instantiate(
        host,
        graph,
        &CapabilityId::new("ValueSource"),
        Position::new(-1400.0, -200.0),
    )?;
    assembler::set_label(host, time, "Time (Seconds)")?;
    let time_path = host.node_output_path(time, "Value")?;
    driver::bind_time_expression(host, &DriverTarget::value(time_path), "frame / 24")?;

    let phase = assembler::instantiate(
        host,
        graph,
        &CapabilityId::new("MathAdd"),
        Position::new(-1000.0, -150.0),
    )?;
    let wave = assembler::instantiate(
        host,
        graph,
        &CapabilityId::new("MathSine"),
        Position::new(-800.0, -150.0),
    )?;
    let offset = assembler::instantiate(
        host,
        graph,
        &CapabilityId::new("CombineXYZ"),
        Position::new(-600.0, -100.0),
    )?;
    let deform = assembler::instantiate(
        host,
        graph,
        &CapabilityId::new("SetPosition"),
        Position::new(-400.0, 100.0),
    )?;

    assembler::link(host, graph, &PortRef::new(time, "Value"), &PortRef::new(phase, "A"))?;
    assembler::link(
        host,
        graph,
        &PortRef::new(group_in, "Scale"),
        &PortRef::new(phase, "B"),
    )?;
    assembler::link(host, graph, &PortRef::new(phase, "Value"), &PortRef::new(wave, "Value"))?;
    assembler::link(host, graph, &PortRef::new(wave, "Value"), &PortRef::new(offset, "Z"))?;
    assembler::link(
        host,
        graph,
        &PortRef::new(circle, "Curve"),
        &PortRef::new(deform, "Geometry"),
    )?;
    assembler::link(
        host,
        graph,
        &PortRef::new(offset, "Vector"),
        &PortRef::new(deform, "Offset"),
    )?;
    assembler::link(
        host,
        graph,
        &PortRef::new(deform, "Geometry"),
        &PortRef::new(group_out, "Geometry"),
    )?;

    modifier::attach(host, target, graph, "Waving Circle")?;
    Ok(graph)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut host = demo_host();
    let plane = host.create_object("Plane");

    let graph = build_waving_circle(&mut host, plane)?;
    println!(
        "first build:  {} nodes, {} links, {} interface sockets",
        host.node_count(graph)?,
        host.link_count(graph),
        host.interface(graph).len()
    );

    // Run the whole sequence again; the document must not accumulate.
    let graph = build_waving_circle(&mut host, plane)?;
    println!(
        "second build: {} nodes, {} links, {} modifier(s), {} driver(s)",
        host.node_count(graph)?,
        host.link_count(graph),
        host.modifier_count(plane),
        host.driver_count()
    );

    Ok(())
}
