#![forbid(unsafe_code)]

//! Layered graph model used by `sirenia`.
//!
//! An [`LGraph`] is an ordered list of layers plus a pool of not-yet-layered nodes. Nodes, ports,
//! edges and labels live in arenas and are addressed by small `Copy` handles, so reparenting a
//! port or detaching an edge endpoint is an index rewrite rather than a pointer juggle.

pub mod error;
pub mod geometry;
pub mod graph;
pub mod ids;
pub mod options;

pub use error::{EdgeEnd, GraphError, Result};
pub use geometry::{Margin, Vector};
pub use graph::{
    Edge, EdgeProperties, LGraph, Label, LabelPieces, Layer, Node, NodeConfig, NodeKind,
    NodeProvenance, Origin, Port, RestoreHook, RestoreNotice,
};
pub use ids::{EdgeId, LabelId, NodeId, PortId};
pub use options::{
    Direction, EdgeLabelPlacement, EdgeLabelSideSelection, EdgeRouting, HorizontalPlacement,
    LabelSide, LayerConstraint, LayoutOptions, NodeLabelPlacement, PortConstraints, PortSide,
    VerticalPlacement,
};
