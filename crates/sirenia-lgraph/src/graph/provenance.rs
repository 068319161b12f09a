//! Typed configuration and provenance carried by nodes and edges.
//!
//! Dummy nodes remember what they stand for exclusively through these fields, so every
//! processor that creates, merges or removes dummies has to keep them consistent.

use crate::geometry::Vector;
use crate::ids::{EdgeId, LabelId, NodeId, PortId};
use crate::options::{LabelSide, LayerConstraint, NodeLabelPlacement, PortConstraints};

/// The element a graph element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// An internal edge; used by long-edge and label dummies for the edge they split.
    Edge(EdgeId),
    /// An element of the caller's graph model, identified by an opaque key.
    External(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeConfig {
    pub port_constraints: PortConstraints,
    pub layer_constraint: LayerConstraint,
    pub label_placement: Option<NodeLabelPlacement>,
}

/// Caller-supplied marker attached to a big node; consumed once the node has been restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RestoreHook {
    pub token: u64,
}

/// Emitted for every consumed [`RestoreHook`], after the node got its final geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestoreNotice {
    pub node: NodeId,
    pub token: u64,
    pub size: Vector,
}

/// A big node label that was cut into one piece per slice.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPieces {
    pub label: LabelId,
    /// Pieces in slice order, left to right.
    pub pieces: Vec<LabelId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeProvenance {
    pub origin: Option<Origin>,
    /// First port of the original long edge.
    pub long_edge_source: Option<PortId>,
    /// Last port of the original long edge.
    pub long_edge_target: Option<PortId>,
    pub long_edge_has_label_dummies: bool,
    /// Set on long-edge dummies that precede their chain's label dummy.
    pub long_edge_before_label_dummy: bool,
    pub big_node_initial: bool,
    /// True width of a big node, stored on its initial slice.
    pub big_node_original_size: Option<f64>,
    pub big_node_original_labels: Option<Vec<LabelId>>,
    pub big_node_label_pieces: Vec<LabelPieces>,
    /// Center labels a label dummy reserves space for, in edge order.
    pub represented_labels: Vec<LabelId>,
    pub label_side: LabelSide,
    pub on_restored: Option<RestoreHook>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeProperties {
    pub origin: Option<Origin>,
    pub(crate) thickness: f64,
    pub junction_points: Option<Vec<Vector>>,
    pub reversed: bool,
}

impl EdgeProperties {
    pub fn new(thickness: f64) -> Self {
        Self {
            origin: None,
            thickness,
            junction_points: None,
            reversed: false,
        }
    }

    /// Raw thickness as stored; may be negative until read through
    /// [`LGraph::edge_thickness`](crate::LGraph::edge_thickness).
    pub fn raw_thickness(&self) -> f64 {
        self.thickness
    }

    pub fn set_thickness(&mut self, thickness: f64) {
        self.thickness = thickness;
    }
}

impl Default for EdgeProperties {
    fn default() -> Self {
        Self::new(1.0)
    }
}
