//! Arena entries for [`LGraph`](super::LGraph).
//!
//! Structural links (a node's ports, a port's owner and edge lists, an edge's endpoints, layer
//! membership) are only writable through `LGraph` so both sides of every link stay in sync.
//! Everything else is plain data.

use super::provenance::{EdgeProperties, NodeConfig, NodeProvenance, Origin};
use crate::geometry::{Margin, Vector};
use crate::ids::{EdgeId, LabelId, NodeId, PortId};
use crate::options::{EdgeLabelPlacement, LabelSide, PortSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    #[default]
    Normal,
    /// Placeholder for a long edge in one intermediate layer.
    LongEdge,
    /// Reserves room for the center labels of an edge.
    Label,
    /// One slice of a node that is too wide for a single layer.
    BigNode,
    ExternalPort,
    NorthSouthPort,
}

impl NodeKind {
    pub fn is_dummy(self) -> bool {
        !matches!(self, NodeKind::Normal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Placement {
    #[default]
    Detached,
    Layerless,
    Layer(usize),
}

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub kind: NodeKind,
    pub size: Vector,
    pub position: Vector,
    pub margin: Margin,
    pub labels: Vec<LabelId>,
    pub config: NodeConfig,
    pub provenance: NodeProvenance,
    pub(crate) ports: Vec<PortId>,
    pub(crate) placement: Placement,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn ports(&self) -> &[PortId] {
        &self.ports
    }

    /// Index of the layer the node belongs to, if any.
    pub fn layer(&self) -> Option<usize> {
        match self.placement {
            Placement::Layer(i) => Some(i),
            Placement::Detached | Placement::Layerless => None,
        }
    }

    pub fn is_layerless(&self) -> bool {
        self.placement == Placement::Layerless
    }
}

#[derive(Debug, Clone, Default)]
pub struct Port {
    pub side: PortSide,
    /// Position relative to the owning node's upper left corner.
    pub position: Vector,
    pub size: Vector,
    /// Attachment point of edges, relative to the port's position.
    pub anchor: Vector,
    pub labels: Vec<LabelId>,
    pub origin: Option<Origin>,
    pub(crate) node: Option<NodeId>,
    pub(crate) incoming: Vec<EdgeId>,
    pub(crate) outgoing: Vec<EdgeId>,
}

impl Port {
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    pub fn degree(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Edge {
    pub bend_points: Vec<Vector>,
    pub labels: Vec<LabelId>,
    pub props: EdgeProperties,
    pub(crate) source: Option<PortId>,
    pub(crate) target: Option<PortId>,
}

impl Edge {
    pub fn source(&self) -> Option<PortId> {
        self.source
    }

    pub fn target(&self) -> Option<PortId> {
        self.target
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    pub text: String,
    pub size: Vector,
    pub position: Vector,
    pub placement: EdgeLabelPlacement,
    pub side: LabelSide,
    pub origin: Option<Origin>,
}

impl Label {
    pub fn new(text: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            size: Vector::new(width, height),
            ..Default::default()
        }
    }

    pub fn with_placement(mut self, placement: EdgeLabelPlacement) -> Self {
        self.placement = placement;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub(crate) nodes: Vec<NodeId>,
}

impl Layer {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
