use crate::graph::NodeKind;
use crate::ids::{EdgeId, NodeId, PortId};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    Source,
    Target,
}

impl fmt::Display for EdgeEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeEnd::Source => f.write_str("source"),
            EdgeEnd::Target => f.write_str("target"),
        }
    }
}

/// Broken structural contracts. None of these are recoverable: a processor that returns one
/// leaves the graph in an unspecified state and the layout run has to be aborted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("node {node} is not assigned to a layer")]
    NotLayered { node: NodeId },
    #[error("layer {index} does not exist (graph has {count} layers)")]
    MissingLayer { index: usize, count: usize },
    #[error(
        "{kind:?} node {node} must have exactly one west and one east port (found {west} west, {east} east)"
    )]
    UnexpectedPortCount {
        node: NodeId,
        kind: NodeKind,
        west: usize,
        east: usize,
    },
    #[error("dummy {node} has {incoming} incoming but {outgoing} outgoing edges")]
    MismatchedEdgeLists {
        node: NodeId,
        incoming: usize,
        outgoing: usize,
    },
    #[error("edge {edge} has no {end}")]
    DetachedEdge { edge: EdgeId, end: EdgeEnd },
    #[error("port {port} has no owning node")]
    DetachedPort { port: PortId },
    #[error("edge {edge} is not registered at port {port}")]
    EdgeNotInPort { edge: EdgeId, port: PortId },
    #[error("cannot insert edge {edge} at index {index} of port {port} ({len} incoming edges)")]
    InvalidInsertIndex {
        edge: EdgeId,
        port: PortId,
        index: usize,
        len: usize,
    },
    #[error("edge {edge} runs from layer {source_layer} back to layer {target_layer}")]
    BackwardEdge {
        edge: EdgeId,
        source_layer: usize,
        target_layer: usize,
    },
    #[error("{kind:?} node {node} does not record the edge it was created for")]
    MissingOrigin { node: NodeId, kind: NodeKind },
    #[error("big node chain starting at {start} visits {node} twice")]
    CyclicChain { start: NodeId, node: NodeId },
}

pub type Result<T> = std::result::Result<T, GraphError>;
