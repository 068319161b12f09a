//! Helpers shared by several processors.

use crate::lgraph::{self, EdgeId, GraphError, LGraph, NodeId, NodeKind, Origin, PortId, PortSide};
use rustc_hash::FxHashSet;

/// The single west (input) and east (output) port of a dummy node.
///
/// Long-edge and label dummies are created with exactly these two ports; anything else means an
/// earlier processor broke the dummy.
pub fn west_east_ports(g: &LGraph, node: NodeId) -> lgraph::Result<(PortId, PortId)> {
    let west = g.ports_on_side(node, PortSide::West);
    let east = g.ports_on_side(node, PortSide::East);
    match (west.as_slice(), east.as_slice()) {
        ([w], [e]) => Ok((*w, *e)),
        _ => Err(GraphError::UnexpectedPortCount {
            node,
            kind: g[node].kind,
            west: west.len(),
            east: east.len(),
        }),
    }
}

/// The edge a long-edge or label dummy was created for.
pub fn origin_edge(g: &LGraph, node: NodeId) -> lgraph::Result<EdgeId> {
    match g[node].provenance.origin {
        Some(Origin::Edge(edge)) if g.try_edge(edge).is_some() => Ok(edge),
        _ => Err(GraphError::MissingOrigin {
            node,
            kind: g[node].kind,
        }),
    }
}

/// Next slice of a big node chain: the target of the first outgoing edge that is not reversed
/// and enters a big node dummy through a west port.
pub fn next_big_node_link(g: &LGraph, node: NodeId) -> lgraph::Result<Option<(EdgeId, NodeId)>> {
    for edge in g.outgoing_edges(node) {
        if g[edge].props.reversed {
            continue;
        }
        let target = g.target_port(edge)?;
        if g[target].side != PortSide::West {
            continue;
        }
        let next = g.port_node(target)?;
        if g[next].kind == NodeKind::BigNode {
            return Ok(Some((edge, next)));
        }
    }
    Ok(None)
}

/// A big node chain in walking order, starting at its initial node.
#[derive(Debug, Clone, PartialEq)]
pub struct BigNodeChain {
    pub nodes: Vec<NodeId>,
    /// `links[i]` connects `nodes[i]` and `nodes[i + 1]`.
    pub links: Vec<EdgeId>,
}

impl BigNodeChain {
    pub fn last(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }
}

pub fn big_node_chain(g: &LGraph, start: NodeId) -> lgraph::Result<BigNodeChain> {
    let mut chain = BigNodeChain {
        nodes: vec![start],
        links: Vec::new(),
    };
    let mut seen: FxHashSet<NodeId> = FxHashSet::default();
    seen.insert(start);

    let mut current = start;
    while let Some((link, next)) = next_big_node_link(g, current)? {
        if !seen.insert(next) {
            return Err(GraphError::CyclicChain { start, node: next });
        }
        chain.nodes.push(next);
        chain.links.push(link);
        current = next;
    }
    Ok(chain)
}

/// Initial slices of all big nodes, in layer order.
pub fn big_node_initials(g: &LGraph) -> Vec<NodeId> {
    g.layered_nodes()
        .into_iter()
        .filter(|&n| g[n].provenance.big_node_initial)
        .collect()
}
