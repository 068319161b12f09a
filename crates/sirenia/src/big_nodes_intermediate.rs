//! Close layer gaps inside big node chains.
//!
//! Layering may leave empty layers between two slices of the same big node. Slices have to sit
//! in consecutive layers to be glued back together, so gaps are closed by moving slices:
//! towards the initial node by default, towards the last slice if the node is constrained to
//! the last layer.

use crate::Result;
use crate::lgraph::{EdgeId, LGraph, LayerConstraint, NodeId};
use crate::util::{self, BigNodeChain};
use tracing::{debug, debug_span, trace};

pub fn run(g: &mut LGraph) -> Result<()> {
    let _span = debug_span!("big_nodes_intermediate").entered();

    let mut moved = 0usize;
    for initial in util::big_node_initials(g) {
        let chain = util::big_node_chain(g, initial)?;
        if chain.nodes.len() < 2 {
            continue;
        }

        let constraint = g[initial].config.layer_constraint;
        if matches!(
            constraint,
            LayerConstraint::Last | LayerConstraint::LastSeparate
        ) {
            let last = chain.last();
            g[last].config.layer_constraint = constraint;
            g[initial].config.layer_constraint = LayerConstraint::None;
            moved += condense_right(g, &chain)?;
        }
        moved += condense_left(g, &chain)?;
    }

    debug!(moved, "big node slices moved");
    Ok(())
}

/// Pulls every slice to the layer right after its predecessor.
pub fn condense_left(g: &mut LGraph, chain: &BigNodeChain) -> Result<usize> {
    let mut moved = 0;
    for pair in chain.nodes.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let current_layer = g.layer_of(current)?;
        let next_layer = g.layer_of(next)?;
        if next_layer > current_layer + 1 {
            g.set_layer(next, Some(current_layer + 1))?;
            trace!(node = %next, from = next_layer, to = current_layer + 1, "condense left");
            moved += 1;
        }
    }
    Ok(moved)
}

/// Pushes every slice to the layer right before its successor, walking back from the last slice.
/// A slice never moves past the layer of anything else it has an edge to, and never moves left.
pub fn condense_right(g: &mut LGraph, chain: &BigNodeChain) -> Result<usize> {
    let mut moved = 0;
    for i in (0..chain.nodes.len() - 1).rev() {
        let node = chain.nodes[i];
        let successor = chain.nodes[i + 1];
        let layer = g.layer_of(node)?;
        let successor_layer = g.layer_of(successor)?;
        if successor_layer <= layer + 1 {
            continue;
        }

        let mut target = successor_layer - 1;
        if let Some(bound) = nearest_foreign_successor(g, node, chain.links[i])? {
            target = target.min(bound.saturating_sub(1));
        }
        if target > layer {
            g.set_layer(node, Some(target))?;
            trace!(%node, from = layer, to = target, "condense right");
            moved += 1;
        }
    }
    Ok(moved)
}

fn nearest_foreign_successor(g: &LGraph, node: NodeId, link: EdgeId) -> Result<Option<usize>> {
    let mut nearest: Option<usize> = None;
    for edge in g.outgoing_edges(node) {
        if edge == link {
            continue;
        }
        let layer = g.layer_of(g.target_node(edge)?)?;
        nearest = Some(nearest.map_or(layer, |n| n.min(layer)));
    }
    Ok(nearest)
}
