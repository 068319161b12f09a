//! Merge long-edge dummies that belong to the same hyperedge.
//!
//! Once node order is fixed, two long-edge dummies that sit next to each other in a layer and
//! stand for edges of one hyperedge can share a single dummy. This saves space and lets the
//! router draw the edges as a bundle.

use crate::Result;
use crate::lgraph::{LGraph, NodeId, NodeKind, PortId};
use crate::util;
use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, trace};

pub fn run(g: &mut LGraph) -> Result<()> {
    let _span = debug_span!("hyperedge_dummy_merger").entered();

    let components = identify_hyperedges(g);

    let mut merged = 0usize;
    for layer in 0..g.layer_count() {
        // A merge removes `curr`, so the new neighbor is tested against the survivor again.
        let mut i = 1;
        while i < g.layer_nodes(layer).len() {
            let nodes = g.layer_nodes(layer);
            let (last, curr) = (nodes[i - 1], nodes[i]);
            if g[last].kind == NodeKind::LongEdge
                && g[curr].kind == NodeKind::LongEdge
                && can_merge(g, &components, last, curr)
            {
                merge_into(g, last, curr)?;
                trace!(survivor = %last, absorbed = %curr, layer, "merged dummies");
                merged += 1;
            } else {
                i += 1;
            }
        }
    }

    debug!(merged, "hyperedge dummies merged");
    Ok(())
}

/// Assigns every port of a layered node the id of its hyperedge: ports connected by an edge or
/// sitting on the same long-edge dummy share an id.
pub fn identify_hyperedges(g: &LGraph) -> FxHashMap<PortId, usize> {
    let mut ids: FxHashMap<PortId, usize> = FxHashMap::default();
    let mut next_id = 0;
    let mut stack: Vec<PortId> = Vec::new();

    for node in g.layered_nodes() {
        for &start in g[node].ports() {
            if ids.contains_key(&start) {
                continue;
            }
            stack.push(start);
            while let Some(port) = stack.pop() {
                if ids.contains_key(&port) {
                    continue;
                }
                ids.insert(port, next_id);

                let mut neighbors: Vec<PortId> = Vec::new();
                if let Some(owner) = g[port].node() {
                    if g[owner].kind == NodeKind::LongEdge {
                        neighbors.extend(g[owner].ports().iter().copied().filter(|&p| p != port));
                    }
                }
                neighbors.extend(g.connected_ports(port));
                // Reversed so the first neighbor is visited first.
                stack.extend(
                    neighbors
                        .into_iter()
                        .rev()
                        .filter(|p| !ids.contains_key(p)),
                );
            }
            next_id += 1;
        }
    }
    ids
}

fn hyperedge_of(g: &LGraph, components: &FxHashMap<PortId, usize>, node: NodeId) -> Option<usize> {
    g[node]
        .ports()
        .first()
        .and_then(|p| components.get(p))
        .copied()
}

/// Decides whether `curr` may be merged into its left neighbor `last`.
///
/// Chains without label dummies merge when they belong to the same hyperedge. As soon as one of
/// them runs through a label dummy, they must share a source and both lie before their label
/// dummy, or share a target and both lie after it. Which label dummy that is does not matter.
pub fn can_merge(
    g: &LGraph,
    components: &FxHashMap<PortId, usize>,
    last: NodeId,
    curr: NodeId,
) -> bool {
    let l = &g[last].provenance;
    let c = &g[curr].provenance;

    let same_source = l.long_edge_source.is_some() && l.long_edge_source == c.long_edge_source;
    let same_target = l.long_edge_target.is_some() && l.long_edge_target == c.long_edge_target;

    let last_labels = l.long_edge_has_label_dummies;
    let curr_labels = c.long_edge_has_label_dummies;

    if !last_labels && !curr_labels {
        let last_id = hyperedge_of(g, components, last);
        return last_id.is_some() && last_id == hyperedge_of(g, components, curr);
    }

    let before = |has: bool, before: bool| !has || before;
    let after = |has: bool, before: bool| !has || !before;

    let by_source = same_source
        && before(last_labels, l.long_edge_before_label_dummy)
        && before(curr_labels, c.long_edge_before_label_dummy);
    let by_target = same_target
        && after(last_labels, l.long_edge_before_label_dummy)
        && after(curr_labels, c.long_edge_before_label_dummy);
    by_source || by_target
}

/// Moves every edge of `absorbed` onto `survivor` (incoming to its west port, outgoing to its
/// east port), clears provenance the two disagreed on and deletes `absorbed`.
pub fn merge_into(g: &mut LGraph, survivor: NodeId, absorbed: NodeId) -> Result<()> {
    let (west, east) = util::west_east_ports(g, survivor)?;

    for edge in g.incoming_edges(absorbed) {
        g.set_target(edge, Some(west));
    }
    for edge in g.outgoing_edges(absorbed) {
        g.set_source(edge, Some(east));
    }

    let absorbed_source = g[absorbed].provenance.long_edge_source;
    let absorbed_target = g[absorbed].provenance.long_edge_target;
    let p = &mut g[survivor].provenance;
    if p.long_edge_source != absorbed_source {
        p.long_edge_source = None;
    }
    if p.long_edge_target != absorbed_target {
        p.long_edge_target = None;
    }

    g.remove_node(absorbed);
    Ok(())
}
