//! Glue big node slices back into one node.
//!
//! Runs after edge routing, once every slice has its final position. The initial node gets its
//! true width back, takes over the ports and labels the other slices carried, and all other
//! slices are deleted together with the edges linking them.

use crate::Result;
use crate::lgraph::{
    HorizontalPlacement, LGraph, LabelId, LabelPieces, PortId, PortSide, RestoreNotice, Vector,
};
use crate::util::{self, BigNodeChain};
use rustc_hash::FxHashSet;
use tracing::{debug, debug_span, trace};

pub fn run(g: &mut LGraph) -> Result<()> {
    let _span = debug_span!("big_nodes_postprocessor").entered();

    let initials = util::big_node_initials(g);
    for &initial in &initials {
        let chain = util::big_node_chain(g, initial)?;
        restore(g, &chain);
    }

    debug!(restored = initials.len(), "big nodes restored");
    Ok(())
}

fn restore(g: &mut LGraph, chain: &BigNodeChain) {
    let initial = chain.nodes[0];
    let width = g[initial]
        .provenance
        .big_node_original_size
        .unwrap_or(g[initial].size.x);

    let split = std::mem::take(&mut g[initial].provenance.big_node_label_pieces);
    let mut pieces: FxHashSet<LabelId> = FxHashSet::default();
    for entry in &split {
        place_split_label(g, chain, width, entry);
        pieces.extend(entry.pieces.iter().copied());
    }
    for &slice in &chain.nodes {
        g[slice].labels.retain(|l| !pieces.contains(l));
    }

    if chain.nodes.len() > 1 {
        take_over_slices(g, chain, width);
    }

    for &link in &chain.links {
        if let Some(port) = g[link].source() {
            g.remove_port(port);
        }
    }
    for &slice in &chain.nodes[1..] {
        g.remove_node(slice);
    }

    let node = &mut g[initial];
    node.size.x = width;
    if let Some(labels) = node.provenance.big_node_original_labels.take() {
        node.labels = labels;
    }
    let right = node.position.x + width;
    let hook = node.provenance.on_restored.take();
    let size = node.size;
    if right > g.size.x {
        g.size.x = right;
    }

    trace!(node = %initial, slices = chain.nodes.len(), width, "big node restored");
    if let Some(hook) = hook {
        g.push_restore_notice(RestoreNotice {
            node: initial,
            token: hook.token,
            size,
        });
    }
}

/// Positions a label that was cut into pieces against the restored width, using the positions
/// node label placement gave to its pieces. Labels without a placement keep their position.
fn place_split_label(g: &mut LGraph, chain: &BigNodeChain, width: f64, split: &LabelPieces) {
    let (Some(&first), Some(&last_piece)) = (split.pieces.first(), split.pieces.last()) else {
        return;
    };
    let Some(placement) = g[chain.nodes[0]].config.label_placement else {
        return;
    };

    let label_width = g[split.label].size.x;
    let position = match placement.horizontal {
        HorizontalPlacement::Left => g[first].position,
        HorizontalPlacement::Right => {
            let piece = &g[last_piece];
            let right_offset = g[chain.last()].size.x - (piece.position.x + piece.size.x);
            Vector::new(width - right_offset - label_width, piece.position.y)
        }
        HorizontalPlacement::Center => {
            Vector::new((width - label_width) / 2.0, g[first].position.y)
        }
    };
    g[split.label].position = position;
}

/// Moves every port that does not link two slices to the initial node. East ports of the last
/// slice keep their distance to the right border, all other ports and the labels of the last
/// slice keep their absolute position.
fn take_over_slices(g: &mut LGraph, chain: &BigNodeChain, width: f64) {
    let initial = chain.nodes[0];
    let last = chain.last();
    let link_ports: Vec<PortId> = chain
        .links
        .iter()
        .flat_map(|&e| [g[e].source(), g[e].target()])
        .flatten()
        .collect();

    for &slice in &chain.nodes[1..] {
        let slice_width = g[slice].size.x;
        let shift = g[slice].position.x - g[initial].position.x;
        for port in g[slice].ports().to_vec() {
            if link_ports.contains(&port) {
                continue;
            }
            let x = g[port].position.x;
            g[port].position.x = if slice == last && g[port].side == PortSide::East {
                width - (slice_width - x)
            } else {
                x + shift
            };
            g.set_port_node(port, Some(initial));
        }
    }

    let shift = g[last].position.x - g[initial].position.x;
    let labels = std::mem::take(&mut g[last].labels);
    for &label in &labels {
        g[label].position.x += shift;
    }
    g[initial].labels.extend(labels);
}
