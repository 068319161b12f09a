//! Slice nodes that are too wide for one layer into chains of big node dummies.
//!
//! Runs on the layerless pool before layering. A big node keeps its first slice (the *initial*
//! node) and gets one `BigNode` dummy per additional slice, linked east to west. The layerer then
//! spreads the chain over consecutive layers, [`crate::big_nodes_intermediate`] closes gaps
//! left by layering, and [`crate::big_nodes_postprocessor`] glues the slices back together.

use crate::Result;
use crate::lgraph::{
    Direction, HorizontalPlacement, LGraph, Label, LabelId, LabelPieces, Node, NodeId, NodeKind,
    NodeLabelPlacement, PortId, PortSide, VerticalPlacement,
};
use tracing::{debug, debug_span, trace};

/// Lower bound for the slice width, whatever the narrowest node is.
pub const MIN_WIDTH: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct BigNode {
    node: NodeId,
    parts: usize,
    chunk_width: f64,
}

pub fn run(g: &mut LGraph) -> Result<()> {
    let _span = debug_span!("big_nodes_preprocessor").entered();

    let spacing = g.options.spacing_node_node;
    let nodes = g.layerless_nodes().to_vec();

    let min_width = nodes
        .iter()
        .filter(|&&n| g[n].kind == NodeKind::Normal)
        .map(|&n| g[n].size.x)
        .fold(f64::INFINITY, f64::min)
        .max(MIN_WIDTH);
    let threshold = min_width + spacing;

    let big_nodes: Vec<BigNode> = nodes
        .iter()
        .copied()
        .filter(|&n| g[n].kind == NodeKind::Normal && g[n].size.x > threshold)
        .map(|n| {
            let (parts, chunk_width) = slice_count(g[n].size.x, min_width, spacing);
            BigNode {
                node: n,
                parts,
                chunk_width,
            }
        })
        .collect();

    let mut split = 0usize;
    for big in big_nodes {
        if !is_applicable(g, big.node)? {
            trace!(node = %big.node, "big node left alone");
            continue;
        }
        let chain = slice(g, big)?;
        trace!(node = %big.node, parts = chain.len(), "big node sliced");
        split += 1;
    }

    debug!(split, min_width, "big nodes");
    Ok(())
}

/// Number of slices and their width: slices keep getting added while they are wider than
/// `min_width`, and every slice but the last gives up one node spacing.
pub fn slice_count(width: f64, min_width: f64, spacing: f64) -> (usize, f64) {
    let mut parts = 1usize;
    let mut chunk = width;
    while chunk > min_width {
        parts += 1;
        chunk = (width - (parts - 1) as f64 * spacing) / parts as f64;
    }
    (parts, chunk)
}

fn is_applicable(g: &LGraph, node: NodeId) -> Result<bool> {
    let constraints = g[node].config.port_constraints;
    let ports = g[node].ports();

    if constraints.is_pos_fixed()
        && ports
            .iter()
            .any(|&p| matches!(g[p].side, PortSide::North | PortSide::South))
    {
        return Ok(false);
    }

    // Incoming edges on east ports would end up in the same layer as the last slice.
    if constraints.is_side_fixed()
        && ports
            .iter()
            .any(|&p| g[p].side == PortSide::East && !g[p].incoming().is_empty())
    {
        return Ok(false);
    }

    for edge in g.outgoing_edges(node) {
        if g.target_node(edge)? == node {
            return Ok(false);
        }
    }
    Ok(true)
}

fn slice(g: &mut LGraph, big: BigNode) -> Result<Vec<NodeId>> {
    let node = big.node;
    let chunk = big.chunk_width;
    let spacing = g.options.spacing_node_node;

    let mut east_ports: Vec<PortId> = g.ports_on_side(node, PortSide::East);
    // Free ports will be assigned to the east side later on, so outgoing edges travel too.
    if g.options.direction == Direction::Right && !g[node].config.port_constraints.is_side_fixed() {
        for edge in g.outgoing_edges(node) {
            let port = g.source_port(edge)?;
            if !east_ports.contains(&port) {
                east_ports.push(port);
            }
        }
    }

    let mut remaining = g[node].size.x;
    {
        let n = &mut g[node];
        n.provenance.big_node_original_size = Some(n.size.x);
        n.provenance.big_node_initial = true;
        n.size.x = chunk;
    }
    remaining -= chunk;

    let mut chain = vec![node];
    let mut last = node;
    for _ in 1..big.parts {
        last = append_slice(g, last, remaining.min(chunk));
        chain.push(last);
        remaining -= chunk + spacing;
    }

    distribute_labels(g, &chain);

    for port in east_ports {
        g.set_port_node(port, Some(last));
    }
    Ok(chain)
}

fn append_slice(g: &mut LGraph, previous: NodeId, width: f64) -> NodeId {
    let mut dummy = Node::new(NodeKind::BigNode);
    dummy.config.port_constraints = g[previous].config.port_constraints;
    dummy.config.label_placement = g[previous].config.label_placement;
    dummy.size.x = width;
    dummy.size.y = g[previous].size.y;
    let height = dummy.size.y;
    let dummy = g.add_layerless_node(dummy);

    let out_port = g.add_port(previous, PortSide::East);
    g[out_port].position.x = g[previous].size.x;
    g[out_port].position.y = height / 2.0;

    let in_port = g.add_port(dummy, PortSide::West);
    g[in_port].position.y = height / 2.0;
    g[in_port].position.x = -g[in_port].size.x;

    g.connect(out_port, in_port);
    dummy
}

fn distribute_labels(g: &mut LGraph, chain: &[NodeId]) {
    let node = chain[0];
    let labels: Vec<LabelId> = g[node].labels.clone();
    g[node].provenance.big_node_original_labels = Some(labels.clone());

    let Some(&last) = chain.last() else {
        return;
    };
    if last == node {
        return;
    }
    for &middle in &chain[1..chain.len() - 1] {
        g[middle].config.label_placement = Some(NodeLabelPlacement::inside_center());
    }

    let placement = g[node].config.label_placement;
    // Outside left labels stay on the initial node, where spacing goes to the left of the chain.
    if is_outside_center(placement, HorizontalPlacement::Left) {
        return;
    }

    g[node].labels.clear();
    if is_outside_center(placement, HorizontalPlacement::Right) {
        // Placed next to the last slice, so they have to live there.
        g[last].labels.extend(labels);
        return;
    }
    for label in labels {
        let pieces = split_label(g, label, chain);
        g[node]
            .provenance
            .big_node_label_pieces
            .push(LabelPieces { label, pieces });
    }
}

/// Cuts the label text into equally long pieces, one per slice. Every piece is as high as the
/// label and gets an equal share of its width.
fn split_label(g: &mut LGraph, label: LabelId, chain: &[NodeId]) -> Vec<LabelId> {
    let text: Vec<char> = g[label].text.chars().collect();
    let size = g[label].size;
    let per_piece = text.len().div_ceil(chain.len());

    let mut pieces = Vec::with_capacity(chain.len());
    for (i, &slice) in chain.iter().enumerate() {
        let from = (i * per_piece).min(text.len());
        let to = ((i + 1) * per_piece).min(text.len());
        let piece = Label::new(
            text[from..to].iter().collect::<String>(),
            size.x / chain.len() as f64,
            size.y,
        );
        let piece = g.add_label(piece);
        g[slice].labels.push(piece);
        pieces.push(piece);
    }
    pieces
}

fn is_outside_center(placement: Option<NodeLabelPlacement>, side: HorizontalPlacement) -> bool {
    matches!(
        placement,
        Some(NodeLabelPlacement {
            outside: true,
            horizontal,
            vertical: VerticalPlacement::Center,
        }) if horizontal == side
    )
}
