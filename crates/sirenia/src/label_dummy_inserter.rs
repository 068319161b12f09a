//! Reserve room for center edge labels.
//!
//! Runs before layering. Every edge with at least one center label gets a label dummy, so the
//! layerer puts the labels into a layer of their own and node placement keeps space free for
//! them. The labels themselves are parked on the dummy until [`crate::label_dummy_remover`]
//! positions them.

use crate::Result;
use crate::lgraph::{
    EdgeId, EdgeLabelPlacement, LGraph, LabelId, Node, NodeId, NodeKind, Origin, PortConstraints,
    Vector,
};
use crate::long_edge_splitter;
use crate::util;
use tracing::{debug, debug_span, trace};

pub fn run(g: &mut LGraph) -> Result<()> {
    let _span = debug_span!("label_dummy_inserter").entered();

    let mut candidates: Vec<EdgeId> = Vec::new();
    for &node in g.layerless_nodes() {
        for edge in g.outgoing_edges(node) {
            if g.is_self_loop(edge) {
                continue;
            }
            if g[edge]
                .labels
                .iter()
                .any(|&l| g[l].placement == EdgeLabelPlacement::Center)
            {
                candidates.push(edge);
            }
        }
    }

    for &edge in &candidates {
        if let Some(dummy) = insert_label_dummy(g, edge)? {
            trace!(%edge, %dummy, "label dummy");
        }
    }

    debug!(created = candidates.len(), "label dummies");
    Ok(())
}

/// Splits `edge` with a label dummy carrying all of its center labels. Edges without center
/// labels are left alone and yield `None`.
pub fn insert_label_dummy(g: &mut LGraph, edge: EdgeId) -> Result<Option<NodeId>> {
    if !g[edge]
        .labels
        .iter()
        .any(|&l| g[l].placement == EdgeLabelPlacement::Center)
    {
        return Ok(None);
    }
    let thickness = g.edge_thickness(edge);

    let mut dummy = Node::new(NodeKind::Label);
    dummy.provenance.origin = Some(Origin::Edge(edge));
    dummy.provenance.long_edge_source = Some(g.source_port(edge)?);
    dummy.provenance.long_edge_target = Some(g.target_port(edge)?);
    dummy.config.port_constraints = PortConstraints::FixedPos;
    let dummy = g.add_layerless_node(dummy);

    long_edge_splitter::split_edge(g, edge, dummy)?;

    let labels = std::mem::take(&mut g[edge].labels);
    let (center, rest): (Vec<LabelId>, Vec<LabelId>) = labels
        .into_iter()
        .partition(|&l| g[l].placement == EdgeLabelPlacement::Center);
    g[edge].labels = rest;

    let size = footprint(g, &center, thickness);
    g[dummy].size = size;
    g[dummy].provenance.represented_labels = center;

    let port_pos = (thickness / 2.0).floor();
    let (west, east) = util::west_east_ports(g, dummy)?;
    g[west].position.y = port_pos;
    g[east].position.y = port_pos;

    Ok(Some(dummy))
}

fn footprint(g: &LGraph, labels: &[LabelId], thickness: f64) -> Vector {
    let label_label = g.options.spacing_label_label;
    let edge_label = g.options.spacing_edge_label;

    let mut size = Vector::ZERO;
    if g.options.direction.is_vertical() {
        for &l in labels {
            size.x += g[l].size.x + label_label;
            size.y = size.y.max(g[l].size.y);
        }
        size.x -= label_label;
        size.y += edge_label + thickness;
    } else {
        for &l in labels {
            size.x = size.x.max(g[l].size.x);
            size.y += g[l].size.y + label_label;
        }
        size.y += edge_label + thickness - label_label;
    }
    size
}
