//! Split edges spanning more than one layer into chains of long-edge dummies.
//!
//! After [`run`] every edge connects nodes in the same or in adjacent layers. Each dummy keeps
//! two ports, a west input and an east output; the incoming edge at index *i* and the outgoing
//! edge at index *i* always belong to the same original edge, which [`crate::long_edge_joiner`]
//! relies on when the chain is collapsed again.

use crate::Result;
use crate::lgraph::{
    EdgeId, EdgeLabelPlacement, GraphError, LGraph, Node, NodeId, NodeKind, Origin,
    PortConstraints, PortSide,
};
use tracing::{debug, debug_span, trace};

pub fn run(g: &mut LGraph) -> Result<()> {
    let _span = debug_span!("long_edge_splitter").entered();

    let layer_count = g.layer_count();
    if layer_count <= 2 {
        return Ok(());
    }

    let mut created = 0usize;
    for layer in 0..layer_count - 1 {
        let next_layer = layer + 1;
        // Dummies only ever go into `next_layer`, so the current layer is stable while we walk it.
        for node in g.layer_nodes(layer).to_vec() {
            for port in g[node].ports().to_vec() {
                for edge in g[port].outgoing().to_vec() {
                    let target_layer = g.layer_of(g.target_node(edge)?)?;
                    if target_layer == layer || target_layer == next_layer {
                        continue;
                    }
                    if target_layer < layer {
                        return Err(GraphError::BackwardEdge {
                            edge,
                            source_layer: layer,
                            target_layer,
                        }
                        .into());
                    }
                    let dummy = create_dummy(g, next_layer, edge)?;
                    split_edge(g, edge, dummy)?;
                    trace!(%edge, %dummy, layer = next_layer, "split long edge");
                    created += 1;
                }
            }
        }
    }

    debug!(created, "long edge dummies");
    Ok(())
}

/// Splits one edge into a full chain, one dummy per layer strictly between its endpoints.
/// Returns the dummies from source to target; edges spanning at most one layer yield none.
pub fn split_long_edge(g: &mut LGraph, edge: EdgeId) -> Result<Vec<NodeId>> {
    if g.is_self_loop(edge) {
        return Ok(Vec::new());
    }
    let source_layer = g.layer_of(g.source_node(edge)?)?;
    let target_layer = g.layer_of(g.target_node(edge)?)?;
    if target_layer < source_layer {
        return Err(GraphError::BackwardEdge {
            edge,
            source_layer,
            target_layer,
        }
        .into());
    }

    let mut dummies = Vec::new();
    let mut current = edge;
    for layer in source_layer + 1..target_layer {
        let dummy = create_dummy(g, layer, current)?;
        current = split_edge(g, current, dummy)?;
        dummies.push(dummy);
    }
    Ok(dummies)
}

fn create_dummy(g: &mut LGraph, layer: usize, edge: EdgeId) -> Result<NodeId> {
    let mut dummy = Node::new(NodeKind::LongEdge);
    dummy.provenance.origin = Some(Origin::Edge(edge));
    dummy.config.port_constraints = PortConstraints::FixedPos;
    Ok(g.add_node_to_layer(dummy, layer)?)
}

/// Routes `edge` through `dummy`: the edge now ends at the dummy's new west port and a new
/// edge runs from the dummy's east port to the old target. The new edge is returned.
///
/// The new edge copies the edge's properties except for junction points, and takes over all
/// head labels so they stay next to the real target.
pub fn split_edge(g: &mut LGraph, edge: EdgeId, dummy: NodeId) -> Result<EdgeId> {
    let old_target = g.target_port(edge)?;

    let thickness = g.edge_thickness(edge);
    g[dummy].size.y = thickness;
    let port_pos = (thickness / 2.0).floor();

    let input = g.add_port(dummy, PortSide::West);
    g[input].position.y = port_pos;
    let output = g.add_port(dummy, PortSide::East);
    g[output].position.y = port_pos;

    g.set_target(edge, Some(input));

    let mut props = g[edge].props.clone();
    props.junction_points = None;
    let dummy_edge = g.add_edge_with(props);
    g.set_source(dummy_edge, Some(output));
    g.set_target(dummy_edge, Some(old_target));

    set_dummy_provenance(g, dummy, edge, dummy_edge)?;
    move_head_labels(g, edge, dummy_edge);

    Ok(dummy_edge)
}

fn set_dummy_provenance(
    g: &mut LGraph,
    dummy: NodeId,
    in_edge: EdgeId,
    out_edge: EdgeId,
) -> Result<()> {
    let upstream = g.source_node(in_edge)?;
    let downstream = g.target_node(out_edge)?;

    let (source, target, has_label_dummies) = match (g[upstream].kind, g[downstream].kind) {
        (NodeKind::LongEdge, _) => {
            let p = &g[upstream].provenance;
            (
                p.long_edge_source,
                p.long_edge_target,
                p.long_edge_has_label_dummies,
            )
        }
        (NodeKind::Label, _) => {
            let p = &g[upstream].provenance;
            (p.long_edge_source, p.long_edge_target, true)
        }
        (_, NodeKind::Label) => {
            let p = &g[downstream].provenance;
            (p.long_edge_source, p.long_edge_target, true)
        }
        _ => (
            Some(g.source_port(in_edge)?),
            Some(g.target_port(out_edge)?),
            false,
        ),
    };

    let p = &mut g[dummy].provenance;
    p.long_edge_source = source;
    p.long_edge_target = target;
    p.long_edge_has_label_dummies = has_label_dummies;
    Ok(())
}

fn move_head_labels(g: &mut LGraph, from: EdgeId, to: EdgeId) {
    let labels = std::mem::take(&mut g[from].labels);
    let (head, rest): (Vec<_>, Vec<_>) = labels
        .into_iter()
        .partition(|&l| g[l].placement == EdgeLabelPlacement::Head);
    g[from].labels = rest;
    g[to].labels.extend(head);
}
