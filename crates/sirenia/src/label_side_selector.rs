//! Decide on which side of their edge labels end up.
//!
//! Label dummies reserve space on one side of the edge; once a side is chosen their ports move
//! so the edge runs along the border of that space instead of through it.

use crate::Result;
use crate::lgraph::{
    EdgeId, EdgeLabelSideSelection, LGraph, LabelSide, NodeId, NodeKind, PortSide,
};
use crate::util;
use rustc_hash::FxHashMap;
use tracing::{debug, debug_span};

/// Side given to port labels no strategy assigned.
pub const DEFAULT_LABEL_SIDE: LabelSide = LabelSide::Below;

pub fn run(g: &mut LGraph) -> Result<()> {
    let _span = debug_span!("label_side_selector").entered();

    let mode = g.options.edge_label_side_selection;
    let nodes = g.layered_nodes();

    if mode == EdgeLabelSideSelection::Smart {
        smart(g, &nodes)?;
    } else {
        for &node in &nodes {
            if g[node].kind == NodeKind::Label {
                let side = pick(mode, label_dummy_points_right(g, node));
                set_label_dummy_side(g, node, side);
            }
            for edge in g.outgoing_edges(node) {
                let side = pick(mode, !g[edge].props.reversed);
                apply_label_side(g, edge, side)?;
            }
        }
    }

    let mut moved = 0usize;
    for &node in &nodes {
        for port in g[node].ports().to_vec() {
            for label in g[port].labels.clone() {
                if g[label].side == LabelSide::Unknown {
                    g[label].side = DEFAULT_LABEL_SIDE;
                }
            }
        }

        if g[node].kind == NodeKind::Label && g[node].provenance.label_side == LabelSide::Above {
            let edge = util::origin_edge(g, node)?;
            let thickness = g.edge_thickness(edge);
            let port_pos = g[node].size.y - (thickness / 2.0).ceil();
            for port in g[node].ports().to_vec() {
                g[port].position.y = port_pos;
            }
            moved += 1;
        }
    }

    debug!(?mode, moved, "label sides");
    Ok(())
}

/// Side chosen by the per-edge strategies. `Smart` looks at more than one edge and is handled by
/// [`smart`].
fn pick(mode: EdgeLabelSideSelection, points_right: bool) -> LabelSide {
    let above = match mode {
        EdgeLabelSideSelection::AlwaysUp => true,
        EdgeLabelSideSelection::AlwaysDown | EdgeLabelSideSelection::Smart => false,
        EdgeLabelSideSelection::DirectionUp => points_right,
        EdgeLabelSideSelection::DirectionDown => !points_right,
    };
    if above {
        LabelSide::Above
    } else {
        LabelSide::Below
    }
}

/// Labels every edge leaving an east port. The side is remembered per node the edge finally
/// ends at, so all edges converging on one node use the same side. Otherwise edges go above,
/// except that a node with exactly two east ports sends the lower one's edges below.
fn smart(g: &mut LGraph, nodes: &[NodeId]) -> Result<()> {
    let mut markers: FxHashMap<NodeId, LabelSide> = FxHashMap::default();

    for &node in nodes {
        let mut east_ports = g.ports_on_side(node, PortSide::East);
        east_ports.sort_by(|&a, &b| g[a].position.y.total_cmp(&g[b].position.y));
        let two_ports = east_ports.len() == 2;

        for (i, &port) in east_ports.iter().enumerate() {
            for edge in g[port].outgoing().to_vec() {
                let side = *markers.entry(final_target(g, edge)?).or_insert(
                    if two_ports && i == 1 {
                        LabelSide::Below
                    } else {
                        LabelSide::Above
                    },
                );
                apply_label_side(g, edge, side)?;

                let target = g.target_node(edge)?;
                if g[target].kind == NodeKind::Label {
                    set_label_dummy_side(g, target, side);
                }
            }
        }
    }
    Ok(())
}

/// The node an edge finally ends at, looking through long-edge and label dummies.
fn final_target(g: &LGraph, edge: EdgeId) -> Result<NodeId> {
    let target = g.target_node(edge)?;
    if matches!(g[target].kind, NodeKind::LongEdge | NodeKind::Label) {
        if let Some(port) = g[target].provenance.long_edge_target {
            return Ok(g.port_node(port)?);
        }
    }
    Ok(target)
}

fn set_label_dummy_side(g: &mut LGraph, dummy: NodeId, side: LabelSide) {
    g[dummy].provenance.label_side = side;
    for label in g[dummy].provenance.represented_labels.clone() {
        g[label].side = side;
    }
}

fn label_dummy_points_right(g: &LGraph, dummy: NodeId) -> bool {
    g.incoming_edges(dummy)
        .into_iter()
        .chain(g.outgoing_edges(dummy))
        .any(|e| !g[e].props.reversed)
}

fn apply_label_side(g: &mut LGraph, edge: EdgeId, side: LabelSide) -> Result<()> {
    let source = g.source_port(edge)?;
    let target = g.target_port(edge)?;
    let labels: Vec<_> = g[edge]
        .labels
        .iter()
        .chain(g[source].labels.iter())
        .chain(g[target].labels.iter())
        .copied()
        .collect();
    for label in labels {
        g[label].side = side;
    }
    Ok(())
}
