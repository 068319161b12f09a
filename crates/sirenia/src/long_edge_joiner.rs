//! Join edges split by long-edge dummies back together.
//!
//! Runs after edge routing. Each dummy's incoming edge *i* survives and takes over the target,
//! bend points, labels and junction points of outgoing edge *i*, which is deleted.

use crate::Result;
use crate::lgraph::{GraphError, LGraph, NodeId, NodeKind};
use crate::util;
use tracing::{debug, debug_span, trace};

pub fn run(g: &mut LGraph) -> Result<()> {
    let _span = debug_span!("long_edge_joiner").entered();

    let add_unnecessary_bendpoints = g.options.unnecessary_bendpoints;
    let mut joined = 0usize;
    for layer in 0..g.layer_count() {
        let dummies: Vec<NodeId> = g
            .layer_nodes(layer)
            .iter()
            .copied()
            .filter(|&n| g[n].kind == NodeKind::LongEdge)
            .collect();
        for dummy in dummies {
            join_at(g, dummy, add_unnecessary_bendpoints)?;
            g.remove_node(dummy);
            joined += 1;
        }
    }

    debug!(joined, "long edge dummies joined");
    Ok(())
}

/// Reconnects the edges running through `dummy`, which is left without edges for the caller to
/// remove.
///
/// With `add_unnecessary_bendpoint`, every surviving edge gets a bend point at the anchor of the
/// dummy's first port, even where the edge runs straight through the dummy.
pub fn join_at(g: &mut LGraph, dummy: NodeId, add_unnecessary_bendpoint: bool) -> Result<()> {
    let (west, east) = util::west_east_ports(g, dummy)?;

    let incoming = g[west].incoming().to_vec();
    let outgoing = g[east].outgoing().to_vec();
    if incoming.len() != outgoing.len() {
        return Err(GraphError::MismatchedEdgeLists {
            node: dummy,
            incoming: incoming.len(),
            outgoing: outgoing.len(),
        }
        .into());
    }

    let anchor = match g[dummy].ports().first() {
        Some(&first) => g.port_absolute_anchor(first),
        None => g[dummy].position,
    };

    for (surviving, dropped) in incoming.into_iter().zip(outgoing) {
        let target = g.target_port(dropped)?;
        let index = g[target]
            .incoming()
            .iter()
            .position(|&e| e == dropped)
            .ok_or(GraphError::EdgeNotInPort {
                edge: dropped,
                port: target,
            })?;

        // Detach first so `index` addresses the slot the dropped edge leaves behind.
        g.set_source(dropped, None);
        g.set_target(dropped, None);
        g.set_target_at(surviving, target, index)?;

        let dropped_edge = std::mem::take(&mut g[dropped]);
        g.remove_edge(dropped);

        let edge = &mut g[surviving];
        if add_unnecessary_bendpoint {
            edge.bend_points.push(anchor);
        }
        edge.bend_points.extend(dropped_edge.bend_points);
        edge.labels.extend(dropped_edge.labels);
        if let Some(points) = dropped_edge.props.junction_points {
            if !points.is_empty() {
                edge.props
                    .junction_points
                    .get_or_insert_with(Vec::new)
                    .extend(points);
            }
        }
        trace!(%surviving, %dropped, "joined");
    }
    Ok(())
}
