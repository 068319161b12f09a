//! Mark long-edge dummies that share a chain with a label dummy.
//!
//! The hyperedge merger needs to know, for every long-edge dummy, whether its chain contains a
//! label dummy and on which side of it the dummy sits.

use crate::Result;
use crate::lgraph::{LGraph, NodeId, NodeKind};
use crate::util;
use tracing::{debug, debug_span};

pub fn run(g: &mut LGraph) -> Result<()> {
    let _span = debug_span!("label_dummy_chains").entered();

    let label_dummies: Vec<NodeId> = g
        .layered_nodes()
        .into_iter()
        .filter(|&n| g[n].kind == NodeKind::Label)
        .collect();

    let mut marked = 0usize;
    for &dummy in &label_dummies {
        g[dummy].provenance.long_edge_has_label_dummies = true;
        marked += mark_upstream(g, dummy)?;
        marked += mark_downstream(g, dummy)?;
    }

    debug!(label_dummies = label_dummies.len(), marked, "label dummy chains");
    Ok(())
}

fn mark_upstream(g: &mut LGraph, label_dummy: NodeId) -> Result<usize> {
    let mut count = 0;
    let (mut west, _) = util::west_east_ports(g, label_dummy)?;
    while let Some(&edge) = g[west].incoming().first() {
        let node = g.source_node(edge)?;
        if g[node].kind != NodeKind::LongEdge {
            break;
        }
        let p = &mut g[node].provenance;
        p.long_edge_has_label_dummies = true;
        p.long_edge_before_label_dummy = true;
        count += 1;
        west = util::west_east_ports(g, node)?.0;
    }
    Ok(count)
}

fn mark_downstream(g: &mut LGraph, label_dummy: NodeId) -> Result<usize> {
    let mut count = 0;
    let (_, mut east) = util::west_east_ports(g, label_dummy)?;
    while let Some(&edge) = g[east].outgoing().first() {
        let node = g.target_node(edge)?;
        if g[node].kind != NodeKind::LongEdge {
            break;
        }
        let p = &mut g[node].provenance;
        p.long_edge_has_label_dummies = true;
        p.long_edge_before_label_dummy = false;
        count += 1;
        east = util::west_east_ports(g, node)?.1;
    }
    Ok(count)
}
