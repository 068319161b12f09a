//! Place center edge labels into the space their label dummy reserved, then remove the dummy.

use crate::Result;
use crate::lgraph::{Direction, EdgeRouting, LGraph, LabelSide, NodeId, NodeKind, Vector};
use crate::long_edge_joiner;
use crate::util;
use tracing::{debug, debug_span, trace};

pub fn run(g: &mut LGraph) -> Result<()> {
    let _span = debug_span!("label_dummy_remover").entered();

    let add_unnecessary_bendpoint = g.options.edge_routing == EdgeRouting::Polyline;
    let dummies: Vec<NodeId> = g
        .layered_nodes()
        .into_iter()
        .filter(|&n| g[n].kind == NodeKind::Label)
        .collect();

    for &dummy in &dummies {
        place_labels(g, dummy)?;
        long_edge_joiner::join_at(g, dummy, add_unnecessary_bendpoint)?;
        g.remove_node(dummy);
    }

    debug!(removed = dummies.len(), "label dummies removed");
    Ok(())
}

/// Positions the labels represented by `dummy` and hands them back to the edge they came from.
pub fn place_labels(g: &mut LGraph, dummy: NodeId) -> Result<()> {
    let edge = util::origin_edge(g, dummy)?;
    let thickness = g.edge_thickness(edge);
    let edge_label = g.options.spacing_edge_label;
    let label_label = g.options.spacing_label_label;
    let direction = g.options.direction;

    let side = g[dummy].provenance.label_side;
    let mut origin = g[dummy].position;
    if side == LabelSide::Below {
        origin.y += thickness + edge_label;
    }
    let mut space = g[dummy].size;
    space.y -= thickness + edge_label;

    let mut labels = std::mem::take(&mut g[dummy].provenance.represented_labels);

    if direction.is_horizontal() {
        let mut y = origin.y;
        for &l in &labels {
            let size = g[l].size;
            g[l].position = Vector::new(origin.x + (space.x - size.x) / 2.0, y);
            y += size.y + label_label;
        }
    } else {
        // Stacked left to right; upwards layouts read the chain the other way round.
        let mut order = labels.clone();
        if direction == Direction::Up {
            order.reverse();
        }
        let mut x = origin.x;
        for l in order {
            let size = g[l].size;
            let y = if side == LabelSide::Above {
                origin.y + space.y - size.y
            } else {
                origin.y
            };
            g[l].position = Vector::new(x, y);
            x += size.x + label_label;
        }
    }

    trace!(%dummy, %edge, labels = labels.len(), "labels placed");
    g[edge].labels.append(&mut labels);
    Ok(())
}
