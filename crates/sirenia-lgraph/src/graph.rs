//! The layered graph container.
//!
//! Baseline: the layered graph of a Sugiyama-style pipeline. Layers are ordered lists of node
//! handles; nodes own ordered port lists; ports own ordered incoming/outgoing edge lists. All of
//! these orders are significant (they encode crossing-minimization results and the pairing of
//! edges through dummy nodes), so every mutation here appends or inserts at an explicit index and
//! never reorders behind the caller's back.

mod entries;
mod provenance;

pub use entries::{Edge, Label, Layer, Node, NodeKind, Port};
pub use provenance::{
    EdgeProperties, LabelPieces, NodeConfig, NodeProvenance, Origin, RestoreHook, RestoreNotice,
};

use crate::error::{EdgeEnd, GraphError, Result};
use crate::geometry::Vector;
use crate::ids::{EdgeId, LabelId, NodeId, PortId};
use crate::options::{LayoutOptions, PortSide};
use entries::Placement;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Default)]
pub struct LGraph {
    pub options: LayoutOptions,
    /// Size of the drawing as computed by node placement and edge routing.
    pub size: Vector,
    pub offset: Vector,

    nodes: Vec<Option<Node>>,
    ports: Vec<Option<Port>>,
    edges: Vec<Option<Edge>>,
    labels: Vec<Label>,

    layers: Vec<Layer>,
    layerless: Vec<NodeId>,

    restore_notices: Vec<RestoreNotice>,
}

impl LGraph {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    // ---------------------------------------------------------------------------------------
    // Layers

    /// Appends an empty layer and returns its index.
    pub fn add_layer(&mut self) -> usize {
        self.layers.push(Layer::default());
        self.layers.len() - 1
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Nodes of layer `index` in order; empty for an unknown layer.
    pub fn layer_nodes(&self, index: usize) -> &[NodeId] {
        self.layers.get(index).map(Layer::nodes).unwrap_or(&[])
    }

    pub fn layerless_nodes(&self) -> &[NodeId] {
        &self.layerless
    }

    /// All layered nodes, layer by layer, each layer in order.
    pub fn layered_nodes(&self) -> Vec<NodeId> {
        self.layers
            .iter()
            .flat_map(|l| l.nodes.iter().copied())
            .collect()
    }

    fn check_layer(&self, index: usize) -> Result<()> {
        if index < self.layers.len() {
            Ok(())
        } else {
            Err(GraphError::MissingLayer {
                index,
                count: self.layers.len(),
            })
        }
    }

    // ---------------------------------------------------------------------------------------
    // Nodes

    pub fn try_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    pub fn try_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.try_node(id).is_some()
    }

    /// Live nodes in creation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| NodeId::new(i))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Adds a node that belongs neither to a layer nor to the layerless pool yet.
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        node.ports.clear();
        node.placement = Placement::Detached;
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    pub fn add_layerless_node(&mut self, node: Node) -> NodeId {
        let id = self.add_node(node);
        self.layerless.push(id);
        self[id].placement = Placement::Layerless;
        id
    }

    pub fn add_node_to_layer(&mut self, node: Node, layer: usize) -> Result<NodeId> {
        self.check_layer(layer)?;
        let id = self.add_node(node);
        self.set_layer(id, Some(layer))?;
        Ok(id)
    }

    /// Moves `node` to the end of `layer` (or detaches it for `None`).
    pub fn set_layer(&mut self, node: NodeId, layer: Option<usize>) -> Result<()> {
        match layer {
            Some(index) => self.insert_into_layer(node, index, usize::MAX),
            None => {
                self.unplace(node);
                Ok(())
            }
        }
    }

    /// Moves `node` into `layer` at `position` (clamped to the layer length after removal from
    /// its previous container).
    pub fn insert_into_layer(&mut self, node: NodeId, layer: usize, position: usize) -> Result<()> {
        self.check_layer(layer)?;
        self.unplace(node);
        let nodes = &mut self.layers[layer].nodes;
        let position = position.min(nodes.len());
        nodes.insert(position, node);
        self[node].placement = Placement::Layer(layer);
        Ok(())
    }

    pub fn move_to_layerless(&mut self, node: NodeId) {
        self.unplace(node);
        self.layerless.push(node);
        self[node].placement = Placement::Layerless;
    }

    pub fn position_in_layer(&self, node: NodeId) -> Option<usize> {
        let layer = self.try_node(node)?.layer()?;
        self.layers[layer].nodes.iter().position(|&n| n == node)
    }

    /// Layer index of `node`, or an error if it is not layered.
    pub fn layer_of(&self, node: NodeId) -> Result<usize> {
        self[node].layer().ok_or(GraphError::NotLayered { node })
    }

    fn unplace(&mut self, node: NodeId) {
        match self[node].placement {
            Placement::Detached => {}
            Placement::Layerless => self.layerless.retain(|&n| n != node),
            Placement::Layer(i) => self.layers[i].nodes.retain(|&n| n != node),
        }
        self[node].placement = Placement::Detached;
    }

    /// Removes `node` from its container and deletes it together with its ports and every edge
    /// still attached to them.
    pub fn remove_node(&mut self, node: NodeId) {
        if !self.contains_node(node) {
            return;
        }
        for port in self[node].ports.clone() {
            self.remove_port(port);
        }
        self.unplace(node);
        self.nodes[node.index()] = None;
    }

    // ---------------------------------------------------------------------------------------
    // Ports

    pub fn try_port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(id.index()).and_then(Option::as_ref)
    }

    pub fn add_port(&mut self, node: NodeId, side: PortSide) -> PortId {
        let id = PortId::new(self.ports.len());
        self.ports.push(Some(Port {
            side,
            ..Default::default()
        }));
        self.set_port_node(id, Some(node));
        id
    }

    /// Reassigns the port's owner. The port is removed from its old node's port list and
    /// appended to the new node's list; its edges travel with it.
    pub fn set_port_node(&mut self, port: PortId, node: Option<NodeId>) {
        if let Some(old) = self[port].node {
            if let Some(n) = self.try_node_mut(old) {
                n.ports.retain(|&p| p != port);
            }
        }
        self[port].node = node;
        if let Some(new) = node {
            self[new].ports.push(port);
        }
    }

    pub fn port_node(&self, port: PortId) -> Result<NodeId> {
        self[port].node.ok_or(GraphError::DetachedPort { port })
    }

    pub fn ports_on_side(&self, node: NodeId, side: PortSide) -> Vec<PortId> {
        self[node]
            .ports
            .iter()
            .copied()
            .filter(|&p| self[p].side == side)
            .collect()
    }

    /// Deletes the port and every edge attached to it.
    pub fn remove_port(&mut self, port: PortId) {
        if self.try_port(port).is_none() {
            return;
        }
        let attached: Vec<EdgeId> = self[port]
            .incoming
            .iter()
            .chain(self[port].outgoing.iter())
            .copied()
            .collect();
        for edge in attached {
            self.remove_edge(edge);
        }
        self.set_port_node(port, None);
        self.ports[port.index()] = None;
    }

    /// Absolute position of the port's anchor point.
    pub fn port_absolute_anchor(&self, port: PortId) -> Vector {
        let p = &self[port];
        let node_pos = p.node.map(|n| self[n].position).unwrap_or(Vector::ZERO);
        node_pos + p.position + p.anchor
    }

    /// Ports on the other end of every edge attached to `port`, incoming edges first.
    pub fn connected_ports(&self, port: PortId) -> Vec<PortId> {
        let p = &self[port];
        let sources = p.incoming.iter().filter_map(|&e| self[e].source);
        let targets = p.outgoing.iter().filter_map(|&e| self[e].target);
        sources.chain(targets).collect()
    }

    // ---------------------------------------------------------------------------------------
    // Edges

    pub fn try_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index()).and_then(Option::as_ref)
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| EdgeId::new(i))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }

    /// Adds a detached edge with the default thickness.
    pub fn add_edge(&mut self) -> EdgeId {
        let props = EdgeProperties::new(self.options.default_edge_thickness);
        self.add_edge_with(props)
    }

    pub fn add_edge_with(&mut self, props: EdgeProperties) -> EdgeId {
        let id = EdgeId::new(self.edges.len());
        self.edges.push(Some(Edge {
            props,
            ..Default::default()
        }));
        id
    }

    pub fn connect(&mut self, source: PortId, target: PortId) -> EdgeId {
        let edge = self.add_edge();
        self.set_source(edge, Some(source));
        self.set_target(edge, Some(target));
        edge
    }

    pub fn set_source(&mut self, edge: EdgeId, port: Option<PortId>) {
        if let Some(old) = self[edge].source {
            self[old].outgoing.retain(|&e| e != edge);
        }
        self[edge].source = port;
        if let Some(new) = port {
            self[new].outgoing.push(edge);
        }
    }

    pub fn set_target(&mut self, edge: EdgeId, port: Option<PortId>) {
        if let Some(old) = self[edge].target {
            self[old].incoming.retain(|&e| e != edge);
        }
        self[edge].target = port;
        if let Some(new) = port {
            self[new].incoming.push(edge);
        }
    }

    /// Retargets `edge` to `port`, inserting it at `index` of the port's incoming list instead
    /// of appending it.
    pub fn set_target_at(&mut self, edge: EdgeId, port: PortId, index: usize) -> Result<()> {
        if let Some(old) = self[edge].target {
            self[old].incoming.retain(|&e| e != edge);
        }
        let len = self[port].incoming.len();
        if index > len {
            self[edge].target = None;
            return Err(GraphError::InvalidInsertIndex {
                edge,
                port,
                index,
                len,
            });
        }
        self[edge].target = Some(port);
        self[port].incoming.insert(index, edge);
        Ok(())
    }

    pub fn source_port(&self, edge: EdgeId) -> Result<PortId> {
        self[edge].source.ok_or(GraphError::DetachedEdge {
            edge,
            end: EdgeEnd::Source,
        })
    }

    pub fn target_port(&self, edge: EdgeId) -> Result<PortId> {
        self[edge].target.ok_or(GraphError::DetachedEdge {
            edge,
            end: EdgeEnd::Target,
        })
    }

    pub fn source_node(&self, edge: EdgeId) -> Result<NodeId> {
        self.port_node(self.source_port(edge)?)
    }

    pub fn target_node(&self, edge: EdgeId) -> Result<NodeId> {
        self.port_node(self.target_port(edge)?)
    }

    pub fn is_self_loop(&self, edge: EdgeId) -> bool {
        match (self.source_node(edge), self.target_node(edge)) {
            (Ok(s), Ok(t)) => s == t,
            _ => false,
        }
    }

    /// Detaches both endpoints and deletes the edge.
    pub fn remove_edge(&mut self, edge: EdgeId) {
        if self.try_edge(edge).is_none() {
            return;
        }
        self.set_source(edge, None);
        self.set_target(edge, None);
        self.edges[edge.index()] = None;
    }

    /// Incoming edges of all ports of `node`, in port order.
    pub fn incoming_edges(&self, node: NodeId) -> Vec<EdgeId> {
        self[node]
            .ports
            .iter()
            .flat_map(|&p| self[p].incoming.iter().copied())
            .collect()
    }

    /// Outgoing edges of all ports of `node`, in port order.
    pub fn outgoing_edges(&self, node: NodeId) -> Vec<EdgeId> {
        self[node]
            .ports
            .iter()
            .flat_map(|&p| self[p].outgoing.iter().copied())
            .collect()
    }

    /// Edge thickness, never negative: a negative value is corrected to zero and written back,
    /// so later readers observe the corrected value.
    pub fn edge_thickness(&mut self, edge: EdgeId) -> f64 {
        let props = &mut self[edge].props;
        if props.thickness < 0.0 {
            props.thickness = 0.0;
        }
        props.thickness
    }

    // ---------------------------------------------------------------------------------------
    // Labels

    pub fn add_label(&mut self, label: Label) -> LabelId {
        self.labels.push(label);
        LabelId::new(self.labels.len() - 1)
    }

    // ---------------------------------------------------------------------------------------
    // Restoration notices

    pub fn push_restore_notice(&mut self, notice: RestoreNotice) {
        self.restore_notices.push(notice);
    }

    pub fn restore_notices(&self) -> &[RestoreNotice] {
        &self.restore_notices
    }

    /// Hands all pending notices to the caller, in the order the nodes were restored.
    pub fn drain_restore_notices(&mut self) -> Vec<RestoreNotice> {
        std::mem::take(&mut self.restore_notices)
    }
}

macro_rules! arena_index {
    ($id:ty, $out:ty, $field:ident, $what:literal) => {
        impl Index<$id> for LGraph {
            type Output = $out;

            fn index(&self, id: $id) -> &$out {
                match self.$field.get(id.index()) {
                    Some(Some(v)) => v,
                    _ => panic!(concat!("stale ", $what, " handle {}"), id),
                }
            }
        }

        impl IndexMut<$id> for LGraph {
            fn index_mut(&mut self, id: $id) -> &mut $out {
                match self.$field.get_mut(id.index()) {
                    Some(Some(v)) => v,
                    _ => panic!(concat!("stale ", $what, " handle {}"), id),
                }
            }
        }
    };
}

arena_index!(NodeId, Node, nodes, "node");
arena_index!(PortId, Port, ports, "port");
arena_index!(EdgeId, Edge, edges, "edge");

impl Index<LabelId> for LGraph {
    type Output = Label;

    fn index(&self, id: LabelId) -> &Label {
        &self.labels[id.index()]
    }
}

impl IndexMut<LabelId> for LGraph {
    fn index_mut(&mut self, id: LabelId) -> &mut Label {
        &mut self.labels[id.index()]
    }
}
