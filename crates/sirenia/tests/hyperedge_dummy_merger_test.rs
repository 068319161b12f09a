use sirenia::lgraph::{
    EdgeId, LGraph, LayoutOptions, Node, NodeId, NodeKind, PortId, PortSide,
};
use sirenia::{hyperedge_dummy_merger, long_edge_joiner, long_edge_splitter};

fn layered_graph(layers: usize) -> LGraph {
    let mut g = LGraph::new(LayoutOptions::default());
    for _ in 0..layers {
        g.add_layer();
    }
    g
}

fn node(g: &mut LGraph, layer: usize) -> NodeId {
    g.add_node_to_layer(Node::new(NodeKind::Normal), layer)
        .unwrap()
}

/// A long-edge dummy in layer 1 between `source` and a fresh west port on `target`.
fn dummy_between(g: &mut LGraph, source: PortId, target: NodeId) -> (NodeId, EdgeId, EdgeId) {
    let d = g.add_node_to_layer(Node::new(NodeKind::LongEdge), 1).unwrap();
    let w = g.add_port(d, PortSide::West);
    let e = g.add_port(d, PortSide::East);
    let t = g.add_port(target, PortSide::West);
    let first = g.connect(source, w);
    let second = g.connect(e, t);
    g[d].provenance.long_edge_source = Some(source);
    g[d].provenance.long_edge_target = Some(t);
    (d, first, second)
}

fn long_edge_dummies(g: &LGraph) -> Vec<NodeId> {
    g.node_ids()
        .filter(|&n| g[n].kind == NodeKind::LongEdge)
        .collect()
}

#[test]
fn merges_adjacent_dummies_of_one_hyperedge() {
    let mut g = layered_graph(3);
    let s = node(&mut g, 0);
    let t1 = node(&mut g, 2);
    let t2 = node(&mut g, 2);
    let p = g.add_port(s, PortSide::East);
    let i1 = g.add_port(t1, PortSide::West);
    let i2 = g.add_port(t2, PortSide::West);
    let e1 = g.connect(p, i1);
    let e2 = g.connect(p, i2);

    long_edge_splitter::run(&mut g).unwrap();
    assert_eq!(g.layer_nodes(1).len(), 2);
    let survivor = g.layer_nodes(1)[0];

    hyperedge_dummy_merger::run(&mut g).unwrap();

    assert_eq!(g.layer_nodes(1), &[survivor]);
    assert_eq!(long_edge_dummies(&g), vec![survivor]);
    let west = g.ports_on_side(survivor, PortSide::West)[0];
    let east = g.ports_on_side(survivor, PortSide::East)[0];
    assert_eq!(g[west].incoming(), &[e1, e2]);
    assert_eq!(g[east].outgoing().len(), 2);
    assert_eq!(g[survivor].ports().len(), 2);

    // Same source, different targets.
    assert_eq!(g[survivor].provenance.long_edge_source, Some(p));
    assert_eq!(g[survivor].provenance.long_edge_target, None);

    long_edge_joiner::run(&mut g).unwrap();
    assert_eq!(g.target_port(e1).unwrap(), i1);
    assert_eq!(g.target_port(e2).unwrap(), i2);
    assert_eq!(g.source_port(e1).unwrap(), p);
    assert_eq!(g.source_port(e2).unwrap(), p);
}

#[test]
fn merges_chains_of_three_in_one_pass() {
    let mut g = layered_graph(3);
    let s = node(&mut g, 0);
    let p = g.add_port(s, PortSide::East);
    for _ in 0..3 {
        let t = node(&mut g, 2);
        let i = g.add_port(t, PortSide::West);
        g.connect(p, i);
    }

    long_edge_splitter::run(&mut g).unwrap();
    hyperedge_dummy_merger::run(&mut g).unwrap();

    assert_eq!(g.layer_nodes(1).len(), 1);
    let d = g.layer_nodes(1)[0];
    assert_eq!(g.incoming_edges(d).len(), 3);
    assert_eq!(g.outgoing_edges(d).len(), 3);
}

#[test]
fn dummies_of_different_hyperedges_stay_apart() {
    let mut g = layered_graph(3);
    let s1 = node(&mut g, 0);
    let s2 = node(&mut g, 0);
    let t1 = node(&mut g, 2);
    let t2 = node(&mut g, 2);
    let p1 = g.add_port(s1, PortSide::East);
    let p2 = g.add_port(s2, PortSide::East);
    let i1 = g.add_port(t1, PortSide::West);
    let i2 = g.add_port(t2, PortSide::West);
    g.connect(p1, i1);
    g.connect(p2, i2);

    long_edge_splitter::run(&mut g).unwrap();
    hyperedge_dummy_merger::run(&mut g).unwrap();

    assert_eq!(g.layer_nodes(1).len(), 2);
}

#[test]
fn identify_hyperedges_joins_ports_through_long_edge_dummies() {
    let mut g = layered_graph(3);
    let s = node(&mut g, 0);
    let t = node(&mut g, 2);
    let lonely = node(&mut g, 2);
    let p = g.add_port(s, PortSide::East);
    let lonely_port = g.add_port(lonely, PortSide::West);
    let (d, _, second) = dummy_between(&mut g, p, t);

    let ids = hyperedge_dummy_merger::identify_hyperedges(&g);

    let target = g.target_port(second).unwrap();
    for &port in g[d].ports() {
        assert_eq!(ids[&port], ids[&p]);
    }
    assert_eq!(ids[&target], ids[&p]);
    assert_ne!(ids[&lonely_port], ids[&p]);
}

#[test]
fn label_chains_merge_on_a_shared_source_before_the_label_dummy() {
    let mut g = layered_graph(3);
    let s = node(&mut g, 0);
    let t = node(&mut g, 2);
    let p = g.add_port(s, PortSide::East);
    let (d1, _, _) = dummy_between(&mut g, p, t);
    let (d2, _, _) = dummy_between(&mut g, p, t);
    for d in [d1, d2] {
        g[d].provenance.long_edge_has_label_dummies = true;
        g[d].provenance.long_edge_before_label_dummy = true;
    }
    let ids = hyperedge_dummy_merger::identify_hyperedges(&g);
    assert!(hyperedge_dummy_merger::can_merge(&g, &ids, d1, d2));

    // One of them already passed its label dummy.
    g[d2].provenance.long_edge_before_label_dummy = false;
    assert!(!hyperedge_dummy_merger::can_merge(&g, &ids, d1, d2));
}

#[test]
fn label_chains_merge_on_a_shared_target_after_the_label_dummy() {
    let mut g = layered_graph(3);
    let s1 = node(&mut g, 0);
    let s2 = node(&mut g, 0);
    let t = node(&mut g, 2);
    let p1 = g.add_port(s1, PortSide::East);
    let p2 = g.add_port(s2, PortSide::East);
    let (d1, _, _) = dummy_between(&mut g, p1, t);
    let (d2, _, _) = dummy_between(&mut g, p2, t);
    let shared = g[d1].provenance.long_edge_target;
    g[d2].provenance.long_edge_target = shared;
    g[d1].provenance.long_edge_has_label_dummies = true;

    let ids = hyperedge_dummy_merger::identify_hyperedges(&g);
    // d2 has no label dummy and counts as being after one.
    assert!(hyperedge_dummy_merger::can_merge(&g, &ids, d1, d2));

    g[d1].provenance.long_edge_before_label_dummy = true;
    assert!(!hyperedge_dummy_merger::can_merge(&g, &ids, d1, d2));
}

#[test]
fn missing_provenance_never_counts_as_shared() {
    let mut g = layered_graph(3);
    let s = node(&mut g, 0);
    let t = node(&mut g, 2);
    let p = g.add_port(s, PortSide::East);
    let (d1, _, _) = dummy_between(&mut g, p, t);
    let (d2, _, _) = dummy_between(&mut g, p, t);
    for d in [d1, d2] {
        g[d].provenance.long_edge_source = None;
        g[d].provenance.long_edge_target = None;
    }
    g[d1].provenance.long_edge_has_label_dummies = true;

    let ids = hyperedge_dummy_merger::identify_hyperedges(&g);
    assert!(!hyperedge_dummy_merger::can_merge(&g, &ids, d1, d2));
}

/// Known edge case: eligibility only looks at the before/after flags, not at which label dummy
/// a chain runs through. Two chains with different label dummies but a shared source are merged.
#[test]
fn chains_through_different_label_dummies_are_still_merged() {
    let mut g = layered_graph(4);
    let s = node(&mut g, 0);
    let t1 = node(&mut g, 3);
    let t2 = node(&mut g, 3);
    let p = g.add_port(s, PortSide::East);

    let mut label_dummies = Vec::new();
    for t in [t1, t2] {
        let (d, _, second) = dummy_between(&mut g, p, t);
        let label = g.add_node_to_layer(Node::new(NodeKind::Label), 2).unwrap();
        let lw = g.add_port(label, PortSide::West);
        let le = g.add_port(label, PortSide::East);
        let target = g.target_port(second).unwrap();
        g.set_target(second, Some(lw));
        g.connect(le, target);
        g[d].provenance.long_edge_has_label_dummies = true;
        g[d].provenance.long_edge_before_label_dummy = true;
        label_dummies.push(label);
    }
    assert_ne!(label_dummies[0], label_dummies[1]);

    hyperedge_dummy_merger::run(&mut g).unwrap();

    assert_eq!(g.layer_nodes(1).len(), 1);
    assert_eq!(g.layer_nodes(2).len(), 2);
    let d = g.layer_nodes(1)[0];
    let targets: Vec<NodeId> = g
        .outgoing_edges(d)
        .into_iter()
        .map(|e| g.target_node(e).unwrap())
        .collect();
    assert_eq!(targets, label_dummies);
}

#[test]
fn label_dummies_are_never_merged() {
    let mut g = layered_graph(3);
    let s = node(&mut g, 0);
    let t = node(&mut g, 2);
    let p = g.add_port(s, PortSide::East);
    let (d1, _, _) = dummy_between(&mut g, p, t);
    let (d2, _, _) = dummy_between(&mut g, p, t);
    g[d1].kind = NodeKind::Label;
    g[d2].kind = NodeKind::Label;

    hyperedge_dummy_merger::run(&mut g).unwrap();

    assert_eq!(g.layer_nodes(1), &[d1, d2]);
}
