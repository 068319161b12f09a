use sirenia_lgraph::{
    Direction, EdgeProperties, GraphError, LGraph, LayoutOptions, Node, NodeKind, PortSide,
    Vector,
};

fn two_layer_graph() -> (LGraph, [sirenia_lgraph::NodeId; 2]) {
    let mut g = LGraph::new(LayoutOptions::default());
    g.add_layer();
    g.add_layer();
    let a = g.add_node_to_layer(Node::new(NodeKind::Normal), 0).unwrap();
    let b = g.add_node_to_layer(Node::new(NodeKind::Normal), 1).unwrap();
    (g, [a, b])
}

#[test]
fn add_node_to_missing_layer_fails() {
    let mut g = LGraph::new(LayoutOptions::default());
    g.add_layer();
    let err = g
        .add_node_to_layer(Node::new(NodeKind::Normal), 3)
        .unwrap_err();
    assert_eq!(err, GraphError::MissingLayer { index: 3, count: 1 });
}

#[test]
fn set_layer_reparents_instead_of_copying() {
    let (mut g, [a, b]) = two_layer_graph();
    g.set_layer(a, Some(1)).unwrap();

    assert!(g.layer_nodes(0).is_empty());
    assert_eq!(g.layer_nodes(1), &[b, a]);
    assert_eq!(g.layer_of(a).unwrap(), 1);

    g.move_to_layerless(a);
    assert_eq!(g.layer_nodes(1), &[b]);
    assert_eq!(g.layerless_nodes(), &[a]);
    assert_eq!(g.layer_of(a), Err(GraphError::NotLayered { node: a }));
}

#[test]
fn insert_into_layer_clamps_the_position() {
    let (mut g, [a, b]) = two_layer_graph();
    let c = g.add_node_to_layer(Node::new(NodeKind::Normal), 1).unwrap();

    g.insert_into_layer(a, 1, 1).unwrap();
    assert_eq!(g.layer_nodes(1), &[b, a, c]);
    assert_eq!(g.position_in_layer(a), Some(1));

    g.insert_into_layer(b, 1, 99).unwrap();
    assert_eq!(g.layer_nodes(1), &[a, c, b]);
}

#[test]
fn port_migration_moves_the_port_with_its_edges() {
    let (mut g, [a, b]) = two_layer_graph();
    let out = g.add_port(a, PortSide::East);
    let inp = g.add_port(b, PortSide::West);
    let e = g.connect(out, inp);

    let c = g.add_node_to_layer(Node::new(NodeKind::Normal), 0).unwrap();
    g.set_port_node(out, Some(c));

    assert!(g[a].ports().is_empty());
    assert_eq!(g[c].ports(), &[out]);
    assert_eq!(g.source_node(e).unwrap(), c);
    assert_eq!(g.outgoing_edges(c), vec![e]);
    assert!(g.outgoing_edges(a).is_empty());
}

#[test]
fn set_target_at_inserts_at_the_given_index() {
    let (mut g, [a, b]) = two_layer_graph();
    let out = g.add_port(a, PortSide::East);
    let inp = g.add_port(b, PortSide::West);
    let e1 = g.connect(out, inp);
    let e2 = g.connect(out, inp);

    let other = g.add_port(b, PortSide::West);
    let e3 = g.connect(out, other);
    g.set_target_at(e3, inp, 1).unwrap();

    assert_eq!(g[inp].incoming(), &[e1, e3, e2]);
    assert!(g[other].incoming().is_empty());
    assert_eq!(g.target_port(e3).unwrap(), inp);

    let err = g.set_target_at(e1, other, 5).unwrap_err();
    assert_eq!(
        err,
        GraphError::InvalidInsertIndex {
            edge: e1,
            port: other,
            index: 5,
            len: 0
        }
    );
}

#[test]
fn negative_thickness_is_clamped_and_written_back() {
    let (mut g, [a, b]) = two_layer_graph();
    let out = g.add_port(a, PortSide::East);
    let inp = g.add_port(b, PortSide::West);
    let e = g.add_edge_with(EdgeProperties::new(-3.0));
    g.set_source(e, Some(out));
    g.set_target(e, Some(inp));

    assert_eq!(g[e].props.raw_thickness(), -3.0);
    assert_eq!(g.edge_thickness(e), 0.0);
    assert_eq!(g[e].props.raw_thickness(), 0.0);
    assert_eq!(g.edge_thickness(e), 0.0);
}

#[test]
fn remove_node_drops_ports_and_attached_edges() {
    let (mut g, [a, b]) = two_layer_graph();
    let out = g.add_port(a, PortSide::East);
    let inp = g.add_port(b, PortSide::West);
    let e = g.connect(out, inp);

    g.remove_node(b);

    assert!(!g.contains_node(b));
    assert!(g.try_port(inp).is_none());
    assert!(g.try_edge(e).is_none());
    assert!(g[out].outgoing().is_empty());
    assert_eq!(g.layer_nodes(1), &[] as &[sirenia_lgraph::NodeId]);
    assert_eq!(g.node_count(), 1);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn detached_edge_ends_are_errors() {
    let (mut g, [a, _]) = two_layer_graph();
    let out = g.add_port(a, PortSide::East);
    let e = g.add_edge();
    g.set_source(e, Some(out));

    assert_eq!(g.source_node(e).unwrap(), a);
    assert!(matches!(
        g.target_port(e),
        Err(GraphError::DetachedEdge { .. })
    ));
    assert!(!g.is_self_loop(e));
}

#[test]
fn port_absolute_anchor_adds_node_port_and_anchor() {
    let (mut g, [a, _]) = two_layer_graph();
    let p = g.add_port(a, PortSide::East);
    g[a].position = Vector::new(10.0, 20.0);
    g[p].position = Vector::new(30.0, 4.0);
    g[p].anchor = Vector::new(1.0, 1.0);

    assert_eq!(g.port_absolute_anchor(p), Vector::new(41.0, 25.0));
}

#[test]
fn layout_options_read_camel_case_json_with_defaults() {
    let opts: LayoutOptions = serde_json::from_str(
        r#"{"direction":"DOWN","spacingEdgeLabel":5,"unnecessaryBendpoints":true}"#,
    )
    .unwrap();

    assert_eq!(opts.direction, Direction::Down);
    assert_eq!(opts.spacing_edge_label, 5.0);
    assert!(opts.unnecessary_bendpoints);
    assert_eq!(opts.spacing_node_node, 20.0);
    assert_eq!(opts.default_edge_thickness, 1.0);
}
