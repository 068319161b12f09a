use sirenia::lgraph::{
    Direction, EdgeId, EdgeRouting, LGraph, Label, LabelId, LabelSide, LayoutOptions, Node,
    NodeId, NodeKind, PortSide, Vector,
};
use sirenia::{label_dummy_inserter, label_dummy_remover};

struct Fixture {
    g: LGraph,
    a: NodeId,
    b: NodeId,
    e: EdgeId,
    dummy: NodeId,
    labels: Vec<LabelId>,
}

/// `a -> b` with the given center labels, after label dummy insertion and a trivial layering
/// that puts the label dummy into the middle layer.
fn fixture(options: LayoutOptions, label_sizes: &[(f64, f64)]) -> Fixture {
    let mut g = LGraph::new(options);
    let a = g.add_layerless_node(Node::new(NodeKind::Normal));
    let b = g.add_layerless_node(Node::new(NodeKind::Normal));
    let out = g.add_port(a, PortSide::East);
    let inp = g.add_port(b, PortSide::West);
    let e = g.connect(out, inp);
    let labels: Vec<LabelId> = label_sizes
        .iter()
        .map(|&(w, h)| g.add_label(Label::new("l", w, h)))
        .collect();
    g[e].labels = labels.clone();

    label_dummy_inserter::run(&mut g).unwrap();
    let dummy = g.target_node(e).unwrap();

    for _ in 0..3 {
        g.add_layer();
    }
    g.set_layer(a, Some(0)).unwrap();
    g.set_layer(dummy, Some(1)).unwrap();
    g.set_layer(b, Some(2)).unwrap();

    Fixture {
        g,
        a,
        b,
        e,
        dummy,
        labels,
    }
}

#[test]
fn labels_below_the_edge_in_a_horizontal_layout() {
    let mut f = fixture(LayoutOptions::default(), &[(40.0, 20.0), (20.0, 10.0)]);
    let g = &mut f.g;
    assert_eq!(g[f.dummy].size, Vector::new(40.0, 33.0));
    g[f.dummy].position = Vector::new(100.0, 50.0);
    g[f.dummy].provenance.label_side = LabelSide::Below;

    label_dummy_remover::run(g).unwrap();

    // Shifted down by thickness (1) and edge-label spacing (2), centered horizontally.
    assert_eq!(g[f.labels[0]].position, Vector::new(100.0, 53.0));
    assert_eq!(g[f.labels[1]].position, Vector::new(110.0, 73.0));

    assert!(!g.contains_node(f.dummy));
    assert_eq!(g.source_node(f.e).unwrap(), f.a);
    assert_eq!(g.target_node(f.e).unwrap(), f.b);
    assert_eq!(g[f.e].labels, f.labels);
    assert_eq!(g.edge_count(), 1);
    assert!(g[f.e].bend_points.is_empty());
}

#[test]
fn labels_above_the_edge_start_at_the_dummy_top() {
    let mut f = fixture(LayoutOptions::default(), &[(40.0, 20.0)]);
    let g = &mut f.g;
    g[f.dummy].position = Vector::new(100.0, 50.0);
    g[f.dummy].provenance.label_side = LabelSide::Above;

    label_dummy_remover::run(g).unwrap();

    assert_eq!(g[f.labels[0]].position, Vector::new(100.0, 50.0));
}

#[test]
fn vertical_layouts_place_labels_side_by_side() {
    let options = LayoutOptions {
        direction: Direction::Down,
        ..Default::default()
    };
    let mut f = fixture(options, &[(40.0, 20.0), (30.0, 10.0)]);
    let g = &mut f.g;
    assert_eq!(g[f.dummy].size, Vector::new(70.0, 23.0));
    g[f.dummy].provenance.label_side = LabelSide::Above;

    label_dummy_remover::run(g).unwrap();

    assert_eq!(g[f.labels[0]].position, Vector::new(0.0, 0.0));
    assert_eq!(g[f.labels[1]].position, Vector::new(40.0, 10.0));
}

#[test]
fn upward_layouts_place_labels_in_reverse_order() {
    let options = LayoutOptions {
        direction: Direction::Up,
        ..Default::default()
    };
    let mut f = fixture(options, &[(40.0, 20.0), (30.0, 10.0)]);
    let g = &mut f.g;
    g[f.dummy].provenance.label_side = LabelSide::Above;

    label_dummy_remover::run(g).unwrap();

    assert_eq!(g[f.labels[1]].position, Vector::new(0.0, 10.0));
    assert_eq!(g[f.labels[0]].position, Vector::new(30.0, 0.0));
    // The edge keeps the original label order.
    assert_eq!(g[f.e].labels, f.labels);
}

#[test]
fn vertical_labels_below_the_edge_hug_it() {
    let options = LayoutOptions {
        direction: Direction::Down,
        ..Default::default()
    };
    let mut f = fixture(options, &[(40.0, 20.0), (30.0, 10.0)]);
    let g = &mut f.g;
    g[f.dummy].provenance.label_side = LabelSide::Below;

    label_dummy_remover::run(g).unwrap();

    assert_eq!(g[f.labels[0]].position, Vector::new(0.0, 3.0));
    assert_eq!(g[f.labels[1]].position, Vector::new(40.0, 3.0));
}

#[test]
fn polyline_routing_keeps_a_bend_point_at_the_dummy() {
    let options = LayoutOptions {
        edge_routing: EdgeRouting::Polyline,
        ..Default::default()
    };
    let mut f = fixture(options, &[(40.0, 20.0)]);
    let g = &mut f.g;
    g[f.dummy].position = Vector::new(100.0, 50.0);

    label_dummy_remover::run(g).unwrap();

    assert_eq!(g[f.e].bend_points, vec![Vector::new(100.0, 50.0)]);
}
