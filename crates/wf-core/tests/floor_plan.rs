//! Integration tests: persisted floor → navigation → export (wf-core).
//!
//! Loads a stale document (string counter, ad-hoc edge ids, a dangling
//! edge) and checks every consumer sees the repaired graph.

use pretty_assertions::assert_eq;
use wf_core::persist::{from_json, to_json};
use wf_core::store;
use wf_core::{Counters, Heading, NodeId, NodeKind, Point, adjacency_from_graph, connections, shortest_path};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn floor() -> wf_core::Document {
    init();
    from_json(include_str!("fixtures/floor.json")).unwrap()
}

fn id(s: &str) -> NodeId {
    NodeId::intern(s)
}

// ─── Load ───────────────────────────────────────────────────────────────

#[test]
fn stale_document_is_repaired() {
    let doc = floor();
    assert_eq!(doc.graph.nodes.len(), 6);
    assert_eq!(doc.graph.edges.len(), 6, "dangling p1-p9 must be dropped");
    assert_eq!(
        doc.counters,
        Counters {
            path_next: 4,
            room_next: 2
        }
    );
    let edge_ids: Vec<&str> = doc.graph.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(edge_ids, vec!["p0-p1", "p1-p2", "p2-p3", "p0-p3", "p1-r0", "p2-r1"]);
}

#[test]
fn new_ids_do_not_collide_after_load() {
    let doc = floor();
    let (node, _, counters) =
        store::add_node(&doc.graph.nodes, NodeKind::Room, Point::new(0.0, -60.0), doc.counters);
    assert_eq!(node.id.as_str(), "r2");
    assert_eq!(node.label, "Room 2");
    assert_eq!(counters.room_next, 3);
    assert!(!doc.graph.contains_node(node.id));
}

#[test]
fn save_and_reload_is_lossless() {
    let doc = floor();
    let text = to_json(&doc).unwrap();
    assert_eq!(from_json(&text).unwrap(), doc);
}

// ─── Navigation ─────────────────────────────────────────────────────────

#[test]
fn route_between_rooms_reads_as_headings() {
    let doc = floor();
    let adjacency = adjacency_from_graph(&doc.graph);
    assert_eq!(adjacency.node_count(), 6);
    assert_eq!(adjacency.link_count(), 12);

    let route = shortest_path(&adjacency, id("r0"), id("r1"));
    assert_eq!(route.path, vec![id("r0"), id("p1"), id("p2"), id("r1")]);
    assert_eq!(
        route.directions,
        vec![Heading::South, Heading::South, Heading::East]
    );
    assert_eq!(route.distance, 3.0);
}

#[test]
fn removing_a_corridor_reroutes() {
    let mut doc = floor();
    let (nodes, edges) = store::remove_node(&doc.graph.nodes, &doc.graph.edges, id("p2"));
    doc.graph.nodes = nodes;
    doc.graph.edges = edges;

    let adjacency = adjacency_from_graph(&doc.graph);
    assert!(!shortest_path(&adjacency, id("r0"), id("r1")).is_reachable());

    let route = shortest_path(&adjacency, id("r0"), id("p3"));
    assert_eq!(route.path, vec![id("r0"), id("p1"), id("p0"), id("p3")]);
    assert_eq!(
        route.directions,
        vec![Heading::South, Heading::West, Heading::South]
    );
}

#[test]
fn routes_by_length_prefer_short_corridors() {
    let doc = floor();
    let adjacency = adjacency_from_graph(&doc.graph);
    let position = |n: NodeId| doc.graph.node(n).map(|n| n.position).unwrap_or(Point::ZERO);
    let route = wf_core::shortest_path_by(&adjacency, id("p0"), id("r1"), |a, b, _| {
        position(a).distance(position(b))
    });
    assert!(route.is_reachable());
    assert_eq!(route.hops(), 3);
    assert!((route.distance - 300.0).abs() < 1e-9);
}

// ─── Export ─────────────────────────────────────────────────────────────

#[test]
fn connections_follow_kind_rules() {
    let doc = floor();
    let records = connections(&doc.graph);
    assert_eq!(records.len(), 10);

    let into_rooms: Vec<(&str, &str, u32, u64)> = records
        .iter()
        .filter(|c| c.to.as_str().starts_with('r'))
        .map(|c| (c.from.as_str(), c.to.as_str(), c.angle, c.distance))
        .collect();
    assert_eq!(into_rooms, vec![("p1", "r0", 90, 60), ("p2", "r1", 0, 100)]);
    assert!(records.iter().all(|c| !c.from.as_str().starts_with('r')));
}
