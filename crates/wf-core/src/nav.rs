//! Geometry → heading translation.
//!
//! Builds the navigation adjacency the route resolver consumes from a floor
//! graph: every undirected edge becomes two traversals, each labelled with
//! the cardinal heading from its start node toward its end node.

use crate::model::Graph;
use crate::route::{Adjacency, Heading};
use kurbo::Point;

/// Heading of the dominant axis of `to - from`.
///
/// Canvas y grows downward, so a negative dy is North. Equal magnitudes
/// resolve to the horizontal axis.
pub fn heading_between(from: Point, to: Point) -> Heading {
    let d = to - from;
    if d.x.abs() >= d.y.abs() {
        if d.x >= 0.0 { Heading::East } else { Heading::West }
    } else if d.y < 0.0 {
        Heading::North
    } else {
        Heading::South
    }
}

/// Navigation adjacency for `graph`. Nodes keep creation order; edges with
/// a missing endpoint are skipped.
pub fn adjacency_from_graph(graph: &Graph) -> Adjacency {
    let mut adjacency = Adjacency::new();
    for node in &graph.nodes {
        adjacency.add_node(node.id);
    }
    for edge in &graph.edges {
        let Some((a, b)) = graph.endpoints(edge) else {
            log::warn!("skipping dangling edge {} in navigation view", edge.id);
            continue;
        };
        adjacency.add_link(edge.from, edge.to, heading_between(a, b));
        adjacency.add_link(edge.to, edge.from, heading_between(b, a));
    }
    adjacency
}
