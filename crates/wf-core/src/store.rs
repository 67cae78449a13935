//! Graph store: the mutation and query surface over nodes and edges.
//!
//! Every mutation takes the current collections by reference and returns new
//! ones, so a caller can keep the old value as an undo snapshot without any
//! copy-on-write bookkeeping. Rejected mutations (self loops, duplicate
//! pairs, unknown ids) are reported as `None` / returned unchanged rather than
//! as errors; they are normal interactive friction.

use crate::geometry::{distance, point_to_segment_distance};
use crate::id::{EdgeId, NodeId};
use crate::model::{Counters, Edge, Graph, Node, NodeKind};
use kurbo::Point;

// ─── Mutations ───────────────────────────────────────────────────────────

/// Allocate the next id for `kind`, append a node at `at`, and advance that
/// kind's counter.
pub fn add_node(
    nodes: &[Node],
    kind: NodeKind,
    at: Point,
    counters: Counters,
) -> (Node, Vec<Node>, Counters) {
    let ordinal = counters.next(kind);
    let id = NodeId::intern(&format!("{}{ordinal}", kind.prefix()));
    let node = Node::new(id, kind, at);

    let mut updated = Vec::with_capacity(nodes.len() + 1);
    updated.extend_from_slice(nodes);
    updated.push(node.clone());

    log::debug!("add {} {} at ({}, {})", kind.as_str(), id, at.x, at.y);
    (node, updated, counters.advanced(kind))
}

/// Remove a node and every edge touching it. Unknown ids return the inputs
/// unchanged.
pub fn remove_node(nodes: &[Node], edges: &[Edge], id: NodeId) -> (Vec<Node>, Vec<Edge>) {
    if !nodes.iter().any(|n| n.id == id) {
        return (nodes.to_vec(), edges.to_vec());
    }
    let kept_nodes: Vec<Node> = nodes.iter().filter(|n| n.id != id).cloned().collect();
    let kept_edges: Vec<Edge> = edges.iter().filter(|e| !e.touches(id)).copied().collect();
    log::debug!(
        "remove node {id} (cascaded {} edges)",
        edges.len() - kept_edges.len()
    );
    (kept_nodes, kept_edges)
}

/// Connect `from` and `to`.
///
/// Returns `None` when the edge is rejected: a self loop, an endpoint missing
/// from `nodes`, or a pair that is already connected in either direction.
pub fn add_edge(nodes: &[Node], edges: &[Edge], from: NodeId, to: NodeId) -> Option<Vec<Edge>> {
    if from == to {
        return None;
    }
    let present = |id: NodeId| nodes.iter().any(|n| n.id == id);
    if !present(from) || !present(to) {
        return None;
    }
    if edges.iter().any(|e| e.connects(from, to)) {
        return None;
    }

    let edge = Edge::new(from, to);
    log::debug!("add edge {}", edge.id);
    let mut updated = Vec::with_capacity(edges.len() + 1);
    updated.extend_from_slice(edges);
    updated.push(edge);
    Some(updated)
}

/// Remove an edge by id; unknown ids leave the collection unchanged.
pub fn remove_edge(edges: &[Edge], id: EdgeId) -> Vec<Edge> {
    edges.iter().filter(|e| e.id != id).copied().collect()
}

/// Return nodes with `id` repositioned to `to`.
pub fn move_node(nodes: &[Node], id: NodeId, to: Point) -> Vec<Node> {
    nodes
        .iter()
        .map(|n| {
            if n.id == id {
                Node {
                    position: to,
                    ..n.clone()
                }
            } else {
                n.clone()
            }
        })
        .collect()
}

// ─── Queries ─────────────────────────────────────────────────────────────

/// First node (in creation order) within `radius` of `point`.
pub fn find_node_near(nodes: &[Node], point: Point, radius: f64) -> Option<&Node> {
    nodes
        .iter()
        .find(|n| distance(n.position, point) <= radius)
}

/// First edge (in creation order) whose segment passes within `tolerance`
/// of `point`. Edges with a missing endpoint are never hit.
pub fn find_edge_near<'a>(
    nodes: &[Node],
    edges: &'a [Edge],
    point: Point,
    tolerance: f64,
) -> Option<&'a Edge> {
    let position = |id: NodeId| nodes.iter().find(|n| n.id == id).map(|n| n.position);
    edges.iter().find(|e| match (position(e.from), position(e.to)) {
        (Some(a), Some(b)) => point_to_segment_distance(point, a, b) <= tolerance,
        _ => false,
    })
}

/// Length of an edge in canvas units, or `None` if an endpoint is missing.
pub fn edge_length(graph: &Graph, edge: &Edge) -> Option<f64> {
    graph.endpoints(edge).map(|(a, b)| distance(a, b))
}

/// Case-insensitive substring search over node ids and labels, restricted
/// to one kind. A blank query matches nothing.
pub fn search_nodes<'a>(
    nodes: &'a [Node],
    kind: NodeKind,
    query: &str,
    limit: usize,
) -> Vec<&'a Node> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    nodes
        .iter()
        .filter(|n| n.kind == kind)
        .filter(|n| {
            n.id.as_str().to_lowercase().contains(&needle)
                || n.label.to_lowercase().contains(&needle)
        })
        .take(limit)
        .collect()
}
