//! Core floor-graph data model.
//!
//! A floor graph is a flat set of nodes (path waypoints and rooms) placed in
//! canvas space, plus undirected edges between them. Directional semantics
//! are never stored on an edge; they are derived from node positions when a
//! navigation adjacency or an export is built.

use crate::id::{EdgeId, NodeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

// ─── Nodes ───────────────────────────────────────────────────────────────

/// The two kinds of node on a floor graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Routing waypoint.
    #[serde(rename = "pathNode")]
    Path,
    /// Destination (room / location).
    #[serde(rename = "roomNode")]
    Room,
}

impl NodeKind {
    /// One-character id prefix (`p3`, `r7`).
    pub const fn prefix(self) -> char {
        match self {
            NodeKind::Path => 'p',
            NodeKind::Room => 'r',
        }
    }

    /// Human-readable label stem used for freshly created nodes.
    pub const fn label_stem(self) -> &'static str {
        match self {
            NodeKind::Path => "Path",
            NodeKind::Room => "Room",
        }
    }

    /// Wire name used by the persisted document.
    pub const fn as_str(self) -> &'static str {
        match self {
            NodeKind::Path => "pathNode",
            NodeKind::Room => "roomNode",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "pathNode" => Some(NodeKind::Path),
            "roomNode" => Some(NodeKind::Room),
            _ => None,
        }
    }
}

/// A single node on the floor graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Immutable after creation.
    pub id: NodeId,
    pub kind: NodeKind,
    /// Logical canvas-space position (mutable by drag).
    pub position: Point,
    pub label: String,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, position: Point) -> Self {
        let label = match id.ordinal(kind.prefix()) {
            Some(n) => format!("{} {n}", kind.label_stem()),
            None => id.as_str().to_string(),
        };
        Self {
            id,
            kind,
            position,
            label,
        }
    }
}

// ─── Edges ───────────────────────────────────────────────────────────────

/// An undirected connection between two nodes.
///
/// `from`/`to` record the order the user drew them in; identity and dedup
/// use the unordered pair. Endpoints are fixed for the edge's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            id: EdgeId::between(from, to),
            from,
            to,
        }
    }

    /// Whether this edge has `id` as either endpoint.
    pub fn touches(&self, id: NodeId) -> bool {
        self.from == id || self.to == id
    }

    /// Whether this edge joins the unordered pair `{a, b}`.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// The endpoint opposite `id`, if `id` is an endpoint.
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.from == id {
            Some(self.to)
        } else if self.to == id {
            Some(self.from)
        } else {
            None
        }
    }
}

// ─── Counters ────────────────────────────────────────────────────────────

/// Next ordinal for each node kind. Threaded explicitly through
/// `store::add_node` and persisted with the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    pub path_next: u64,
    pub room_next: u64,
}

impl Counters {
    pub fn next(&self, kind: NodeKind) -> u64 {
        match kind {
            NodeKind::Path => self.path_next,
            NodeKind::Room => self.room_next,
        }
    }

    /// Return counters with `kind`'s ordinal advanced by one, saturating
    /// at `u64::MAX`.
    #[must_use]
    pub fn advanced(self, kind: NodeKind) -> Self {
        match kind {
            NodeKind::Path => Self {
                path_next: self.path_next.saturating_add(1),
                ..self
            },
            NodeKind::Room => Self {
                room_next: self.room_next.saturating_add(1),
                ..self
            },
        }
    }

    /// `max(ordinal of ids with that kind's prefix) + 1`, or 0 when there
    /// are none. The node's own kind is not consulted, so a mistyped `p9`
    /// room still blocks `p9`. Ids without a numeric suffix are ignored; an
    /// ordinal of `u64::MAX` yields `u64::MAX`.
    pub fn recompute_for(nodes: &[Node], kind: NodeKind) -> u64 {
        nodes
            .iter()
            .filter_map(|n| n.id.ordinal(kind.prefix()))
            .max()
            .map_or(0, |max| max.checked_add(1).unwrap_or(u64::MAX))
    }

    pub fn recompute(nodes: &[Node]) -> Self {
        Self {
            path_next: Self::recompute_for(nodes, NodeKind::Path),
            room_next: Self::recompute_for(nodes, NodeKind::Room),
        }
    }
}

// ─── Graph snapshot ──────────────────────────────────────────────────────

/// The complete floor graph: nodes in creation order plus edges.
///
/// Values are plain data; the store functions return new collections and
/// the history manager keeps clones of this struct as snapshots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Nodes sharing an edge with `id`, in edge order.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().filter_map(move |e| e.other(id))
    }

    /// Endpoint positions of an edge, or `None` if either endpoint is missing.
    pub fn endpoints(&self, edge: &Edge) -> Option<(Point, Point)> {
        let from = self.node(edge.from)?;
        let to = self.node(edge.to)?;
        Some((from.position, to.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, kind: NodeKind) -> Node {
        Node::new(NodeId::intern(id), kind, Point::ZERO)
    }

    #[test]
    fn default_labels_follow_kind() {
        assert_eq!(node("p3", NodeKind::Path).label, "Path 3");
        assert_eq!(node("r0", NodeKind::Room).label, "Room 0");
        assert_eq!(node("lobby", NodeKind::Room).label, "lobby");
    }

    #[test]
    fn counters_recompute_per_kind() {
        let nodes = vec![
            node("p0", NodeKind::Path),
            node("p4", NodeKind::Path),
            node("r1", NodeKind::Room),
            node("pX", NodeKind::Path),
        ];
        let counters = Counters::recompute(&nodes);
        assert_eq!(counters.path_next, 5);
        assert_eq!(counters.room_next, 2);
        assert_eq!(Counters::recompute(&[]), Counters::default());
    }

    #[test]
    fn advanced_only_touches_one_kind() {
        let c = Counters {
            path_next: 2,
            room_next: 7,
        };
        let c = c.advanced(NodeKind::Room);
        assert_eq!(c.path_next, 2);
        assert_eq!(c.room_next, 8);
    }

    #[test]
    fn counters_saturate_instead_of_overflowing() {
        let full = Counters {
            path_next: u64::MAX,
            room_next: 0,
        };
        assert_eq!(full.advanced(NodeKind::Path).path_next, u64::MAX);
        let nodes = vec![node("r18446744073709551615", NodeKind::Room)];
        assert_eq!(Counters::recompute_for(&nodes, NodeKind::Room), u64::MAX);
    }

    #[test]
    fn edge_helpers() {
        let a = NodeId::intern("p1");
        let b = NodeId::intern("p2");
        let e = Edge::new(b, a);
        assert!(e.connects(a, b));
        assert!(e.touches(a));
        assert_eq!(e.other(a), Some(b));
        assert_eq!(e.other(NodeId::intern("p9")), None);
        assert_eq!(e.id.as_str(), "p1-p2");
    }
}
