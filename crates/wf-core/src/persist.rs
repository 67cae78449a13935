//! Persisted document format: load with recovery, save canonically.
//!
//! ```json
//! {
//!   "nodes": [{ "id": "p0", "type": "pathNode", "x": 10, "y": 20, "label": "Path 0" }],
//!   "edges": [{ "id": "p0-r0", "from": "p0", "to": "r0" }],
//!   "nodeCounter": 1,
//!   "roomCounter": 1
//! }
//! ```
//!
//! Only structurally broken JSON is an error. Everything else a stale or
//! hand-edited document can get wrong is repaired on load, with a warning:
//!
//! - missing, negative, fractional or non-numeric counters are recomputed as
//!   `max(id ordinal of that kind) + 1`; explicit counters below that bound
//!   are raised to it so new ids never collide
//! - a counter of `u64::MAX` is treated as non-numeric
//! - nodes without an id or a numeric position, or whose ordinal is
//!   `u64::MAX`, are dropped, later
//!   duplicates of an id are dropped, an unknown `type` is inferred from the
//!   id prefix
//! - self loops, dangling edges and repeated pairs are dropped; edge ids are
//!   re-derived from their endpoints

use crate::id::NodeId;
use crate::model::{Counters, Edge, Graph, Node, NodeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// A graph together with its id counters, the unit of load/save.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub graph: Graph,
    pub counters: Counters,
}

impl Document {
    pub fn new(graph: Graph, counters: Counters) -> Self {
        Self { graph, counters }
    }
}

// ─── Wire records ────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<RawEdge>,
    #[serde(default, rename = "nodeCounter")]
    node_counter: Value,
    #[serde(default, rename = "roomCounter")]
    room_counter: Value,
}

#[derive(Deserialize)]
struct RawNode {
    #[serde(default)]
    id: Value,
    #[serde(default, rename = "type")]
    kind: Value,
    #[serde(default)]
    x: Value,
    #[serde(default)]
    y: Value,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Deserialize)]
struct RawEdge {
    #[serde(default)]
    from: Value,
    #[serde(default)]
    to: Value,
}

#[derive(Serialize)]
struct NodeRecord<'a> {
    id: NodeId,
    #[serde(rename = "type")]
    kind: NodeKind,
    x: f64,
    y: f64,
    label: &'a str,
}

#[derive(Serialize)]
struct EdgeRecord {
    id: String,
    from: NodeId,
    to: NodeId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRecord<'a> {
    nodes: Vec<NodeRecord<'a>>,
    edges: Vec<EdgeRecord>,
    node_counter: u64,
    room_counter: u64,
}

// ─── Load ────────────────────────────────────────────────────────────────

/// Ids may arrive as strings or bare numbers.
fn id_of(value: &Value) -> Option<NodeId> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(NodeId::intern(s.trim())),
        Value::Number(n) => Some(NodeId::intern(&n.to_string())),
        _ => None,
    }
}

/// `u64::MAX` is refused: no id could ever be allocated past it.
fn counter_of(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return (n < u64::MAX).then_some(n);
    }
    let f = value.as_f64()?;
    (f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64).then_some(f as u64)
}

/// An id whose ordinal is `u64::MAX` would leave its counter nowhere to go.
fn exhausts_counter(id: NodeId) -> bool {
    [NodeKind::Path, NodeKind::Room]
        .iter()
        .any(|kind| id.ordinal(kind.prefix()) == Some(u64::MAX))
}

fn kind_of(value: &Value, id: NodeId) -> NodeKind {
    if let Some(kind) = value.as_str().and_then(NodeKind::from_wire) {
        return kind;
    }
    let inferred = if id.as_str().starts_with(NodeKind::Room.prefix()) {
        NodeKind::Room
    } else {
        NodeKind::Path
    };
    log::warn!(
        "node {id} has unknown type {value}, treating it as {}",
        inferred.as_str()
    );
    inferred
}

fn nodes_from(raw: Vec<RawNode>) -> Vec<Node> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::with_capacity(raw.len());
    for r in raw {
        let Some(id) = id_of(&r.id) else {
            log::warn!("dropping node without a usable id: {}", r.id);
            continue;
        };
        let (Some(x), Some(y)) = (r.x.as_f64(), r.y.as_f64()) else {
            log::warn!("dropping node {id}: position is not numeric");
            continue;
        };
        if exhausts_counter(id) {
            log::warn!("dropping node {id}: ordinal is out of range");
            continue;
        }
        if !seen.insert(id) {
            log::warn!("dropping duplicate node {id}");
            continue;
        }
        let mut node = Node::new(id, kind_of(&r.kind, id), Point::new(x, y));
        if let Some(label) = r.label {
            node.label = label;
        }
        nodes.push(node);
    }
    nodes
}

fn edges_from(raw: Vec<RawEdge>, nodes: &[Node]) -> Vec<Edge> {
    let known: HashSet<NodeId> = nodes.iter().map(|n| n.id).collect();
    let mut edges: Vec<Edge> = Vec::with_capacity(raw.len());
    for r in raw {
        let (Some(from), Some(to)) = (id_of(&r.from), id_of(&r.to)) else {
            log::warn!("dropping edge with unusable endpoints {} -> {}", r.from, r.to);
            continue;
        };
        if from == to {
            log::warn!("dropping self loop on {from}");
            continue;
        }
        if !known.contains(&from) || !known.contains(&to) {
            log::warn!("dropping dangling edge {from} -> {to}");
            continue;
        }
        if edges.iter().any(|e| e.connects(from, to)) {
            log::warn!("dropping duplicate edge {from} -> {to}");
            continue;
        }
        edges.push(Edge::new(from, to));
    }
    edges
}

fn resolve_counter(value: &Value, nodes: &[Node], kind: NodeKind) -> u64 {
    let floor = Counters::recompute_for(nodes, kind);
    match counter_of(value) {
        Some(n) if n >= floor => n,
        Some(n) => {
            log::warn!("{} counter {n} would reuse ids, raising to {floor}", kind.as_str());
            floor
        }
        None => {
            if !value.is_null() {
                log::warn!("{} counter {value} is not a count, recomputing", kind.as_str());
            }
            floor
        }
    }
}

/// Parse and repair a persisted document.
///
/// # Errors
/// Returns a message when `text` is not JSON or its top level is not a
/// document object.
pub fn from_json(text: &str) -> Result<Document, String> {
    let raw: RawDocument =
        serde_json::from_str(text).map_err(|e| format!("invalid graph document: {e}"))?;

    let nodes = nodes_from(raw.nodes);
    let edges = edges_from(raw.edges, &nodes);
    let counters = Counters {
        path_next: resolve_counter(&raw.node_counter, &nodes, NodeKind::Path),
        room_next: resolve_counter(&raw.room_counter, &nodes, NodeKind::Room),
    };

    log::debug!(
        "loaded {} nodes, {} edges, counters {:?}",
        nodes.len(),
        edges.len(),
        counters
    );
    Ok(Document::new(Graph { nodes, edges }, counters))
}

/// Like [`from_json`], but a broken document yields an empty one.
pub fn load_or_default(text: &str) -> Document {
    from_json(text).unwrap_or_else(|e| {
        log::error!("{e}; starting from an empty graph");
        Document::default()
    })
}

// ─── Save ────────────────────────────────────────────────────────────────

/// Serialize a document in the persisted format.
///
/// # Errors
/// Propagates serializer failures as a message.
pub fn to_json(document: &Document) -> Result<String, String> {
    let record = DocumentRecord {
        nodes: document
            .graph
            .nodes
            .iter()
            .map(|n| NodeRecord {
                id: n.id,
                kind: n.kind,
                x: n.position.x,
                y: n.position.y,
                label: &n.label,
            })
            .collect(),
        edges: document
            .graph
            .edges
            .iter()
            .map(|e| EdgeRecord {
                id: e.id.as_str().to_string(),
                from: e.from,
                to: e.to,
            })
            .collect(),
        node_counter: document.counters.path_next,
        room_counter: document.counters.room_next,
    };
    serde_json::to_string_pretty(&record).map_err(|e| format!("cannot serialize graph: {e}"))
}
