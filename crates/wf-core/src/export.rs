//! Directed connection records for graph-database export.
//!
//! This is the data contract an export writer consumes; the text syntax of
//! the export itself is left to that writer. Rules per edge:
//!
//! | endpoints      | records                      |
//! |----------------|------------------------------|
//! | path ↔ path    | both directions              |
//! | path ↔ room    | path → room only             |
//! | room ↔ room    | none                         |

use crate::id::{EdgeId, NodeId};
use crate::model::{Graph, NodeKind};
use kurbo::Point;
use serde::Serialize;
use std::collections::HashSet;

/// One directed `CONNECTS_TO` relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
    /// Bearing in whole degrees, `[0, 360)`, counter-clockwise from +x with
    /// y pointing up.
    pub angle: u32,
    /// Rounded canvas-space length.
    pub distance: u64,
}

/// Bearing of `to` seen from `from`, in degrees `[0, 360)`, unrounded.
pub fn bearing(from: Point, to: Point) -> f64 {
    let dx = to.x - from.x;
    // Canvas y grows downward; flip so angles read like a compass drawing.
    let dy = from.y - to.y;
    let angle = dy.atan2(dx).to_degrees();
    if angle < 0.0 { angle + 360.0 } else { angle }
}

fn whole_degrees(angle: f64) -> u32 {
    (angle.round() as u32) % 360
}

/// Connection records for every distinct edge of `graph`.
pub fn connections(graph: &Graph) -> Vec<Connection> {
    let mut seen: HashSet<EdgeId> = HashSet::new();
    let mut out = Vec::new();

    for edge in &graph.edges {
        let (Some(from), Some(to)) = (graph.node(edge.from), graph.node(edge.to)) else {
            continue;
        };
        if !seen.insert(edge.id) {
            continue;
        }

        let forward = bearing(from.position, to.position);
        let reverse = (forward + 180.0) % 360.0;
        let distance = from.position.distance(to.position).round() as u64;

        let forward = Connection {
            from: from.id,
            to: to.id,
            angle: whole_degrees(forward),
            distance,
        };
        let backward = Connection {
            from: to.id,
            to: from.id,
            angle: whole_degrees(reverse),
            distance,
        };

        match (from.kind, to.kind) {
            (NodeKind::Path, NodeKind::Path) => out.extend([forward, backward]),
            (NodeKind::Path, NodeKind::Room) => out.push(forward),
            (NodeKind::Room, NodeKind::Path) => out.push(backward),
            (NodeKind::Room, NodeKind::Room) => {}
        }
    }
    out
}
