//! Shortest-route resolver over a labelled navigation adjacency.
//!
//! The adjacency is directed: every entry is a traversal from one node to a
//! neighbour tagged with the heading a walker takes. It may be asymmetric
//! even though floor-graph edges are undirected, because headings depend on
//! which end you start from.
//!
//! The resolver is Dijkstra with a linear minimum scan (graphs are one
//! building floor, tens to a few hundred nodes). Unit cost per traversal is
//! the default; `shortest_path_by` accepts any non-negative cost function.

use crate::id::NodeId;
use petgraph::graphmap::DiGraphMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Cardinal heading attached to a directed traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Heading {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
}

impl Heading {
    pub const fn letter(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::East => 'E',
            Heading::South => 'S',
            Heading::West => 'W',
        }
    }

    pub const fn reverse(self) -> Self {
        match self {
            Heading::North => Heading::South,
            Heading::East => Heading::West,
            Heading::South => Heading::North,
            Heading::West => Heading::East,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Heading {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "N" | "n" => Ok(Heading::North),
            "E" | "e" => Ok(Heading::East),
            "S" | "s" => Ok(Heading::South),
            "W" | "w" => Ok(Heading::West),
            other => Err(format!("unknown heading '{other}', expected one of N, E, S, W")),
        }
    }
}

// ─── Adjacency ───────────────────────────────────────────────────────────

/// Directed, heading-labelled adjacency. Node iteration follows insertion
/// order. At most one traversal is kept per ordered pair; re-adding a pair
/// replaces its heading.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    graph: DiGraphMap<NodeId, Heading>,
}

impl Adjacency {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `node → [(neighbour, heading)]` lists.
    ///
    /// Every listed key joins the node domain in list order before any
    /// traversal is added, so nodes with no outgoing entries still count.
    pub fn from_lists<I, L>(lists: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, L)>,
        L: IntoIterator<Item = (NodeId, Heading)>,
    {
        let lists: Vec<(NodeId, L)> = lists.into_iter().collect();
        let mut adjacency = Self::new();
        for (id, _) in &lists {
            adjacency.add_node(*id);
        }
        for (id, links) in lists {
            for (neighbor, heading) in links {
                adjacency.add_link(id, neighbor, heading);
            }
        }
        adjacency
    }

    pub fn add_node(&mut self, id: NodeId) {
        self.graph.add_node(id);
    }

    /// Add the traversal `from → to` walking `heading`. Unknown endpoints
    /// join the node domain.
    pub fn add_link(&mut self, from: NodeId, to: NodeId, heading: Heading) {
        self.graph.add_edge(from, to, heading);
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.graph.contains_node(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.nodes()
    }

    /// Outgoing traversals of `id`.
    pub fn links(&self, id: NodeId) -> impl Iterator<Item = (NodeId, Heading)> + '_ {
        self.graph.edges(id).map(|(_, to, heading)| (to, *heading))
    }

    pub fn heading(&self, from: NodeId, to: NodeId) -> Option<Heading> {
        self.graph.edge_weight(from, to).copied()
    }
}

// ─── Route ───────────────────────────────────────────────────────────────

/// Result of a route query.
///
/// An unreachable target is not an error: it yields an empty path, no
/// directions, and an infinite distance. Check `is_reachable`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub path: Vec<NodeId>,
    /// One heading per hop; `directions.len() == path.len() - 1` when reachable.
    pub directions: Vec<Heading>,
    pub distance: f64,
}

impl Route {
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            directions: Vec::new(),
            distance: f64::INFINITY,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }

    pub fn hops(&self) -> usize {
        self.directions.len()
    }
}

/// Shortest route by hop count.
pub fn shortest_path(adjacency: &Adjacency, start: NodeId, target: NodeId) -> Route {
    shortest_path_by(adjacency, start, target, |_, _, _| 1.0)
}

/// Shortest route under `cost(from, to, heading)`, which must be
/// non-negative.
pub fn shortest_path_by<F>(adjacency: &Adjacency, start: NodeId, target: NodeId, mut cost: F) -> Route
where
    F: FnMut(NodeId, NodeId, Heading) -> f64,
{
    if start == target {
        return Route {
            path: vec![start],
            directions: Vec::new(),
            distance: 0.0,
        };
    }

    let mut distances: HashMap<NodeId, f64> =
        adjacency.nodes().map(|id| (id, f64::INFINITY)).collect();
    distances.insert(start, 0.0);
    // Predecessor plus the heading used on the hop that set it.
    let mut previous: HashMap<NodeId, (NodeId, Heading)> = HashMap::new();
    let mut unvisited: Vec<NodeId> = adjacency.nodes().collect();

    loop {
        let mut best: Option<(usize, f64)> = None;
        for (i, id) in unvisited.iter().enumerate() {
            let d = distances[id];
            if best.is_none_or(|(_, b)| d < b) {
                best = Some((i, d));
            }
        }
        let Some((index, current_distance)) = best else {
            break;
        };
        if current_distance == f64::INFINITY {
            break;
        }
        let current = unvisited.remove(index);
        if current == target {
            break;
        }

        for (neighbor, heading) in adjacency.links(current) {
            let candidate = current_distance + cost(current, neighbor, heading);
            let known = distances.get(&neighbor).copied().unwrap_or(f64::INFINITY);
            if candidate < known {
                log::trace!("relax {current} -> {neighbor} ({heading}) = {candidate}");
                distances.insert(neighbor, candidate);
                previous.insert(neighbor, (current, heading));
            }
        }
    }

    if !previous.contains_key(&target) {
        return Route::unreachable();
    }

    let mut path = vec![target];
    let mut directions = Vec::new();
    let mut current = target;
    while current != start {
        let Some(&(prev, heading)) = previous.get(&current) else {
            break;
        };
        path.push(prev);
        directions.push(heading);
        current = prev;
    }
    path.reverse();
    directions.reverse();

    Route {
        path,
        directions,
        distance: distances[&target],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(n: u32) -> NodeId {
        NodeId::intern(&n.to_string())
    }

    /// Seven-node test floor.
    fn floor() -> Adjacency {
        use Heading::*;
        let lists: Vec<(u32, Vec<(u32, Heading)>)> = vec![
            (1, vec![(2, East), (7, South)]),
            (2, vec![(1, West), (3, North), (5, East)]),
            (3, vec![(2, South), (4, West)]),
            (4, vec![(3, West), (5, South)]),
            (5, vec![(2, West), (4, North), (6, South)]),
            (6, vec![(5, North), (7, West)]),
            (7, vec![(6, East), (1, North)]),
        ];
        Adjacency::from_lists(
            lists
                .into_iter()
                .map(|(n, links)| (id(n), links.into_iter().map(|(m, h)| (id(m), h)))),
        )
    }

    #[test]
    fn floor_route_is_three_hops() {
        let adjacency = floor();
        let route = shortest_path(&adjacency, id(1), id(4));
        assert_eq!(route.distance, 3.0);
        assert_eq!(route.path.len(), 4);
        assert_eq!(route.path.first(), Some(&id(1)));
        assert_eq!(route.path.last(), Some(&id(4)));
        assert_eq!(route.directions.len(), 3);
        // Every hop is a real traversal with its recorded heading.
        for (pair, heading) in route.path.windows(2).zip(&route.directions) {
            assert_eq!(adjacency.heading(pair[0], pair[1]), Some(*heading));
        }
    }

    #[test]
    fn start_equals_target() {
        let route = shortest_path(&floor(), id(1), id(1));
        assert_eq!(
            route,
            Route {
                path: vec![id(1)],
                directions: vec![],
                distance: 0.0,
            }
        );
    }

    #[test]
    fn unreachable_target() {
        let mut adjacency = floor();
        adjacency.add_node(id(8));
        let route = shortest_path(&adjacency, id(1), id(8));
        assert!(!route.is_reachable());
        assert!(route.path.is_empty());
        assert!(route.directions.is_empty());

        // Unknown ids behave the same way.
        assert!(!shortest_path(&adjacency, id(1), id(99)).is_reachable());
        assert!(!shortest_path(&adjacency, id(99), id(1)).is_reachable());
    }

    #[test]
    fn one_way_links_are_respected() {
        let a = NodeId::intern("oneway_a");
        let b = NodeId::intern("oneway_b");
        let mut adjacency = Adjacency::new();
        adjacency.add_link(a, b, Heading::East);
        assert_eq!(shortest_path(&adjacency, a, b).hops(), 1);
        assert!(!shortest_path(&adjacency, b, a).is_reachable());
    }

    #[test]
    fn weighted_costs_change_the_route() {
        let adjacency = floor();
        // Make every hop into 3 expensive: 1→2→5→4 must win.
        let route = shortest_path_by(&adjacency, id(1), id(4), |_, to, _| {
            if to == id(3) { 10.0 } else { 1.0 }
        });
        assert_eq!(route.path, vec![id(1), id(2), id(5), id(4)]);
        assert_eq!(
            route.directions,
            vec![Heading::East, Heading::East, Heading::North]
        );
        assert_eq!(route.distance, 3.0);
    }

    #[test]
    fn heading_parse_and_display() {
        assert_eq!("E".parse::<Heading>(), Ok(Heading::East));
        assert_eq!(" s ".parse::<Heading>(), Ok(Heading::South));
        assert!("NE".parse::<Heading>().is_err());
        assert_eq!(Heading::West.to_string(), "W");
        assert_eq!(Heading::North.reverse(), Heading::South);
    }
}
