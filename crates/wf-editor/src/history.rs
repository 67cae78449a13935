//! Undo history of graph snapshots.
//!
//! Every committed edit pushes a full copy of the graph. The cursor points
//! at the snapshot matching the live graph; undo steps it back and hands
//! out the earlier snapshot. Pushing after an undo discards the snapshots
//! past the cursor, so forward history is never recoverable.
//!
//! Drag gestures are collapsed by the editor, not here: it pushes once on
//! pointer-up, and only when the graph actually changed.

use wf_core::Graph;

pub struct History {
    snapshots: Vec<Graph>,
    /// `None` while empty.
    cursor: Option<usize>,
    /// Oldest snapshots are dropped beyond this many.
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: None,
            max_depth: max_depth.max(1),
        }
    }

    /// Record `snapshot` as the newest state.
    pub fn push(&mut self, snapshot: Graph) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(snapshot);

        if self.snapshots.len() > self.max_depth {
            let excess = self.snapshots.len() - self.max_depth;
            self.snapshots.drain(..excess);
        }
        self.cursor = Some(self.snapshots.len() - 1);
        log::debug!(
            "history push: {} snapshots, cursor {}",
            self.snapshots.len(),
            self.snapshots.len() - 1
        );
    }

    /// Step back one snapshot. `None` when there is nothing older.
    pub fn undo(&mut self) -> Option<&Graph> {
        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        log::debug!("history undo: cursor {cursor}");
        self.snapshots.get(cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Drop everything and start over from `baseline`.
    pub fn reset(&mut self, baseline: Graph) {
        self.snapshots.clear();
        self.cursor = None;
        self.push(baseline);
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&Graph> {
        self.snapshots.get(self.cursor?)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wf_core::{Node, NodeId, NodeKind, Point};

    fn graph_with(count: usize) -> Graph {
        Graph {
            nodes: (0..count)
                .map(|i| {
                    let id = NodeId::intern(&format!("p{i}"));
                    Node::new(id, NodeKind::Path, Point::new(i as f64 * 10.0, 0.0))
                })
                .collect(),
            edges: Vec::new(),
        }
    }

    #[test]
    fn empty_history_cannot_undo() {
        let mut history = History::new(10);
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), None);
        assert!(history.is_empty());
    }

    #[test]
    fn single_snapshot_cannot_undo() {
        let mut history = History::new(10);
        history.push(graph_with(0));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn undo_walks_back() {
        let mut history = History::new(10);
        for n in 0..3 {
            history.push(graph_with(n));
        }
        assert_eq!(history.undo(), Some(&graph_with(1)));
        assert_eq!(history.undo(), Some(&graph_with(0)));
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn push_after_undo_discards_future() {
        let mut history = History::new(10);
        for n in 0..3 {
            history.push(graph_with(n));
        }
        history.undo();
        history.undo();
        history.push(graph_with(5));
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(&graph_with(5)));
        assert_eq!(history.undo(), Some(&graph_with(0)));
    }

    #[test]
    fn depth_limit_drops_oldest() {
        let mut history = History::new(3);
        for n in 0..5 {
            history.push(graph_with(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(history.undo(), Some(&graph_with(3)));
        assert_eq!(history.undo(), Some(&graph_with(2)));
        assert!(!history.can_undo());
    }

    #[test]
    fn reset_keeps_only_baseline() {
        let mut history = History::new(10);
        for n in 0..4 {
            history.push(graph_with(n));
        }
        history.reset(graph_with(7));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some(&graph_with(7)));
        assert!(!history.can_undo());
    }
}
