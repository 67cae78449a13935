//! Interaction state machine.
//!
//! `Editor` owns the live graph, its id counters, the undo history and the
//! view transform. Hosts feed it [`InputEvent`]s in screen pixels; every
//! handler returns the [`Change`]s it produced so a render loop knows what
//! to repaint. No handler fails: events that match nothing are no-ops.
//!
//! ## Pointer-down in canvas space (after snapping)
//!
//! | hit       | Select               | Create*            | ConnectEdge                 |
//! |-----------|----------------------|--------------------|-----------------------------|
//! | node      | select + start drag  | clear edge select  | begin / commit / cancel     |
//! | edge      | select edge          | create node        | nothing                     |
//! | nothing   | clear selection      | create node        | nothing                     |
//!
//! Middle button, or primary with Space held, pans in every mode instead.

use crate::config::EditorConfig;
use crate::history::History;
use crate::input::{InputEvent, Modifiers, PointerButton};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use kurbo::{Point, Size};
use smallvec::{SmallVec, smallvec};
use wf_core::geometry::snap_point;
use wf_core::store;
use wf_core::{
    Adjacency, Counters, Document, Edge, EdgeId, Graph, Node, NodeId, NodeKind, Route, Viewport,
    adjacency_from_graph, shortest_path,
};

/// Results shown per search query.
pub const SEARCH_LIMIT: usize = 5;

/// What a pointer press on the canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Select,
    CreatePathNode,
    CreateRoomNode,
    ConnectEdge,
}

impl EditorMode {
    /// Node kind created by a press on empty canvas, if any.
    pub const fn creates(self) -> Option<NodeKind> {
        match self {
            EditorMode::CreatePathNode => Some(NodeKind::Path),
            EditorMode::CreateRoomNode => Some(NodeKind::Room),
            EditorMode::Select | EditorMode::ConnectEdge => None,
        }
    }
}

/// Current selection. A node and an edge are never selected together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Node(NodeId),
    Edge(EdgeId),
}

/// Part of the editor state touched by a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nodes or edges changed.
    Graph,
    /// Zoom or pan changed.
    View,
    Selection,
    Mode,
    /// Pending-edge preview started, moved, or ended.
    Preview,
}

pub type Changes = SmallVec<[Change; 4]>;

pub struct Editor {
    graph: Graph,
    counters: Counters,
    history: History,
    viewport: Viewport,
    config: EditorConfig,
    mode: EditorMode,
    selection: Selection,
    /// First endpoint of a pending edge in `ConnectEdge` mode.
    drawing_from: Option<NodeId>,
    /// Last snapped canvas position of the pointer.
    pointer: Option<Point>,
    /// Node being dragged in `Select` mode.
    dragging: Option<NodeId>,
    /// Last screen position while panning.
    pan_from: Option<Point>,
    space_held: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_document(Document::default(), config)
    }

    /// Start from a loaded document. Its graph becomes the undo baseline.
    pub fn with_document(document: Document, config: EditorConfig) -> Self {
        let mut history = History::new(config.max_history);
        history.push(document.graph.clone());
        Self {
            graph: document.graph,
            counters: document.counters,
            history,
            viewport: Viewport::default(),
            config,
            mode: EditorMode::default(),
            selection: Selection::default(),
            drawing_from: None,
            pointer: None,
            dragging: None,
            pan_from: None,
            space_held: false,
        }
    }

    // ─── Events ──────────────────────────────────────────────────────────

    pub fn handle(&mut self, event: &InputEvent) -> Changes {
        match event {
            InputEvent::PointerDown {
                position,
                button,
                modifiers,
            } => self.pointer_down(*position, *button, *modifiers),
            InputEvent::PointerMove { position } => self.pointer_move(*position),
            InputEvent::PointerUp { position, button } => self.pointer_up(*position, *button),
            InputEvent::Wheel { position, delta_y } => self.wheel(*position, *delta_y),
            InputEvent::KeyDown { key, modifiers } => match ShortcutMap::resolve(key, *modifiers) {
                Some(action) => self.apply(action),
                None => Changes::new(),
            },
            InputEvent::KeyUp { key } => match ShortcutMap::resolve_release(key) {
                Some(action) => self.apply(action),
                None => Changes::new(),
            },
        }
    }

    pub fn pointer_down(&mut self, screen: Point, button: PointerButton, _modifiers: Modifiers) -> Changes {
        let pans = match button {
            PointerButton::Middle => true,
            PointerButton::Primary => self.space_held,
            PointerButton::Secondary => return Changes::new(),
        };
        if pans {
            self.pan_from = Some(screen);
            return Changes::new();
        }

        let at = self.snapped(screen);
        let radius = self.config.node_hit_radius / self.viewport.zoom;
        let hit = store::find_node_near(&self.graph.nodes, at, radius).map(|n| n.id);
        log::trace!("pointer down at {at:?} in {:?}, hit {hit:?}", self.mode);

        if let Some(hit) = hit {
            return self.press_node(hit);
        }

        match self.mode {
            EditorMode::Select => {
                let edge = store::find_edge_near(
                    &self.graph.nodes,
                    &self.graph.edges,
                    at,
                    self.config.edge_hit_tolerance,
                )
                .map(|e| e.id);
                self.select(edge.map_or(Selection::None, Selection::Edge))
            }
            EditorMode::CreatePathNode | EditorMode::CreateRoomNode => {
                let Some(kind) = self.mode.creates() else {
                    return Changes::new();
                };
                let (_, nodes, counters) = store::add_node(&self.graph.nodes, kind, at, self.counters);
                self.graph.nodes = nodes;
                self.counters = counters;
                self.commit();
                smallvec![Change::Graph]
            }
            EditorMode::ConnectEdge => Changes::new(),
        }
    }

    fn press_node(&mut self, hit: NodeId) -> Changes {
        let mut changes = Changes::new();
        if let Selection::Edge(_) = self.selection {
            self.selection = Selection::None;
            changes.push(Change::Selection);
        }

        match self.mode {
            EditorMode::Select => {
                self.selection = Selection::Node(hit);
                self.dragging = Some(hit);
                if !changes.contains(&Change::Selection) {
                    changes.push(Change::Selection);
                }
            }
            EditorMode::ConnectEdge => {
                match self.drawing_from.take() {
                    None => self.drawing_from = Some(hit),
                    Some(from) if from == hit => log::debug!("pending edge from {from} cancelled"),
                    Some(from) => {
                        if let Some(edges) =
                            store::add_edge(&self.graph.nodes, &self.graph.edges, from, hit)
                        {
                            self.graph.edges = edges;
                            self.commit();
                            changes.push(Change::Graph);
                        }
                    }
                }
                changes.push(Change::Preview);
            }
            EditorMode::CreatePathNode | EditorMode::CreateRoomNode => {}
        }
        changes
    }

    pub fn pointer_move(&mut self, screen: Point) -> Changes {
        if let Some(last) = self.pan_from {
            self.viewport.pan_by(screen - last);
            self.pan_from = Some(screen);
            return smallvec![Change::View];
        }

        let at = self.snapped(screen);
        self.pointer = Some(at);

        let mut changes = Changes::new();
        if let (Some(id), EditorMode::Select) = (self.dragging, self.mode) {
            if self.graph.node(id).is_some_and(|n| n.position != at) {
                log::trace!("drag {id} to {at:?}");
                self.graph.nodes = store::move_node(&self.graph.nodes, id, at);
                changes.push(Change::Graph);
            }
        }
        if self.drawing_from.is_some() {
            changes.push(Change::Preview);
        }
        changes
    }

    pub fn pointer_up(&mut self, _screen: Point, _button: PointerButton) -> Changes {
        if self.pan_from.take().is_some() {
            return Changes::new();
        }
        self.finish_drag();
        Changes::new()
    }

    /// Zoom around the pointer. Positive `delta_y` zooms out.
    pub fn wheel(&mut self, screen: Point, delta_y: f64) -> Changes {
        let factor = if delta_y > 0.0 {
            self.config.wheel_zoom_out
        } else {
            self.config.wheel_zoom_in
        };
        self.viewport.zoom_at(screen, factor, self.config.zoom_bounds());
        log::trace!("zoom {} offset {:?}", self.viewport.zoom, self.viewport.offset);
        smallvec![Change::View]
    }

    /// Run a resolved keyboard action.
    pub fn apply(&mut self, action: ShortcutAction) -> Changes {
        match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Delete => self.delete_selection(),
            ShortcutAction::Cancel => self.cancel(),
            ShortcutAction::PanStart => {
                self.space_held = true;
                Changes::new()
            }
            ShortcutAction::PanEnd => {
                self.space_held = false;
                Changes::new()
            }
        }
    }

    // ─── Discrete actions ────────────────────────────────────────────────

    /// Remove the selected node (cascading its edges) or the selected edge.
    pub fn delete_selection(&mut self) -> Changes {
        match self.selection {
            Selection::None => return Changes::new(),
            Selection::Node(id) => {
                let (nodes, edges) = store::remove_node(&self.graph.nodes, &self.graph.edges, id);
                self.graph = Graph { nodes, edges };
                if self.drawing_from == Some(id) {
                    self.drawing_from = None;
                }
                if self.dragging == Some(id) {
                    self.dragging = None;
                }
            }
            Selection::Edge(id) => {
                self.graph.edges = store::remove_edge(&self.graph.edges, id);
                log::debug!("remove edge {id}");
            }
        }
        self.selection = Selection::None;
        self.commit();
        smallvec![Change::Graph, Change::Selection]
    }

    /// Restore the previous snapshot. Counters are not rewound, so ids
    /// handed out before the undo are never reissued.
    pub fn undo(&mut self) -> Changes {
        self.finish_drag();
        let Some(snapshot) = self.history.undo().cloned() else {
            return Changes::new();
        };
        self.graph = snapshot;
        self.drawing_from = None;

        let mut changes: Changes = smallvec![Change::Graph, Change::Preview];
        let still_there = match self.selection {
            Selection::None => true,
            Selection::Node(id) => self.graph.contains_node(id),
            Selection::Edge(id) => self.graph.edge(id).is_some(),
        };
        if !still_there {
            self.selection = Selection::None;
            changes.push(Change::Selection);
        }
        changes
    }

    /// Drop the pending edge and clear the selection.
    pub fn cancel(&mut self) -> Changes {
        let mut changes = Changes::new();
        if self.drawing_from.take().is_some() {
            changes.push(Change::Preview);
        }
        if self.selection != Selection::None {
            self.selection = Selection::None;
            changes.push(Change::Selection);
        }
        changes
    }

    pub fn set_mode(&mut self, mode: EditorMode) -> Changes {
        if mode == self.mode {
            return Changes::new();
        }
        log::debug!("mode {:?} -> {mode:?}", self.mode);
        self.finish_drag();
        self.mode = mode;
        let mut changes: Changes = smallvec![Change::Mode];
        if self.drawing_from.take().is_some() {
            changes.push(Change::Preview);
        }
        changes
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.config.snap_to_grid = enabled;
    }

    pub fn set_grid_size(&mut self, grid_size: f64) {
        if grid_size > 0.0 {
            self.config.grid_size = grid_size;
        }
    }

    /// Select `id` and centre the view on it at the focus zoom.
    pub fn focus_node(&mut self, id: NodeId, canvas_size: Size) -> Changes {
        let Some(position) = self.graph.node(id).map(|n| n.position) else {
            return Changes::new();
        };
        let zoom = self.config.zoom_bounds().clamp(self.config.focus_zoom);
        self.viewport.center_on(position, canvas_size, zoom);
        self.selection = Selection::Node(id);
        smallvec![Change::View, Change::Selection]
    }

    /// Replace the whole document. History restarts from it.
    pub fn load(&mut self, document: Document) -> Changes {
        log::debug!(
            "load {} nodes, {} edges",
            document.graph.nodes.len(),
            document.graph.edges.len()
        );
        self.graph = document.graph;
        self.counters = document.counters;
        self.history.reset(self.graph.clone());
        self.selection = Selection::None;
        self.drawing_from = None;
        self.dragging = None;
        self.pan_from = None;
        smallvec![Change::Graph, Change::Selection, Change::Preview]
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Changes {
        self.viewport = viewport;
        smallvec![Change::View]
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Snapshot of the persisted state.
    pub fn document(&self) -> Document {
        Document::new(self.graph.clone(), self.counters)
    }

    pub fn search(&self, kind: NodeKind, query: &str) -> Vec<&Node> {
        store::search_nodes(&self.graph.nodes, kind, query, SEARCH_LIMIT)
    }

    /// Navigation view of the current graph.
    pub fn adjacency(&self) -> Adjacency {
        adjacency_from_graph(&self.graph)
    }

    pub fn route(&self, start: NodeId, target: NodeId) -> Route {
        shortest_path(&self.adjacency(), start, target)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.graph.edges
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_node(&self) -> Option<&Node> {
        match self.selection {
            Selection::Node(id) => self.graph.node(id),
            _ => None,
        }
    }

    pub fn selected_edge(&self) -> Option<&Edge> {
        match self.selection {
            Selection::Edge(id) => self.graph.edge(id),
            _ => None,
        }
    }

    pub fn drawing_from(&self) -> Option<NodeId> {
        self.drawing_from
    }

    /// Segment to draw for a pending edge: first endpoint to the pointer.
    pub fn preview(&self) -> Option<(Point, Point)> {
        let from = self.graph.node(self.drawing_from?)?.position;
        Some((from, self.pointer.unwrap_or(from)))
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn is_panning(&self) -> bool {
        self.pan_from.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn snapped(&self, screen: Point) -> Point {
        let canvas = self.viewport.screen_to_canvas(screen);
        snap_point(canvas, self.config.grid_size, self.config.snap_to_grid)
    }

    fn select(&mut self, selection: Selection) -> Changes {
        if self.selection == selection {
            return Changes::new();
        }
        self.selection = selection;
        smallvec![Change::Selection]
    }

    /// End a drag gesture: one snapshot per gesture, and none for a press
    /// that never moved the node.
    fn finish_drag(&mut self) {
        let Some(id) = self.dragging.take() else {
            return;
        };
        if self.history.current() != Some(&self.graph) {
            log::debug!("drag of {id} committed");
            self.commit();
        }
    }

    fn commit(&mut self) {
        self.history.push(self.graph.clone());
    }
}
