pub mod export;
pub mod geometry;
pub mod id;
pub mod model;
pub mod nav;
pub mod persist;
pub mod route;
pub mod store;
pub mod tag;

pub use export::{Connection, connections};
pub use geometry::{Viewport, ZoomBounds};
pub use id::{EdgeId, NodeId};
pub use model::*;
pub use nav::adjacency_from_graph;
pub use persist::Document;
pub use route::{Adjacency, Heading, Route, shortest_path, shortest_path_by};

// Re-export kurbo types so downstream crates share one geometry vocabulary
pub use kurbo::{Point, Size, Vec2};
