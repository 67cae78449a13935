//! Screen ↔ canvas transforms, grid snapping, and hit-test distances.
//!
//! Canvas space is the zoom/pan-independent space node positions live in.
//! Screen space is pointer pixels relative to the canvas element:
//!
//! ```text
//! screen = canvas * zoom + offset
//! canvas = (screen - offset) / zoom
//! ```
//!
//! Everything here is O(1) and allocation-free so it can run on every
//! pointer-move and wheel event.

use kurbo::{Affine, Line, ParamCurveNearest, Point, Size, Vec2};

/// Convert a screen-space point to canvas space.
pub fn screen_to_canvas(screen: Point, zoom: f64, offset: Vec2) -> Point {
    ((screen - offset).to_vec2() / zoom).to_point()
}

/// Convert a canvas-space point to screen space.
pub fn canvas_to_screen(canvas: Point, zoom: f64, offset: Vec2) -> Point {
    (canvas.to_vec2() * zoom + offset).to_point()
}

/// Quantize `value` to the nearest multiple of `grid_size`.
///
/// Halves round toward positive infinity, so `-15` on a 10 grid snaps to
/// `-10`. A non-positive grid leaves the value untouched.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size + 0.5).floor() * grid_size
}

/// Snap both axes of `point` when `enabled`, otherwise return it unchanged.
pub fn snap_point(point: Point, grid_size: f64, enabled: bool) -> Point {
    if !enabled {
        return point;
    }
    Point::new(
        snap_to_grid(point.x, grid_size),
        snap_to_grid(point.y, grid_size),
    )
}

/// Euclidean distance.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Distance from `point` to the closest point of segment `start..end`.
///
/// The projection parameter is clamped to `[0, 1]`; a zero-length segment
/// degrades to the distance to `start`.
pub fn point_to_segment_distance(point: Point, start: Point, end: Point) -> f64 {
    if start == end {
        return point.distance(start);
    }
    Line::new(start, end).nearest(point, 1e-9).distance_sq.sqrt()
}

// ─── Zoom ────────────────────────────────────────────────────────────────

/// Inclusive zoom range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: 0.1, max: 5.0 }
    }
}

impl ZoomBounds {
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

/// Scale the zoom by `factor` (clamped into `bounds`) while keeping the
/// canvas point under `anchor` fixed on screen.
pub fn zoom_at(
    current_zoom: f64,
    current_offset: Vec2,
    anchor: Point,
    factor: f64,
    bounds: ZoomBounds,
) -> (f64, Vec2) {
    let new_zoom = bounds.clamp(current_zoom * factor);
    let anchor = anchor.to_vec2();
    let new_offset = anchor - (anchor - current_offset) * (new_zoom / current_zoom);
    (new_zoom, new_offset)
}

// ─── Viewport ────────────────────────────────────────────────────────────

/// Current view transform: zoom factor plus pan offset in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        screen_to_canvas(screen, self.zoom, self.offset)
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        canvas_to_screen(canvas, self.zoom, self.offset)
    }

    pub fn zoom_at(&mut self, anchor: Point, factor: f64, bounds: ZoomBounds) {
        let (zoom, offset) = zoom_at(self.zoom, self.offset, anchor, factor, bounds);
        self.zoom = zoom;
        self.offset = offset;
    }

    /// Translate by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set `zoom` and place `canvas_point` at the centre of a canvas of `size`.
    pub fn center_on(&mut self, canvas_point: Point, size: Size, zoom: f64) {
        let center = Vec2::new(size.width / 2.0, size.height / 2.0);
        self.zoom = zoom;
        self.offset = center - canvas_point.to_vec2() * zoom;
    }

    /// Canvas → screen as an affine map, for renderers that push a transform.
    pub fn to_screen_affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }
}
