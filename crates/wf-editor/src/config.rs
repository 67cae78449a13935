//! Editor tuning knobs.

use serde::Deserialize;
use wf_core::ZoomBounds;

/// Configuration for an [`Editor`](crate::editor::Editor).
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid pitch in canvas units. Default: **10**.
    pub grid_size: f64,
    /// Quantize created and dragged positions to the grid. Default: **true**.
    pub snap_to_grid: bool,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Node pick radius in screen pixels; divided by zoom before testing in
    /// canvas space so the target keeps its on-screen size. Default: **10**.
    pub node_hit_radius: f64,
    /// Edge pick tolerance in canvas units. Default: **5**.
    pub edge_hit_tolerance: f64,
    pub wheel_zoom_in: f64,
    pub wheel_zoom_out: f64,
    /// Zoom used when centring on a searched node. Default: **4**.
    pub focus_zoom: f64,
    /// Undo depth. Default: **500**.
    pub max_history: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 10.0,
            snap_to_grid: true,
            min_zoom: 0.1,
            max_zoom: 5.0,
            node_hit_radius: 10.0,
            edge_hit_tolerance: 5.0,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            focus_zoom: 4.0,
            max_history: 500,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config object.
    ///
    /// # Errors
    /// Returns a message if `text` is not a JSON object of config fields.
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("invalid editor config: {e}"))
    }

    pub fn zoom_bounds(&self) -> ZoomBounds {
        ZoomBounds {
            min: self.min_zoom,
            max: self.max_zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{ "grid_size": 25, "snap_to_grid": false }"#).unwrap();
        assert_eq!(
            config,
            EditorConfig {
                grid_size: 25.0,
                snap_to_grid: false,
                ..EditorConfig::default()
            }
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = EditorConfig::from_json(r#"{ "theme": "dark" }"#).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn wrong_types_are_errors() {
        assert!(EditorConfig::from_json(r#"{ "grid_size": "big" }"#).is_err());
        assert!(EditorConfig::from_json("42").is_err());
    }

    #[test]
    fn zoom_bounds_follow_config() {
        let config = EditorConfig {
            min_zoom: 0.5,
            max_zoom: 2.0,
            ..EditorConfig::default()
        };
        assert_eq!(config.zoom_bounds().clamp(10.0), 2.0);
    }
}
