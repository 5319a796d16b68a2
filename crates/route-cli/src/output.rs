//! Rendering of the replayed session.

use anyhow::{Context, Result};
use clap::ValueEnum;
use route_core::{
    pending_preview, polygon_rings, DrawingSnapshot, DrawingStore, MissionSummary, PendingPreview,
    PolygonRing, SessionFlags,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Mission panel listing
    #[default]
    Text,
    /// Full snapshot with derived views
    Json,
}

/// Everything a map or panel collaborator reads after a session.
#[derive(Debug, Serialize)]
struct SessionReport {
    snapshot: DrawingSnapshot,
    summary: MissionSummary,
    polygons: Vec<PolygonRing>,
    preview: PendingPreview,
    flags: SessionFlags,
}

pub fn render(store: &DrawingStore, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(store)),
        OutputFormat::Json => {
            let report = SessionReport {
                snapshot: store.snapshot(),
                summary: MissionSummary::from_route(store.route()),
                polygons: polygon_rings(store.route()),
                preview: pending_preview(store.session()),
                flags: SessionFlags::from_store(store),
            };
            serde_json::to_string_pretty(&report).context("Failed to serialize session report")
        }
    }
}

fn render_text(store: &DrawingStore) -> String {
    let mut out = MissionSummary::from_route(store.route()).to_string();

    let polygons = polygon_rings(store.route());
    if !polygons.is_empty() {
        out.push_str(&format!("Polygons: {}\n", polygons.len()));
    }

    let session = store.session();
    if session.is_active() {
        let state = if session.is_paused() { "paused" } else { "capturing" };
        out.push_str(&format!(
            "Pending: {} points ({} {})\n",
            session.pending().len(),
            session.mode(),
            state
        ));
        if session.is_paused() {
            for (index, waypoint) in session.pending().iter().enumerate() {
                out.push_str(&format!(
                    "  Point {}: ({:.6}, {:.6})\n",
                    index + 1,
                    waypoint.coordinates.lat,
                    waypoint.coordinates.lng
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_core::Coordinate;

    fn store_with_line() -> DrawingStore {
        let mut store = DrawingStore::new();
        store.start_line_capture().unwrap();
        store.add_pending_point(Coordinate::new(0.0, 0.0)).unwrap();
        store.add_pending_point(Coordinate::new(0.0, 1.0)).unwrap();
        store.finish_capture();
        store
    }

    #[test]
    fn text_lists_waypoints_and_pending_state() {
        let mut store = store_with_line();
        store.start_polygon_capture(1).unwrap();
        store.add_pending_point(Coordinate::new(1.0, 1.0)).unwrap();

        let text = render(&store, OutputFormat::Text).unwrap();

        assert!(text.contains("WP(00)  0.00000000, 0.00000000"));
        assert!(text.contains("Distance: 111194.93m"));
        assert!(text.contains("Pending: 1 points (polygon capturing)"));
    }

    #[test]
    fn paused_polygon_lists_its_points() {
        let mut store = store_with_line();
        store.start_polygon_capture(1).unwrap();
        store.add_pending_point(Coordinate::new(1.0, 1.0)).unwrap();
        store.add_pending_point(Coordinate::new(1.25, 2.0)).unwrap();
        store.add_pending_point(Coordinate::new(-0.5, 2.5)).unwrap();
        store.finish_capture();

        let text = render(&store, OutputFormat::Text).unwrap();

        assert!(text.contains("Pending: 3 points (polygon paused)"));
        assert!(text.contains("  Point 1: (1.000000, 1.000000)\n"));
        assert!(text.contains("  Point 2: (1.250000, 2.000000)\n"));
        assert!(text.contains("  Point 3: (-0.500000, 2.500000)\n"));
    }

    #[test]
    fn json_carries_snapshot_and_views() {
        let store = store_with_line();
        let json = render(&store, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["snapshot"]["route"].as_array().unwrap().len(), 2);
        assert_eq!(value["snapshot"]["route"][0]["kind"], "waypoint");
        assert_eq!(value["summary"]["rows"][1]["label"], "WP(01)");
        assert_eq!(value["preview"]["shape"], "empty");
        assert_eq!(value["flags"]["can_start_capture"], true);
    }
}
