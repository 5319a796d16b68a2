//! Scripted drawing sessions.
//!
//! A script is a JSON array of events, for example:
//!
//! ```json
//! [
//!   {"event": "start_line"},
//!   {"event": "point", "lat": 22.84, "lng": 89.54},
//!   {"event": "key", "key": "Enter"}
//! ]
//! ```

use anyhow::{bail, Context, Result};
use route_core::{Coordinate, DrawingController, DrawingStore, FinishOutcome, InsertPosition};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One external signal fed to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    StartLine,
    /// Polygon at a raw route index
    StartPolygon {
        index: i64,
    },
    /// Polygon before or after a route waypoint
    InsertPolygon {
        waypoint: usize,
        position: InsertPosition,
    },
    Point {
        lat: f64,
        lng: f64,
    },
    Finish,
    Key {
        key: String,
    },
    Import,
    Discard,
    Clear,
    /// Highlight a route waypoint by index, or clear the highlight
    Select {
        #[serde(default)]
        waypoint: Option<usize>,
    },
}

impl ScriptEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ScriptEvent::StartLine => "start_line",
            ScriptEvent::StartPolygon { .. } => "start_polygon",
            ScriptEvent::InsertPolygon { .. } => "insert_polygon",
            ScriptEvent::Point { .. } => "point",
            ScriptEvent::Finish => "finish",
            ScriptEvent::Key { .. } => "key",
            ScriptEvent::Import => "import",
            ScriptEvent::Discard => "discard",
            ScriptEvent::Clear => "clear",
            ScriptEvent::Select { .. } => "select",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub applied: usize,
    pub skipped: usize,
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse script {}", path.display()))
}

/// Feed `events` through a controller over `store`.
///
/// A failing event aborts the replay unless `keep_going` is set, in which
/// case it is logged and skipped.
pub fn replay(
    store: &mut DrawingStore,
    events: &[ScriptEvent],
    keep_going: bool,
) -> Result<ReplayReport> {
    let mut controller = DrawingController::new(store);
    let mut report = ReplayReport::default();

    for (number, event) in events.iter().enumerate().map(|(i, e)| (i + 1, e)) {
        match apply(&mut controller, event) {
            Ok(()) => report.applied += 1,
            Err(err) if keep_going => {
                tracing::warn!("Skipping event #{} ({}): {:#}", number, event.name(), err);
                report.skipped += 1;
            }
            Err(err) => {
                return Err(err.context(format!("event #{} ({}) failed", number, event.name())));
            }
        }
    }

    tracing::info!(
        "Replayed {} events ({} skipped), route has {} waypoints",
        report.applied + report.skipped,
        report.skipped,
        controller.store().route().len()
    );
    Ok(report)
}

fn apply(controller: &mut DrawingController<'_>, event: &ScriptEvent) -> Result<()> {
    match event {
        ScriptEvent::StartLine => controller.on_start_line()?,
        ScriptEvent::StartPolygon { index } => controller.on_insert_polygon_at(*index)?,
        ScriptEvent::InsertPolygon { waypoint, position } => {
            controller.on_insert_polygon(*waypoint, *position)?
        }
        ScriptEvent::Point { lat, lng } => {
            if !controller.on_map_point(Coordinate::new(*lat, *lng)) {
                tracing::debug!("Click at ({}, {}) ignored", lat, lng);
            }
        }
        ScriptEvent::Finish => log_finish(controller.on_finish_signal()),
        ScriptEvent::Key { key } => {
            if let Some(outcome) = controller.on_key(key) {
                log_finish(outcome);
            }
        }
        ScriptEvent::Import => {
            let polygon_id = controller.on_import_signal()?;
            tracing::info!("Imported polygon {}", polygon_id);
        }
        ScriptEvent::Discard => {
            if !controller.on_discard_signal() {
                tracing::debug!("Nothing to discard");
            }
        }
        ScriptEvent::Clear => controller.on_clear(),
        ScriptEvent::Select { waypoint: None } => controller.on_select_waypoint(None),
        ScriptEvent::Select {
            waypoint: Some(index),
        } => {
            let route = controller.store().route();
            let Some(waypoint_id) = route.get(*index).map(|waypoint| waypoint.id()) else {
                bail!("waypoint {} is not on the route ({} waypoints)", index, route.len());
            };
            controller.on_select_waypoint(Some(waypoint_id));
        }
    }
    Ok(())
}

fn log_finish(outcome: FinishOutcome) {
    match outcome {
        FinishOutcome::Ignored => tracing::debug!("Finish ignored, nothing captured"),
        FinishOutcome::LineCommitted { route_len } => {
            tracing::info!("Line committed with {} waypoints", route_len)
        }
        FinishOutcome::PolygonPaused { pending_len } => {
            tracing::info!("Polygon paused with {} points", pending_len)
        }
    }
}
