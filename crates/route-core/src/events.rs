//! Change notifications published by the drawing store.

use crate::models::DrawingMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawingEvent {
    CaptureStarted {
        mode: DrawingMode,
    },
    PointAdded {
        waypoint_id: Uuid,
        pending_len: usize,
    },
    CaptureFinished {
        mode: DrawingMode,
        pending_len: usize,
    },
    /// A line capture replaced the route
    RouteCommitted {
        route_len: usize,
    },
    PolygonImported {
        polygon_id: Uuid,
        route_len: usize,
    },
    SessionDiscarded,
    RouteCleared,
    ActiveWaypointChanged {
        waypoint_id: Option<Uuid>,
    },
}

/// A store change, stamped with the revision it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingNotice {
    pub revision: u64,
    pub at: DateTime<Utc>,
    pub event: DrawingEvent,
}

impl DrawingNotice {
    pub fn new(revision: u64, event: DrawingEvent) -> Self {
        Self {
            revision,
            at: Utc::now(),
            event,
        }
    }
}
