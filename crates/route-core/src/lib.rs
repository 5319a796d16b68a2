//! Route drawing core for the marine navigation planner.
//!
//! Holds the waypoint/polygon drawing state machine, the geodesic math it
//! relies on, and read-only views for map and panel collaborators.

pub mod controller;
pub mod error;
pub mod events;
pub mod geodesic;
pub mod models;
pub mod rules;
pub mod store;
pub mod views;

pub use controller::{DrawingController, FINISH_KEY};
pub use error::{DrawingError, SessionState};
pub use events::{DrawingEvent, DrawingNotice};
pub use geodesic::{annotate_distances, distance, haversine_distance, total_distance_m};
pub use models::{Coordinate, DrawingMode, DrawingSession, Waypoint, WaypointKind};
pub use rules::{DrawingRules, MIN_POLYGON_POINTS};
pub use store::{DrawingSnapshot, DrawingStore, FinishOutcome};
pub use views::{
    insertion_index, pending_preview, polygon_rings, InsertPosition, MissionRow, MissionSummary,
    PendingPreview, PolygonRing, SessionFlags,
};
