//! Core data models for route drawing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Role of a point within the route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WaypointKind {
    /// Plain route vertex
    #[default]
    Waypoint,
    /// Vertex of an inserted polygon
    PolygonStart,
    /// Explicitly tagged closing vertex of an inserted polygon
    PolygonEnd,
}

/// A single vertex of the route or of an in-progress capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    id: Uuid,
    pub coordinates: Coordinate,
    /// Meters to the previous point in the same sequence
    #[serde(default)]
    pub distance_from_previous: Option<f64>,
    pub kind: WaypointKind,
    /// Groups all points of one inserted polygon
    #[serde(default)]
    pub polygon_id: Option<Uuid>,
}

impl Waypoint {
    /// Create a plain route vertex.
    pub fn route_point(coordinates: Coordinate) -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinates,
            distance_from_previous: None,
            kind: WaypointKind::Waypoint,
            polygon_id: None,
        }
    }

    /// Create a vertex belonging to the polygon `polygon_id`.
    pub fn polygon_vertex(coordinates: Coordinate, polygon_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinates,
            distance_from_previous: None,
            kind: WaypointKind::PolygonStart,
            polygon_id: Some(polygon_id),
        }
    }

    /// Build the point a capture in `mode` produces for a click.
    ///
    /// Polygon mode requires the session's polygon id; without one the point
    /// degrades to a plain route vertex.
    pub fn for_mode(
        mode: DrawingMode,
        coordinates: Coordinate,
        polygon_id: Option<Uuid>,
    ) -> Self {
        match (mode, polygon_id) {
            (DrawingMode::Polygon, Some(polygon_id)) => {
                Self::polygon_vertex(coordinates, polygon_id)
            }
            _ => Self::route_point(coordinates),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// What kind of capture, if any, is running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    /// No capture session
    #[default]
    Idle,
    /// Capturing a fresh route
    Line,
    /// Capturing a polygon to splice into the route
    Polygon,
}

impl std::fmt::Display for DrawingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DrawingMode::Idle => "idle",
            DrawingMode::Line => "line",
            DrawingMode::Polygon => "polygon",
        };
        f.write_str(name)
    }
}

/// Transient state of an in-progress capture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingSession {
    pub(crate) mode: DrawingMode,
    /// False once a polygon capture is paused by finish
    pub(crate) capturing: bool,
    pub(crate) pending: Vec<Waypoint>,
    pub(crate) insertion_index: Option<usize>,
    pub(crate) active_polygon_id: Option<Uuid>,
}

impl DrawingSession {
    pub(crate) fn line() -> Self {
        Self {
            mode: DrawingMode::Line,
            capturing: true,
            ..Self::default()
        }
    }

    pub(crate) fn polygon(insertion_index: usize) -> Self {
        Self {
            mode: DrawingMode::Polygon,
            capturing: true,
            pending: Vec::new(),
            insertion_index: Some(insertion_index),
            active_polygon_id: Some(Uuid::new_v4()),
        }
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode != DrawingMode::Idle
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// A polygon capture that has been finished but not yet imported or discarded.
    pub fn is_paused(&self) -> bool {
        self.mode == DrawingMode::Polygon && !self.capturing
    }

    pub fn pending(&self) -> &[Waypoint] {
        &self.pending
    }

    pub fn insertion_index(&self) -> Option<usize> {
        self.insertion_index
    }

    pub fn active_polygon_id(&self) -> Option<Uuid> {
        self.active_polygon_id
    }
}
