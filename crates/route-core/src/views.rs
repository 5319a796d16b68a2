//! Read-only views derived from the store for map and panel collaborators.

use crate::geodesic::total_distance_m;
use crate::models::{Coordinate, DrawingMode, DrawingSession, Waypoint};
use crate::rules::MIN_POLYGON_POINTS;
use crate::store::DrawingStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Which side of a route waypoint a polygon goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    Before,
    After,
}

/// Route index at which a polygon placed relative to `waypoint_index` is spliced.
pub fn insertion_index(waypoint_index: usize, position: InsertPosition) -> usize {
    match position {
        InsertPosition::Before => waypoint_index,
        InsertPosition::After => waypoint_index.saturating_add(1),
    }
}

/// Vertices of one inserted polygon, in route order and not closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonRing {
    pub polygon_id: Uuid,
    pub vertices: Vec<Coordinate>,
}

impl PolygonRing {
    /// Vertices with the first one repeated at the end.
    pub fn closed(&self) -> Vec<Coordinate> {
        let mut ring = self.vertices.clone();
        if let Some(first) = self.vertices.first() {
            ring.push(*first);
        }
        ring
    }
}

/// Group polygon points of a route into rings.
///
/// Groups come out in order of first appearance; groups with fewer than
/// three points cannot form a ring and are skipped.
pub fn polygon_rings(route: &[Waypoint]) -> Vec<PolygonRing> {
    let mut rings: Vec<PolygonRing> = Vec::new();

    for waypoint in route {
        let Some(polygon_id) = waypoint.polygon_id else {
            continue;
        };
        let existing = rings.iter().position(|ring| ring.polygon_id == polygon_id);
        match existing {
            Some(index) => rings[index].vertices.push(waypoint.coordinates),
            None => rings.push(PolygonRing {
                polygon_id,
                vertices: vec![waypoint.coordinates],
            }),
        }
    }

    rings.retain(|ring| ring.vertices.len() >= MIN_POLYGON_POINTS);
    rings
}

/// Geometry for drawing the capture in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "coordinates", rename_all = "snake_case")]
pub enum PendingPreview {
    Empty,
    OpenLine(Vec<Coordinate>),
    /// Polygon capture with enough points; first vertex repeated at the end
    ClosedRing(Vec<Coordinate>),
}

pub fn pending_preview(session: &DrawingSession) -> PendingPreview {
    let coords: Vec<Coordinate> = session
        .pending()
        .iter()
        .map(|waypoint| waypoint.coordinates)
        .collect();

    if coords.is_empty() {
        return PendingPreview::Empty;
    }
    if session.mode() == DrawingMode::Polygon && coords.len() >= MIN_POLYGON_POINTS {
        let first = coords[0];
        let mut ring = coords;
        ring.push(first);
        return PendingPreview::ClosedRing(ring);
    }
    PendingPreview::OpenLine(coords)
}

/// Which UI affordances are currently usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFlags {
    pub mode: DrawingMode,
    pub can_start_capture: bool,
    pub is_capturing: bool,
    pub is_paused: bool,
    pub can_import: bool,
    pub can_discard: bool,
}

impl SessionFlags {
    pub fn from_store(store: &DrawingStore) -> Self {
        let session = store.session();
        let is_paused = session.is_paused();
        Self {
            mode: session.mode(),
            can_start_capture: !session.is_active(),
            is_capturing: session.is_capturing(),
            is_paused,
            can_import: is_paused && session.pending().len() >= store.rules().min_polygon_points,
            can_discard: session.is_active(),
        }
    }
}

/// One row of the mission panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionRow {
    pub label: String,
    pub waypoint_id: Uuid,
    pub coordinates: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polygon_id: Option<Uuid>,
}

/// Waypoint listing shown while planning a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub rows: Vec<MissionRow>,
    pub total_distance_m: f64,
}

impl MissionSummary {
    pub fn from_route(route: &[Waypoint]) -> Self {
        let rows = route
            .iter()
            .enumerate()
            .map(|(index, waypoint)| MissionRow {
                label: format!("WP({index:02})"),
                waypoint_id: waypoint.id(),
                coordinates: format!(
                    "{:.8}, {:.8}",
                    waypoint.coordinates.lat, waypoint.coordinates.lng
                ),
                distance: waypoint
                    .distance_from_previous
                    .map(|meters| format!("{meters:.2}m")),
                polygon_id: waypoint.polygon_id,
            })
            .collect();

        Self {
            rows,
            total_distance_m: total_distance_m(route),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for MissionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "No waypoints");
        }
        for row in &self.rows {
            write!(f, "{}  {}", row.label, row.coordinates)?;
            if let Some(distance) = &row.distance {
                write!(f, "  Distance: {distance}")?;
            }
            if row.polygon_id.is_some() {
                write!(f, "  [polygon]")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Total: {:.2}m", self.total_distance_m)
    }
}
