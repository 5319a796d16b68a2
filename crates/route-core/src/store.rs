//! Drawing store: the committed route plus the capture state machine.
//!
//! Every command runs to completion against `&mut self`; observers either
//! borrow the store between commands or take an owned [`DrawingSnapshot`].

use crate::error::{DrawingError, Result, SessionState};
use crate::events::{DrawingEvent, DrawingNotice};
use crate::geodesic::annotate_distances;
use crate::models::{Coordinate, DrawingMode, DrawingSession, Waypoint, WaypointKind};
use crate::rules::DrawingRules;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Result of a finish signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FinishOutcome {
    /// Nothing was being captured
    Ignored,
    /// The line capture replaced the route
    LineCommitted { route_len: usize },
    /// The polygon capture stopped and waits for import or discard
    PolygonPaused { pending_len: usize },
}

/// Owned, immutable copy of the store state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingSnapshot {
    pub revision: u64,
    pub route: Vec<Waypoint>,
    pub session: DrawingSession,
    pub active_waypoint_id: Option<Uuid>,
}

impl DrawingSnapshot {
    pub fn pending(&self) -> &[Waypoint] {
        self.session.pending()
    }
}

/// Holds the route and the drawing session.
pub struct DrawingStore {
    route: Vec<Waypoint>,
    session: DrawingSession,
    active_waypoint_id: Option<Uuid>,
    rules: DrawingRules,
    /// Bumped once per state change
    revision: u64,
    tx: broadcast::Sender<DrawingNotice>,
}

impl Default for DrawingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingStore {
    pub fn new() -> Self {
        Self::with_rules(DrawingRules::default())
    }

    pub fn with_rules(rules: DrawingRules) -> Self {
        let rules = rules.normalized();
        let (tx, _) = broadcast::channel(rules.notice_capacity);
        Self {
            route: Vec::new(),
            session: DrawingSession::default(),
            active_waypoint_id: None,
            rules,
            revision: 0,
            tx,
        }
    }

    /// Receive a notice for every subsequent state change.
    pub fn subscribe(&self) -> broadcast::Receiver<DrawingNotice> {
        self.tx.subscribe()
    }

    pub fn route(&self) -> &[Waypoint] {
        &self.route
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn active_waypoint_id(&self) -> Option<Uuid> {
        self.active_waypoint_id
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn rules(&self) -> &DrawingRules {
        &self.rules
    }

    pub fn snapshot(&self) -> DrawingSnapshot {
        DrawingSnapshot {
            revision: self.revision,
            route: self.route.clone(),
            session: self.session.clone(),
            active_waypoint_id: self.active_waypoint_id,
        }
    }

    /// Begin capturing a fresh route.
    pub fn start_line_capture(&mut self) -> Result<()> {
        if self.session.is_active() {
            return Err(self.rejected("start a line capture"));
        }

        self.session = DrawingSession::line();
        tracing::debug!("Line capture started");
        self.commit(DrawingEvent::CaptureStarted {
            mode: DrawingMode::Line,
        });
        Ok(())
    }

    /// Begin capturing a polygon that will be spliced in at `insertion_index`.
    pub fn start_polygon_capture(&mut self, insertion_index: usize) -> Result<()> {
        if self.session.is_active() {
            return Err(self.rejected("start a polygon capture"));
        }
        if insertion_index > self.route.len() {
            let err = DrawingError::OutOfRange {
                index: i64::try_from(insertion_index).unwrap_or(i64::MAX),
                route_len: self.route.len(),
            };
            tracing::debug!("Drawing command rejected: {}", err);
            return Err(err);
        }

        self.session = DrawingSession::polygon(insertion_index);
        tracing::debug!(
            "Polygon capture started at index {} of {}",
            insertion_index,
            self.route.len()
        );
        self.commit(DrawingEvent::CaptureStarted {
            mode: DrawingMode::Polygon,
        });
        Ok(())
    }

    /// Append a clicked point to the capture in progress.
    ///
    /// Distances are left for [`finish_capture`](Self::finish_capture).
    pub fn add_pending_point(&mut self, coordinate: Coordinate) -> Result<Uuid> {
        if !self.session.capturing {
            tracing::debug!("Point ignored, no capture is taking points");
            return Err(DrawingError::NotCapturing);
        }

        let waypoint = Waypoint::for_mode(
            self.session.mode,
            coordinate,
            self.session.active_polygon_id,
        );
        let waypoint_id = waypoint.id();
        self.session.pending.push(waypoint);

        let pending_len = self.session.pending.len();
        self.commit(DrawingEvent::PointAdded {
            waypoint_id,
            pending_len,
        });
        Ok(waypoint_id)
    }

    /// Stop capturing.
    ///
    /// A line capture becomes the new route. A polygon capture keeps its
    /// points and waits for [`import_pending_polygon`](Self::import_pending_polygon)
    /// or [`discard_pending_polygon`](Self::discard_pending_polygon).
    pub fn finish_capture(&mut self) -> FinishOutcome {
        if !self.session.capturing {
            return FinishOutcome::Ignored;
        }

        let annotated = annotate_distances(&self.session.pending);
        let pending_len = annotated.len();

        match self.session.mode {
            DrawingMode::Line => {
                self.route = annotated;
                self.session = DrawingSession::default();
                tracing::debug!("Line capture committed with {} waypoints", pending_len);
                self.commit(DrawingEvent::CaptureFinished {
                    mode: DrawingMode::Line,
                    pending_len,
                });
                FinishOutcome::LineCommitted {
                    route_len: self.route.len(),
                }
            }
            DrawingMode::Polygon => {
                self.session.pending = annotated;
                self.session.capturing = false;
                tracing::debug!("Polygon capture paused with {} points", pending_len);
                self.commit(DrawingEvent::CaptureFinished {
                    mode: DrawingMode::Polygon,
                    pending_len,
                });
                FinishOutcome::PolygonPaused { pending_len }
            }
            DrawingMode::Idle => FinishOutcome::Ignored,
        }
    }

    /// Splice the paused polygon into the route and end the session.
    ///
    /// Returns the id shared by the imported points.
    pub fn import_pending_polygon(&mut self) -> Result<Uuid> {
        let (Some(index), Some(polygon_id)) = (
            self.session.insertion_index,
            self.session.active_polygon_id,
        ) else {
            return Err(self.rejected("import a polygon"));
        };
        if !self.session.is_paused() {
            return Err(self.rejected("import a polygon"));
        }

        let required = self.rules.min_polygon_points;
        let actual = self.session.pending.len();
        if actual < required {
            let err = DrawingError::InsufficientPoints { required, actual };
            tracing::debug!("Drawing command rejected: {}", err);
            return Err(err);
        }
        if index > self.route.len() {
            let err = DrawingError::OutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                route_len: self.route.len(),
            };
            tracing::debug!("Drawing command rejected: {}", err);
            return Err(err);
        }

        let polygon_points = std::mem::take(&mut self.session.pending)
            .into_iter()
            .map(|mut point| {
                if point.kind == WaypointKind::Waypoint {
                    point.kind = WaypointKind::PolygonStart;
                }
                point
            });

        let mut merged = std::mem::take(&mut self.route);
        let tail = merged.split_off(index);
        merged.extend(polygon_points);
        merged.extend(tail);

        self.route = annotate_distances(&merged);
        self.session = DrawingSession::default();
        tracing::debug!(
            "Imported polygon {} ({} points) at index {}, route now {} waypoints",
            polygon_id,
            actual,
            index,
            self.route.len()
        );
        self.commit(DrawingEvent::PolygonImported {
            polygon_id,
            route_len: self.route.len(),
        });
        Ok(polygon_id)
    }

    /// Drop the session without touching the route.
    ///
    /// Returns false when there was nothing to discard.
    pub fn discard_pending_polygon(&mut self) -> bool {
        if !self.session.is_active() && self.session.pending.is_empty() {
            return false;
        }

        tracing::debug!(
            "Discarded {} session with {} pending points",
            self.session.mode,
            self.session.pending.len()
        );
        self.session = DrawingSession::default();
        self.commit(DrawingEvent::SessionDiscarded);
        true
    }

    /// Reset route, session and selection.
    pub fn clear_route(&mut self) {
        self.route.clear();
        self.session = DrawingSession::default();
        self.active_waypoint_id = None;
        tracing::debug!("Route cleared");
        self.commit(DrawingEvent::RouteCleared);
    }

    pub fn set_active_waypoint(&mut self, waypoint_id: Option<Uuid>) {
        self.active_waypoint_id = waypoint_id;
        self.commit(DrawingEvent::ActiveWaypointChanged { waypoint_id });
    }

    /// Tell subscribers the route was committed, without changing state.
    pub(crate) fn announce_route_committed(&self) {
        self.notify(DrawingEvent::RouteCommitted {
            route_len: self.route.len(),
        });
    }

    fn session_state(&self) -> SessionState {
        match self.session.mode {
            DrawingMode::Idle => SessionState::Idle,
            mode if self.session.capturing => SessionState::Capturing(mode),
            _ => SessionState::Paused,
        }
    }

    fn rejected(&self, command: &'static str) -> DrawingError {
        let err = DrawingError::InvalidTransition {
            command,
            mode: self.session_state(),
        };
        tracing::debug!("Drawing command rejected: {}", err);
        err
    }

    fn commit(&mut self, event: DrawingEvent) {
        self.revision += 1;
        self.notify(event);
    }

    fn notify(&self, event: DrawingEvent) {
        // No subscribers is fine.
        let _ = self.tx.send(DrawingNotice::new(self.revision, event));
    }
}
