//! Translates map and panel signals into store commands.

use crate::error::{DrawingError, Result};
use crate::models::Coordinate;
use crate::store::{DrawingStore, FinishOutcome};
use crate::views::{insertion_index, InsertPosition};
use uuid::Uuid;

/// Key that finishes a capture.
pub const FINISH_KEY: &str = "Enter";

/// Stateless façade over a borrowed [`DrawingStore`].
pub struct DrawingController<'a> {
    store: &'a mut DrawingStore,
}

impl<'a> DrawingController<'a> {
    pub fn new(store: &'a mut DrawingStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DrawingStore {
        self.store
    }

    /// Forward a map click while a capture is taking points.
    ///
    /// Returns false when the click was ignored.
    pub fn on_map_point(&mut self, coordinate: Coordinate) -> bool {
        if !self.store.session().is_capturing() {
            tracing::trace!(
                "Ignoring click at ({}, {}), not capturing",
                coordinate.lat,
                coordinate.lng
            );
            return false;
        }
        self.store.add_pending_point(coordinate).is_ok()
    }

    /// Finish the capture; a finished line is announced as committed.
    pub fn on_finish_signal(&mut self) -> FinishOutcome {
        let outcome = self.store.finish_capture();
        if let FinishOutcome::LineCommitted { .. } = outcome {
            self.store.announce_route_committed();
        }
        outcome
    }

    /// Keyboard input; only the finish key while capturing does anything.
    pub fn on_key(&mut self, key: &str) -> Option<FinishOutcome> {
        if key != FINISH_KEY || !self.store.session().is_capturing() {
            return None;
        }
        Some(self.on_finish_signal())
    }

    pub fn on_start_line(&mut self) -> Result<()> {
        self.store.start_line_capture()
    }

    /// Start a polygon next to the route waypoint at `waypoint_index`.
    ///
    /// The waypoint must exist.
    pub fn on_insert_polygon(
        &mut self,
        waypoint_index: usize,
        position: InsertPosition,
    ) -> Result<()> {
        let route_len = self.store.route().len();
        if waypoint_index >= route_len {
            return Err(DrawingError::OutOfRange {
                index: i64::try_from(waypoint_index).unwrap_or(i64::MAX),
                route_len,
            });
        }
        self.store
            .start_polygon_capture(insertion_index(waypoint_index, position))
    }

    /// Start a polygon at a raw, possibly negative, route index.
    pub fn on_insert_polygon_at(&mut self, index: i64) -> Result<()> {
        let route_len = self.store.route().len();
        let index = usize::try_from(index)
            .map_err(|_| DrawingError::OutOfRange { index, route_len })?;
        self.store.start_polygon_capture(index)
    }

    pub fn on_import_signal(&mut self) -> Result<Uuid> {
        self.store.import_pending_polygon()
    }

    pub fn on_discard_signal(&mut self) -> bool {
        self.store.discard_pending_polygon()
    }

    pub fn on_clear(&mut self) {
        self.store.clear_route();
    }

    pub fn on_select_waypoint(&mut self, waypoint_id: Option<Uuid>) {
        self.store.set_active_waypoint(waypoint_id);
    }
}
