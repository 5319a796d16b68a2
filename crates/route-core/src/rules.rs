//! Tunables for the drawing store.

use serde::{Deserialize, Serialize};

/// Fewest vertices an imported polygon may have.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Configuration for the drawing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingRules {
    /// Vertices required before a paused polygon can be imported (never below 3)
    pub min_polygon_points: usize,
    /// Buffered notices per subscriber before the oldest are dropped
    pub notice_capacity: usize,
}

impl Default for DrawingRules {
    fn default() -> Self {
        Self {
            min_polygon_points: MIN_POLYGON_POINTS,
            notice_capacity: 64,
        }
    }
}

impl DrawingRules {
    /// Clamp values into their supported range.
    pub fn normalized(mut self) -> Self {
        self.min_polygon_points = self.min_polygon_points.max(MIN_POLYGON_POINTS);
        self.notice_capacity = self.notice_capacity.max(1);
        self
    }
}
