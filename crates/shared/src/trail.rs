use crate::models::LatLng;

/// Number of recent positions kept in the trail.
pub const TRAIL_LIMIT: usize = 50;

/// Largest trail a configuration may ask for.
pub const MAX_TRAIL_LIMIT: usize = 10_000;

/// Chronological sequence of the most recent positions.
///
/// `push` may momentarily exceed the limit; `trim` brings it back. The tracker
/// always trims before an update completes, so observers only ever see a
/// suffix of all readings with at most `limit` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: Vec<LatLng>,
    limit: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Trail::with_limit(TRAIL_LIMIT)
    }
}

impl Trail {
    pub fn with_limit(limit: usize) -> Self {
        Trail {
            points: Vec::new(),
            limit,
        }
    }

    pub fn push(&mut self, point: LatLng) {
        self.points.push(point);
    }

    pub fn is_over_limit(&self) -> bool {
        self.points.len() > self.limit
    }

    /// Drop the oldest points so at most `limit` remain. Returns whether anything was dropped.
    pub fn trim(&mut self) -> bool {
        if !self.is_over_limit() {
            return false;
        }
        let excess = self.points.len() - self.limit;
        self.points.drain(..excess);
        true
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
