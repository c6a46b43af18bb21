use crate::geometry::polygon;
use crate::model::{FusedTarget, ZonePoint};

/// Number of fused targets inside the polygon this tick. No hysteresis.
pub fn count_inside(targets: &[FusedTarget], points: &[ZonePoint]) -> usize {
    targets
        .iter()
        .filter(|target| polygon::contains(target.x, target.y, points))
        .count()
}

/// Hold-open hysteresis state for one binary occupancy zone.
///
/// Time is injected as seconds so the evaluator stays deterministic under
/// test; the caller supplies one consistent clock per tick.
#[derive(Debug, Default, Clone)]
pub struct ZoneOccupancy {
    last_triggered: Option<f64>,
    on: bool,
}

impl ZoneOccupancy {
    /// Feeds one tick's membership result through the hold logic.
    ///
    /// Returns `(occupied, changed)`; `changed` is true only when the
    /// occupancy state flips, never on steady-state ticks.
    pub fn evaluate(&mut self, inside: bool, delay_s: f64, now: f64) -> (bool, bool) {
        let occupied = if inside {
            self.last_triggered = Some(now);
            true
        } else {
            match self.last_triggered {
                Some(last) if delay_s > 0.0 => now - last < delay_s,
                _ => false,
            }
        };

        let changed = occupied != self.on;
        self.on = occupied;
        (occupied, changed)
    }

    pub fn occupied(&self) -> bool {
        self.on
    }
}
