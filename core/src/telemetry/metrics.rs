use std::sync::Mutex;

/// Tick-level counters for the fusion pipeline.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    ticks: usize,
    points_kept: usize,
    points_dropped: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                ticks: 0,
                points_kept: 0,
                points_dropped: 0,
            }),
        }
    }

    pub fn record_tick(&self, kept: usize, dropped: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.ticks += 1;
            metrics.points_kept += kept;
            metrics.points_dropped += dropped;
        }
    }

    /// (ticks, points kept, points dropped)
    pub fn snapshot(&self) -> (usize, usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.ticks, metrics.points_kept, metrics.points_dropped)
        } else {
            (0, 0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_across_ticks() {
        let recorder = MetricsRecorder::new();
        recorder.record_tick(3, 1);
        recorder.record_tick(0, 2);
        assert_eq!(recorder.snapshot(), (2, 3, 3));
    }
}
