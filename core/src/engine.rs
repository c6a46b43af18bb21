use crate::model::{ConfigData, FusedTarget, ProjectedPoint, ReadingSource};
use crate::pipeline::{adapter, cluster, filter, occupancy, projector, ZoneOccupancy};
use crate::telemetry::MetricsRecorder;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// 2D returns inside this box around the radar (millimeters on both axes)
/// are sensor noise and never reach projection.
const NOISE_BOX_MM: f64 = 100.0;

/// Fused state of one map group after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapState {
    pub targets: Vec<FusedTarget>,
}

/// Per-zone occupancy outcome for one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneStatus {
    pub map_group: String,
    pub zone: String,
    pub count: usize,
    pub occupied: bool,
    /// True only on the tick where occupancy flipped.
    pub changed: bool,
}

/// Everything a tick produces, handed to external presentation collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickResult {
    pub timestamp: f64,
    pub maps: BTreeMap<String, MapState>,
    pub zones: Vec<ZoneStatus>,
}

/// Orchestrates the fusion pipeline across all configured map groups.
///
/// Holds only cross-tick hysteresis state; every fused target list is
/// recomputed from scratch each tick, never incrementally mutated.
pub struct FusionEngine {
    occupancy: HashMap<(String, String), ZoneOccupancy>,
    metrics: MetricsRecorder,
}

impl FusionEngine {
    pub fn new() -> Self {
        Self {
            occupancy: HashMap::new(),
            metrics: MetricsRecorder::new(),
        }
    }

    /// Runs one synchronous fusion pass.
    ///
    /// Reads the live configuration (immutable for the duration of the
    /// pass), gathers and projects raw points, filters, clusters per map
    /// group, writes the fused target lists back onto the map groups, and
    /// evaluates zone occupancy against the injected clock. Never fails:
    /// malformed input degrades to "no detection".
    pub fn run_tick(
        &mut self,
        data: &mut ConfigData,
        source: &dyn ReadingSource,
        now: f64,
    ) -> TickResult {
        let merge_distance = data.global_config.merge_distance;
        let target_height = data.global_config.target_height;

        let mut dropped = 0usize;
        let mut map_points: BTreeMap<String, Vec<ProjectedPoint>> = BTreeMap::new();

        for (radar_name, radar) in &data.radars {
            let candidates = map_points.entry(radar.map_group.clone()).or_default();

            let exclude_zones = data
                .map_group(&radar.map_group)
                .map(|group| group.zones.exclude_zones.as_slice())
                .unwrap_or(&[]);

            for raw in adapter::read_radar(radar_name, source) {
                if !raw.is_1d
                    && raw.x_mm.abs() < NOISE_BOX_MM
                    && raw.y_mm.abs() < NOISE_BOX_MM
                {
                    dropped += 1;
                    continue;
                }

                let Some((left, top)) = projector::project(&radar.layout, &raw, target_height)
                else {
                    dropped += 1;
                    continue;
                };

                // Exclusion strictly before monitor inclusion.
                if filter::excluded(left, top, exclude_zones) {
                    dropped += 1;
                    continue;
                }
                if !filter::monitored(left, top, &radar.monitor_zones) {
                    dropped += 1;
                    continue;
                }

                candidates.push(ProjectedPoint {
                    left,
                    top,
                    radar: radar_name.clone(),
                    slot: raw.slot,
                    is_1d: raw.is_1d,
                    radar_origin: raw
                        .is_1d
                        .then_some((radar.layout.origin_x, radar.layout.origin_y)),
                });
            }
        }

        let mut result = TickResult {
            timestamp: now,
            ..Default::default()
        };
        let mut kept = 0usize;

        for (group, points) in map_points {
            kept += points.len();
            let fused = cluster::cluster(&points, merge_distance);
            // Exact-key store only; a radar naming an unknown group still
            // surfaces its targets in the tick result.
            if let Some(map) = data.maps.get_mut(&group) {
                map.targets = fused.clone();
            }
            result.maps.insert(group, MapState { targets: fused });
        }

        let mut live_zones = HashSet::new();
        for (map_name, map) in &data.maps {
            for zone in &map.zones.include_zones {
                let key = (map_name.clone(), zone.name.clone());
                let inside = zone.is_valid()
                    && map
                        .targets
                        .iter()
                        .any(|t| crate::geometry::polygon::contains(t.x, t.y, &zone.points));
                let count = occupancy::count_inside(&map.targets, &zone.points);

                let state = self.occupancy.entry(key.clone()).or_default();
                let (occupied, changed) = state.evaluate(inside, zone.delay, now);
                live_zones.insert(key);

                result.zones.push(ZoneStatus {
                    map_group: map_name.clone(),
                    zone: zone.name.clone(),
                    count,
                    occupied,
                    changed,
                });
            }
        }
        // Drop hysteresis state for zones that no longer exist.
        self.occupancy.retain(|key, _| live_zones.contains(key));

        self.metrics.record_tick(kept, dropped);
        debug!(
            "tick: {} points kept, {} dropped, {} zones evaluated",
            kept,
            dropped,
            result.zones.len()
        );

        result
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self::new()
    }
}
