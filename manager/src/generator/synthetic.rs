use crate::bridge::readings::{LiveReadings, ReadingUpdate, SlotReading};
use fusioncore::prelude::{ConfigData, Reading, Unit};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Knobs for generating plausible synthetic radar readings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub seed: u64,
    /// Farthest forward distance generated, meters.
    pub max_range_m: f64,
    /// Upper bound on 2D detection slots per radar (1..=3).
    pub slots_per_radar: usize,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_range_m: 4.0,
            slots_per_radar: 2,
        }
    }
}

/// Fills the live-reading table with seeded detections for every configured
/// radar: a handful of 2D slots scattered ahead of the sensor plus a range
/// reading so the 1D path gets exercised when slot 1 is absent.
pub fn fill_readings(data: &ConfigData, config: &SyntheticConfig, readings: &LiveReadings) {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let slot_cap = config.slots_per_radar.clamp(1, 3);

    for radar_name in data.radars.keys() {
        let slot_count = rng.gen_range(1..=slot_cap) as u8;
        let mut slots = Vec::new();

        for slot in 1..=slot_count {
            let forward = rng.gen_range(0.5..config.max_range_m.max(0.6));
            let lateral = rng.gen_range(-0.3..0.3) * forward;
            slots.push(SlotReading {
                slot,
                x: Some(Reading::new(lateral, Unit::Meters)),
                y: Some(Reading::new(forward, Unit::Meters)),
            });
        }

        let range = rng.gen_range(0.5..config.max_range_m.max(0.6));
        readings.apply(ReadingUpdate {
            radar: radar_name.clone(),
            slots,
            range: Some(Reading::new(range, Unit::Meters)),
        });
    }
}
