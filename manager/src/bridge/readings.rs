use fusioncore::prelude::{Reading, ReadingSource};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// One slot's paired readings as posted by an external radar adapter.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotReading {
    pub slot: u8,
    pub x: Option<Reading>,
    pub y: Option<Reading>,
}

/// Ingest payload replacing everything known about one radar.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingUpdate {
    pub radar: String,
    #[serde(default)]
    pub slots: Vec<SlotReading>,
    #[serde(default)]
    pub range: Option<Reading>,
}

#[derive(Debug, Clone, Default)]
struct RadarReadings {
    slots: [Option<(Reading, Reading)>; 3],
    range: Option<Reading>,
}

/// Shared live-reading table; the fusion core's `ReadingSource` seam.
#[derive(Clone, Default)]
pub struct LiveReadings {
    inner: Arc<RwLock<BTreeMap<String, RadarReadings>>>,
}

impl LiveReadings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored readings for one radar. Slots missing either
    /// paired value are recorded as unavailable.
    pub fn apply(&self, update: ReadingUpdate) {
        let mut readings = RadarReadings::default();
        for slot in update.slots {
            if !(1..=3).contains(&slot.slot) {
                continue;
            }
            if let (Some(x), Some(y)) = (slot.x, slot.y) {
                readings.slots[(slot.slot - 1) as usize] = Some((x, y));
            }
        }
        readings.range = update.range;
        self.inner.write().unwrap().insert(update.radar, readings);
    }

    fn with_radar<T>(&self, radar: &str, f: impl Fn(&RadarReadings) -> Option<T>) -> Option<T> {
        let table = self.inner.read().unwrap();
        if let Some(readings) = table.get(radar) {
            return f(readings);
        }
        // Two-phase lookup, consistent with the config side.
        table
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(radar))
            .and_then(|(_, readings)| f(readings))
    }
}

impl ReadingSource for LiveReadings {
    fn slot_pair(&self, radar: &str, slot: u8) -> Option<(Reading, Reading)> {
        if !(1..=3).contains(&slot) {
            return None;
        }
        self.with_radar(radar, |readings| readings.slots[(slot - 1) as usize])
    }

    fn range(&self, radar: &str) -> Option<Reading> {
        self.with_radar(radar, |readings| readings.range)
    }
}
