use crate::bridge::readings::LiveReadings;
use crate::service::store::ConfigStore;
use fusioncore::prelude::{FusionEngine, StatePublisher, TickResult};
use log::info;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::watch;

/// Wall-clock seconds for occupancy timing.
pub fn epoch_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Drives the fusion engine on a timer.
///
/// Ticks are strictly sequential: each pass locks the store, runs the engine
/// to completion, then publishes. Mutations hold the same lock, so a tick
/// never observes a half-applied configuration. The interval is re-read from
/// the store every iteration, so global-config changes take effect from the
/// next scheduled tick.
pub struct Ticker {
    engine: FusionEngine,
    store: Arc<Mutex<ConfigStore>>,
    readings: LiveReadings,
    state: Arc<RwLock<TickResult>>,
    publisher: StatePublisher,
}

impl Ticker {
    pub fn new(store: Arc<Mutex<ConfigStore>>, readings: LiveReadings) -> Self {
        Self {
            engine: FusionEngine::new(),
            store,
            readings,
            state: Arc::new(RwLock::new(TickResult::default())),
            publisher: StatePublisher::new(),
        }
    }

    /// Shared handle onto the last published tick, for the HTTP bridge.
    pub fn state_handle(&self) -> Arc<RwLock<TickResult>> {
        self.state.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TickResult> {
        self.publisher.subscribe()
    }

    /// Runs one fusion pass and publishes the result.
    pub fn tick(&mut self, now: f64) -> TickResult {
        let result = {
            let mut store = self.store.lock().unwrap();
            self.engine.run_tick(&mut store.data, &self.readings, now)
        };
        *self.state.write().unwrap() = result.clone();
        self.publisher.publish(result.clone());
        result
    }

    pub async fn run(mut self) {
        let initial = {
            let store = self.store.lock().unwrap();
            store.data.global_config.effective_interval()
        };
        info!("tick loop starting with interval {:.2}s", initial);

        loop {
            let interval = {
                let store = self.store.lock().unwrap();
                store.data.global_config.effective_interval()
            };
            tokio::time::sleep(Duration::from_secs_f64(interval)).await;
            self.tick(epoch_now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::readings::{ReadingUpdate, SlotReading};
    use fusioncore::prelude::{Reading, Unit};
    use tempfile::tempdir;

    #[test]
    fn tick_publishes_and_updates_shared_state() {
        let dir = tempdir().unwrap();
        let store = Arc::new(Mutex::new(
            ConfigStore::load(dir.path().join("store.json")).unwrap(),
        ));
        store
            .lock()
            .unwrap()
            .add_radar("kitchen", "default")
            .unwrap();

        let readings = LiveReadings::new();
        readings.apply(ReadingUpdate {
            radar: "kitchen".to_string(),
            slots: vec![SlotReading {
                slot: 1,
                x: Some(Reading::new(1.0, Unit::Meters)),
                y: Some(Reading::new(0.0, Unit::Meters)),
            }],
            range: None,
        });

        let mut ticker = Ticker::new(store.clone(), readings);
        let mut rx = ticker.subscribe();
        let state = ticker.state_handle();

        let result = ticker.tick(5.0);
        assert_eq!(result.maps["default"].targets.len(), 1);
        assert_eq!(state.read().unwrap().timestamp, 5.0);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().maps["default"].targets.len(), 1);

        // The fused list is persisted onto the in-memory map group too.
        assert_eq!(store.lock().unwrap().data.maps["default"].targets.len(), 1);
    }
}
