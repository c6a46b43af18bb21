use crate::engine::TickResult;
use tokio::sync::watch;

/// Typed publish step for tick results.
///
/// External presentation collaborators subscribe through the watch channel;
/// the core never learns about their lifecycle. Receivers always observe the
/// latest complete tick, never a partial one.
pub struct StatePublisher {
    tx: watch::Sender<TickResult>,
}

impl StatePublisher {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(TickResult::default());
        Self { tx }
    }

    pub fn publish(&self, result: TickResult) {
        // send_replace never fails even with no live subscribers.
        self.tx.send_replace(result);
    }

    pub fn subscribe(&self) -> watch::Receiver<TickResult> {
        self.tx.subscribe()
    }
}

impl Default for StatePublisher {
    fn default() -> Self {
        Self::new()
    }
}
