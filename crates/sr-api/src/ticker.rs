//! Background task that keeps the ticker tape moving.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use sr_core::market::TickerTape;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

pub type SharedTape = Arc<RwLock<TickerTape>>;

pub fn shared_tape() -> SharedTape {
    Arc::new(RwLock::new(TickerTape::default_board()))
}

/// Nudges every quote once per `period` until the handle is aborted.
pub fn spawn_ticker(tape: SharedTape, period: Duration, mut rng: StdRng) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = interval(period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticks.tick().await;
        loop {
            ticks.tick().await;
            tape.write().await.tick(&mut rng);
            tracing::trace!("ticker tape updated");
        }
    })
}
