//! Once-a-second clock events for a session.

use std::time::{Duration, SystemTime};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::types::InputEvent;

/// Pushes [`InputEvent::Tick`] into a session queue at a fixed period.
///
/// The task is aborted when the `Ticker` is dropped. It only holds a weak
/// sender, so it never keeps the queue open on its own.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(tx: &mpsc::Sender<InputEvent>, period: Duration) -> Self {
        let weak = tx.downgrade();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(tx) = weak.upgrade() else {
                    break;
                };
                if tx.send(InputEvent::Tick(SystemTime::now())).await.is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
