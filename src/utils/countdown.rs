// src/utils/countdown.rs

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time};

/// Cancellable one-second ticker driving a quiz countdown.
///
/// Emits one unit per second on the returned channel; the view layer
/// forwards each tick to `AttemptController::tick`. The ticker stops when
/// the receiver is dropped, when [`cancel`](Countdown::cancel) is called,
/// or when the `Countdown` itself is dropped, so a disposed attempt can
/// never receive a stale tick.
pub struct Countdown {
    handle: JoinHandle<()>,
}

impl Countdown {
    pub fn start() -> (Self, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

            // The first tick completes immediately; skip it so the first
            // emitted tick lands one second after start.
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });

        (Self { handle }, rx)
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
