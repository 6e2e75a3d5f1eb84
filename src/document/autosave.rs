//! Autosave timer.
//!
//! The timer never touches the document. It only sends a tick to the event
//! loop, which does the write between edits.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(10);

/// Request to write the current buffer to its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveTick;

/// Send an [`AutosaveTick`] every `interval`, starting one interval from now.
/// The task ends once the receiving side is dropped.
pub fn spawn_autosave_timer(
    interval: Duration,
    ticks: mpsc::UnboundedSender<AutosaveTick>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval_at(Instant::now() + interval, interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            timer.tick().await;
            if ticks.send(AutosaveTick).is_err() {
                log::debug!("Autosave receiver closed, stopping timer");
                break;
            }
        }
    })
}
