// Sink forwarding deliveries to an unbounded tokio channel.
//
// The receiving half is drained by a background task in the shell. Delivery never
// blocks the publisher; once the receiver is gone deliveries are dropped.

use crate::core::ports::WatcherSink;
use crate::core::watcher::event::AppEvent;
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub watcher: String,
    pub event: AppEvent,
}

pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Delivery>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl WatcherSink for ChannelSink {
    fn deliver(&self, watcher: &str, event: &AppEvent) {
        let delivery = Delivery {
            watcher: watcher.to_string(),
            event: event.clone(),
        };
        if self.tx.send(delivery).is_err() {
            warn!(watcher = %watcher, event = %event.name, "delivery receiver closed");
        }
    }
}
