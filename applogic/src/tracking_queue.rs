// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use engagecommon::{CustomEvent, TrackingRecord};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::trace;

use crate::collaborators::Tracker;

#[derive(Debug, Clone, PartialEq)]
pub enum TrackingMessage {
    Record(TrackingRecord),
    Custom(CustomEvent),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrackingQueueError {
    #[error("tracking pipeline is closed")]
    Closed,
}

/// [`Tracker`] that hands submissions to the tracking pipeline over an
/// unbounded channel, so submitting never blocks.
#[derive(Debug, Clone)]
pub struct TrackingQueue {
    tx: mpsc::UnboundedSender<TrackingMessage>,
}

/// Pipeline end of a [`TrackingQueue`].
#[derive(Debug)]
pub struct TrackingReceiver {
    rx: mpsc::UnboundedReceiver<TrackingMessage>,
}

impl TrackingQueue {
    pub fn new() -> (Self, TrackingReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, TrackingReceiver { rx })
    }

    pub fn push(&self, message: TrackingMessage) -> Result<(), TrackingQueueError> {
        trace!(?message, "queue tracking message");
        self.tx
            .send(message)
            .map_err(|_| TrackingQueueError::Closed)
    }
}

impl Tracker for TrackingQueue {
    fn record(&self, record: TrackingRecord) -> anyhow::Result<()> {
        Ok(self.push(TrackingMessage::Record(record))?)
    }

    fn track_custom_event(&self, event: CustomEvent) -> anyhow::Result<()> {
        Ok(self.push(TrackingMessage::Custom(event))?)
    }
}

impl TrackingReceiver {
    /// Waits for the next message; `None` once every queue handle is gone.
    pub async fn recv(&mut self) -> Option<TrackingMessage> {
        self.rx.recv().await
    }

    /// Takes the next message if one is already queued.
    pub fn try_recv(&mut self) -> Option<TrackingMessage> {
        self.rx.try_recv().ok()
    }
}
