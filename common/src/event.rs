// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{disposition::Disposition, payload::NotificationPayload};

/// Lifecycle phase reported by the OS notification center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Delivered while the app is in the foreground.
    Delivered,
    /// The user tapped the notification or picked one of its actions.
    Interacted,
    Dismissed,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Delivered => write!(f, "delivered"),
            EventKind::Interacted => write!(f, "interacted"),
            EventKind::Dismissed => write!(f, "dismissed"),
        }
    }
}

/// Event as a host binding ships it across a language boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingNotification {
    pub kind: EventKind,
    #[serde(default)]
    pub payload: NotificationPayload,
    #[serde(default)]
    pub action_identifier: Option<String>,
}

pub type CompletionHandler = Box<dyn FnOnce(Disposition) + Send + 'static>;

/// Hands control back to the OS for a single event.
///
/// Consumed by [`Completion::complete`], so it cannot be invoked twice. If it
/// is dropped without being completed, the fallback disposition is sent
/// instead, so the OS is never left waiting.
pub struct Completion {
    handler: Option<CompletionHandler>,
    fallback: Disposition,
}

impl Completion {
    pub fn new(handler: impl FnOnce(Disposition) + Send + 'static, fallback: Disposition) -> Self {
        Self {
            handler: Some(Box::new(handler)),
            fallback,
        }
    }

    pub fn complete(mut self, disposition: Disposition) {
        if let Some(handler) = self.handler.take() {
            handler(disposition);
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            warn!(fallback = ?self.fallback, "completion dropped; sending fallback disposition");
            handler(self.fallback);
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("pending", &self.handler.is_some())
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// A single lifecycle callback from the notification center.
#[derive(Debug)]
pub struct NotificationEvent {
    kind: EventKind,
    payload: NotificationPayload,
    action_identifier: Option<String>,
    completion: Completion,
}

impl NotificationEvent {
    fn new(
        kind: EventKind,
        payload: NotificationPayload,
        action_identifier: Option<String>,
        completion: impl FnOnce(Disposition) + Send + 'static,
    ) -> Self {
        Self {
            kind,
            payload,
            action_identifier,
            completion: Completion::new(completion, Disposition::fallback_for(kind)),
        }
    }

    pub fn delivered(
        payload: NotificationPayload,
        completion: impl FnOnce(Disposition) + Send + 'static,
    ) -> Self {
        Self::new(EventKind::Delivered, payload, None, completion)
    }

    pub fn interacted(
        payload: NotificationPayload,
        action_identifier: impl Into<String>,
        completion: impl FnOnce(Disposition) + Send + 'static,
    ) -> Self {
        Self::new(
            EventKind::Interacted,
            payload,
            Some(action_identifier.into()),
            completion,
        )
    }

    pub fn dismissed(
        payload: NotificationPayload,
        completion: impl FnOnce(Disposition) + Send + 'static,
    ) -> Self {
        Self::new(EventKind::Dismissed, payload, None, completion)
    }

    /// Builds an event from its wire shape. An action identifier is only kept
    /// for interacted events.
    pub fn from_incoming(
        incoming: IncomingNotification,
        completion: impl FnOnce(Disposition) + Send + 'static,
    ) -> Self {
        let action_identifier = match incoming.kind {
            EventKind::Interacted => incoming.action_identifier,
            EventKind::Delivered | EventKind::Dismissed => None,
        };
        Self::new(incoming.kind, incoming.payload, action_identifier, completion)
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn payload(&self) -> &NotificationPayload {
        &self.payload
    }

    pub fn action_identifier(&self) -> Option<&str> {
        self.action_identifier.as_deref()
    }

    pub fn into_parts(self) -> (EventKind, NotificationPayload, Option<String>, Completion) {
        (
            self.kind,
            self.payload,
            self.action_identifier,
            self.completion,
        )
    }
}
