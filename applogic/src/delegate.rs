// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Callback surface that host bindings adapt the platform's notification
//! center delegate to.

use engagecommon::{CompletionHandler, NotificationEvent, NotificationPayload};

use crate::router::NotificationRouter;

pub trait NotificationCenterDelegate: Send + Sync {
    /// A notification arrived while the app is in the foreground.
    fn will_present(&self, payload: NotificationPayload, completion: CompletionHandler);

    /// The user tapped the notification or picked one of its actions.
    fn did_receive(
        &self,
        payload: NotificationPayload,
        action_identifier: String,
        completion: CompletionHandler,
    );

    fn did_dismiss(&self, payload: NotificationPayload, completion: CompletionHandler);
}

impl NotificationCenterDelegate for NotificationRouter {
    fn will_present(&self, payload: NotificationPayload, completion: CompletionHandler) {
        self.handle(NotificationEvent::delivered(payload, completion));
    }

    fn did_receive(
        &self,
        payload: NotificationPayload,
        action_identifier: String,
        completion: CompletionHandler,
    ) {
        self.handle(NotificationEvent::interacted(
            payload,
            action_identifier,
            completion,
        ));
    }

    fn did_dismiss(&self, payload: NotificationPayload, completion: CompletionHandler) {
        self.handle(NotificationEvent::dismissed(payload, completion));
    }
}
