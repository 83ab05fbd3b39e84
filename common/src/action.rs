// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Action buttons attached to a notification under `ems.actions`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

/// A button the user can pick from the notification.
///
/// The `id` is what the OS reports back as the action identifier when the
/// button is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub kind: ActionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ActionKind {
    /// Forwarded to the application's event handler.
    #[serde(rename = "MEAppEvent")]
    AppEvent {
        name: String,
        #[serde(default)]
        payload: Option<Map<String, Value>>,
    },
    /// Opened by the application.
    #[serde(rename = "OpenExternalUrl")]
    OpenExternalUrl { url: Url },
    /// Submitted to the tracking pipeline as a custom event.
    #[serde(rename = "MECustomEvent")]
    CustomEvent {
        name: String,
        #[serde(default)]
        payload: Option<Map<String, Value>>,
    },
}
