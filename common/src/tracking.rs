// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::event::EventKind;

/// Interaction record submitted to the tracking pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingRecord {
    pub kind: EventKind,
    pub action_identifier: Option<String>,
    /// Analytics subset of the notification payload.
    pub attributes: Map<String, Value>,
    pub occurred_at: DateTime<Utc>,
}

impl TrackingRecord {
    pub fn new(
        kind: EventKind,
        action_identifier: Option<String>,
        attributes: Map<String, Value>,
    ) -> Self {
        Self {
            kind,
            action_identifier,
            attributes,
            occurred_at: Utc::now(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

/// Custom event triggered by an action button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEvent {
    pub name: String,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
}

impl CustomEvent {
    pub fn new(name: impl Into<String>, attributes: Option<Map<String, Value>>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }
}
