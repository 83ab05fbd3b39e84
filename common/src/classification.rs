// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Pure inspection of a notification payload.
//!
//! Recognized keys:
//!
//! * in-app marker, flat form: `"type": "inapp"` with a `"content"` object and
//!   an optional `"campaignId"`;
//! * in-app marker, nested form: an `"ems": {"inapp": {...}}` object with an
//!   optional `"campaign_id"` inside;
//! * analytics: `campaignId`, `messageId` and `sid` (falling back to
//!   `u.sid`), when they hold a string or a number;
//! * action buttons: `"ems": {"actions": [...]}`, see [`NotificationAction`].
//!
//! A recognized key with the wrong shape only disables its own feature.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{MalformedPayload, action::NotificationAction, payload::NotificationPayload};

pub const IN_APP_TYPE: &str = "inapp";
pub const TRACKED_KEYS: [&str; 3] = [CAMPAIGN_ID_KEY, "messageId", SID_KEY];

const TYPE_KEY: &str = "type";
const CONTENT_KEY: &str = "content";
const CAMPAIGN_ID_KEY: &str = "campaignId";
const SID_KEY: &str = "sid";
const USER_KEY: &str = "u";
const EMS_KEY: &str = "ems";
const EMS_IN_APP_KEY: &str = "inapp";
const EMS_CAMPAIGN_ID_KEY: &str = "campaign_id";
const EMS_ACTIONS_KEY: &str = "actions";

/// In-app message content found in a payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InAppMessage<'a> {
    campaign_id: Option<&'a str>,
    content: &'a Map<String, Value>,
}

impl<'a> InAppMessage<'a> {
    pub fn campaign_id(&self) -> Option<&'a str> {
        self.campaign_id
    }

    pub fn content(&self) -> &'a Map<String, Value> {
        self.content
    }
}

/// What the router needs to know about a payload.
///
/// Borrows the payload it was built from and therefore never outlives the
/// event being handled.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPayload<'a> {
    payload: &'a NotificationPayload,
    in_app: Option<InAppMessage<'a>>,
    tracking_attributes: Map<String, Value>,
    actions: Vec<NotificationAction>,
}

impl<'a> ClassifiedPayload<'a> {
    pub fn classify(payload: &'a NotificationPayload) -> Self {
        let in_app = in_app_message(payload)
            .inspect_err(|error| debug!(%error, "ignoring malformed in-app marker"))
            .unwrap_or_default();
        let actions = actions(payload)
            .inspect_err(|error| debug!(%error, "ignoring malformed action buttons"))
            .unwrap_or_default();
        Self {
            payload,
            in_app,
            tracking_attributes: tracking_attributes(payload),
            actions,
        }
    }

    pub fn is_in_app(&self) -> bool {
        self.in_app.is_some()
    }

    pub fn is_trackable(&self) -> bool {
        !self.tracking_attributes.is_empty()
    }

    pub fn in_app(&self) -> Option<&InAppMessage<'a>> {
        self.in_app.as_ref()
    }

    /// The subset of the payload relevant to analytics.
    pub fn tracking_attributes(&self) -> &Map<String, Value> {
        &self.tracking_attributes
    }

    pub fn actions(&self) -> &[NotificationAction] {
        &self.actions
    }

    /// Looks up the action button the user picked.
    pub fn action(&self, identifier: &str) -> Option<&NotificationAction> {
        self.actions.iter().find(|action| action.id == identifier)
    }

    pub fn payload(&self) -> &'a NotificationPayload {
        self.payload
    }
}

fn in_app_message(
    payload: &NotificationPayload,
) -> Result<Option<InAppMessage<'_>>, MalformedPayload> {
    if payload.get(TYPE_KEY).and_then(Value::as_str) == Some(IN_APP_TYPE) {
        let content = payload
            .get(CONTENT_KEY)
            .ok_or(MalformedPayload::MissingInAppContent)?
            .as_object()
            .ok_or(MalformedPayload::NotAnObject { key: CONTENT_KEY })?;
        return Ok(Some(InAppMessage {
            campaign_id: payload.get(CAMPAIGN_ID_KEY).and_then(Value::as_str),
            content,
        }));
    }

    let Some(ems) = payload.get(EMS_KEY) else {
        return Ok(None);
    };
    let ems = ems
        .as_object()
        .ok_or(MalformedPayload::NotAnObject { key: EMS_KEY })?;
    let Some(in_app) = ems.get(EMS_IN_APP_KEY) else {
        return Ok(None);
    };
    let content = in_app
        .as_object()
        .ok_or(MalformedPayload::NotAnObject { key: "ems.inapp" })?;
    Ok(Some(InAppMessage {
        campaign_id: content.get(EMS_CAMPAIGN_ID_KEY).and_then(Value::as_str),
        content,
    }))
}

fn tracking_attributes(payload: &NotificationPayload) -> Map<String, Value> {
    let mut attributes = Map::new();
    for key in TRACKED_KEYS {
        if let Some(value) = payload.get(key).filter(|value| is_scalar(value)) {
            attributes.insert(key.to_owned(), value.clone());
        }
    }
    if !attributes.contains_key(SID_KEY) {
        let sid = payload
            .get(USER_KEY)
            .and_then(|user| user.get(SID_KEY))
            .filter(|value| is_scalar(value));
        if let Some(sid) = sid {
            attributes.insert(SID_KEY.to_owned(), sid.clone());
        }
    }
    attributes
}

fn is_scalar(value: &Value) -> bool {
    value.is_string() || value.is_number()
}

fn actions(payload: &NotificationPayload) -> Result<Vec<NotificationAction>, MalformedPayload> {
    let Some(actions) = payload
        .get(EMS_KEY)
        .and_then(|ems| ems.get(EMS_ACTIONS_KEY))
    else {
        return Ok(Vec::new());
    };
    let actions = actions
        .as_array()
        .ok_or(MalformedPayload::NotAnArray { key: "ems.actions" })?;
    Ok(actions
        .iter()
        .enumerate()
        .filter_map(|(index, action)| {
            NotificationAction::deserialize(action)
                .inspect_err(|error| debug!(index, %error, "skipping malformed action button"))
                .ok()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::action::ActionKind;

    use super::*;

    fn payload(value: Value) -> NotificationPayload {
        NotificationPayload::try_from(value).unwrap()
    }

    #[test]
    fn flat_in_app_marker() {
        let payload = payload(json!({
            "type": "inapp",
            "campaignId": "7",
            "content": {"html": "<p>Hi</p>"},
        }));
        let classified = ClassifiedPayload::classify(&payload);
        assert!(classified.is_in_app());
        let in_app = classified.in_app().unwrap();
        assert_eq!(in_app.campaign_id(), Some("7"));
        assert_eq!(in_app.content().get("html"), Some(&json!("<p>Hi</p>")));
    }

    #[test]
    fn nested_in_app_marker() {
        let payload = payload(json!({
            "ems": {"inapp": {"campaign_id": "12", "url": "https://example.com/iam"}},
        }));
        let classified = ClassifiedPayload::classify(&payload);
        let in_app = classified.in_app().unwrap();
        assert_eq!(in_app.campaign_id(), Some("12"));
        assert_eq!(
            in_app.content().get("url"),
            Some(&json!("https://example.com/iam"))
        );
    }

    #[test]
    fn malformed_in_app_markers_are_not_in_app() {
        let malformed = [
            json!({"type": "inapp"}),
            json!({"type": "inapp", "content": "<p>Hi</p>"}),
            json!({"type": "inapp", "content": null}),
            json!({"ems": "inapp"}),
            json!({"ems": {"inapp": ["not", "an", "object"]}}),
        ];
        for value in malformed {
            let payload = payload(value);
            let classified = ClassifiedPayload::classify(&payload);
            assert!(!classified.is_in_app(), "{payload:?}");
        }
    }

    #[test]
    fn malformed_marker_errors() {
        assert_eq!(
            in_app_message(&payload(json!({"type": "inapp"}))),
            Err(MalformedPayload::MissingInAppContent)
        );
        assert_eq!(
            in_app_message(&payload(json!({"type": "inapp", "content": 1}))),
            Err(MalformedPayload::NotAnObject { key: "content" })
        );
        assert_eq!(
            in_app_message(&payload(json!({"ems": {"inapp": true}}))),
            Err(MalformedPayload::NotAnObject { key: "ems.inapp" })
        );
    }

    #[test]
    fn unrecognized_payload_is_neither() {
        let payload = payload(json!({"aps": {"alert": "Hello"}, "type": "promo"}));
        let classified = ClassifiedPayload::classify(&payload);
        assert!(!classified.is_in_app());
        assert!(!classified.is_trackable());
        assert!(classified.actions().is_empty());
    }

    #[test]
    fn tracking_attributes_subset() {
        let payload = payload(json!({
            "campaignId": "42",
            "messageId": 1001,
            "sid": {"nested": true},
            "u": {"sid": "abc"},
            "aps": {"alert": "Hello"},
        }));
        let classified = ClassifiedPayload::classify(&payload);
        assert!(classified.is_trackable());
        assert_eq!(
            Value::Object(classified.tracking_attributes().clone()),
            json!({"campaignId": "42", "messageId": 1001, "sid": "abc"})
        );
    }

    #[test]
    fn top_level_sid_wins_over_user_sid() {
        let payload = payload(json!({"sid": "top", "u": {"sid": "nested"}}));
        let classified = ClassifiedPayload::classify(&payload);
        assert_eq!(
            classified.tracking_attributes().get("sid"),
            Some(&json!("top"))
        );
    }

    #[test]
    fn action_buttons_skip_malformed_entries() {
        let payload = payload(json!({
            "ems": {"actions": [
                {"id": "buy", "title": "Buy", "type": "MECustomEvent", "name": "purchase"},
                {"id": "broken", "type": "OpenExternalUrl"},
                {"id": "web", "title": "Open", "type": "OpenExternalUrl", "url": "https://example.com"},
                "garbage",
            ]},
        }));
        let classified = ClassifiedPayload::classify(&payload);
        let ids: Vec<_> = classified.actions().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["buy", "web"]);
        assert!(matches!(
            classified.action("buy").map(|a| &a.kind),
            Some(ActionKind::CustomEvent { name, .. }) if name == "purchase"
        ));
        assert!(classified.action("broken").is_none());
        assert!(classified.action("missing").is_none());
    }

    #[test]
    fn actions_not_an_array() {
        let payload = payload(json!({"ems": {"actions": {"id": "buy"}}}));
        assert_eq!(
            actions(&payload),
            Err(MalformedPayload::NotAnArray { key: "ems.actions" })
        );
        assert!(ClassifiedPayload::classify(&payload).actions().is_empty());
    }
}
