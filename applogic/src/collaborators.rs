// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Handles the router is given at construction.
//!
//! Implementations may fail or even panic; the router contains both.

use anyhow::Result;
use engagecommon::{ClassifiedPayload, CustomEvent, TrackingRecord};
use serde_json::{Map, Value};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationState {
    Active,
    Inactive,
    Background,
}

pub trait Application: Send + Sync {
    fn state(&self) -> ApplicationState;

    fn open_url(&self, url: &Url) -> Result<()>;
}

/// Entry point of the tracking pipeline.
///
/// Submissions are fire-and-forget: implementations must not block on
/// delivery.
pub trait Tracker: Send + Sync {
    fn record(&self, record: TrackingRecord) -> Result<()>;

    fn track_custom_event(&self, event: CustomEvent) -> Result<()>;
}

pub trait InAppPresenter: Send + Sync {
    /// Presents the in-app message of the payload.
    ///
    /// Returns whether anything was rendered. Waiting for a render surface is
    /// up to the implementation; the router only needs the answer.
    fn present(&self, payload: &ClassifiedPayload<'_>) -> Result<bool>;
}

/// Receives the app events triggered by action buttons.
pub trait EventHandler: Send + Sync {
    fn handle_event(&self, name: &str, payload: Option<&Map<String, Value>>) -> Result<()>;
}
