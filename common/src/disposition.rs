// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};

use crate::event::EventKind;

/// How the OS should present a notification delivered while the app is in
/// the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationOptions {
    pub alert: bool,
    pub sound: bool,
    pub badge: bool,
}

impl PresentationOptions {
    pub const NONE: Self = Self {
        alert: false,
        sound: false,
        badge: false,
    };

    pub const ALL: Self = Self {
        alert: true,
        sound: true,
        badge: true,
    };

    pub fn is_silent(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for PresentationOptions {
    fn default() -> Self {
        Self::ALL
    }
}

/// Value handed back to the OS through an event's completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "options", rename_all = "snake_case")]
pub enum Disposition {
    /// Answer to a delivered event.
    Present(PresentationOptions),
    /// Answer to an interacted or dismissed event.
    Finished,
}

impl Disposition {
    /// Disposition used when an event's completion is dropped before the
    /// router decided anything.
    pub fn fallback_for(kind: EventKind) -> Self {
        match kind {
            EventKind::Delivered => Self::Present(PresentationOptions::default()),
            EventKind::Interacted | EventKind::Dismissed => Self::Finished,
        }
    }

    /// Whether the OS is asked to show nothing on its own.
    pub fn suppresses_presentation(&self) -> bool {
        matches!(self, Self::Present(options) if options.is_silent())
    }
}
