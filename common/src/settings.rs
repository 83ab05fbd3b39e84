// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::Deserialize;

use crate::disposition::PresentationOptions;

/// Configuration of the notification router.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct RouterSettings {
    /// Presentation requested for delivered notifications that the in-app
    /// engine does not take over.
    pub presentation: PresentationOptions,
    /// Only hand delivered in-app messages to the in-app engine while the
    /// application is active.
    pub in_app_requires_foreground: bool,
    pub track_dismissals: bool,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            presentation: PresentationOptions::default(),
            in_app_requires_foreground: true,
            track_dismissals: true,
        }
    }
}
