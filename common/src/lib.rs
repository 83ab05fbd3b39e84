// SPDX-FileCopyrightText: 2023 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Data model shared by the notification router and the host bindings that
//! feed it.

use thiserror::Error;

pub mod action;
pub mod classification;
pub mod disposition;
pub mod event;
pub mod payload;
pub mod settings;
pub mod tracking;

pub use action::{ActionKind, NotificationAction};
pub use classification::{ClassifiedPayload, InAppMessage};
pub use disposition::{Disposition, PresentationOptions};
pub use event::{Completion, CompletionHandler, EventKind, IncomingNotification, NotificationEvent};
pub use payload::NotificationPayload;
pub use settings::RouterSettings;
pub use tracking::{CustomEvent, TrackingRecord};

/// A recognized payload key is present but does not have the expected shape.
///
/// Only the feature the key belongs to is affected; the rest of the payload
/// is still classified.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedPayload {
    #[error("`{key}` is expected to be an object")]
    NotAnObject { key: &'static str },
    #[error("`{key}` is expected to be an array")]
    NotAnArray { key: &'static str },
    #[error("in-app marker without `content`")]
    MissingInAppContent,
}
