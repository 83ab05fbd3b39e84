// SPDX-FileCopyrightText: 2023 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Routing of OS notification center callbacks to the in-app messaging
//! engine and the tracking pipeline.
//!
//! ```text
//! notification center ──▶ NotificationRouter ──▶ InAppPresenter
//!         ▲                      │        └────▶ Tracker (TrackingQueue)
//!         └──── Disposition ◀────┘
//! ```

pub mod collaborators;
pub mod configurations;
pub mod delegate;
pub mod logging;
pub mod router;
pub mod tracking_queue;

#[cfg(test)]
pub(crate) mod testing;

pub use collaborators::{Application, ApplicationState, EventHandler, InAppPresenter, Tracker};
pub use delegate::NotificationCenterDelegate;
pub use router::{NotificationRouter, NotificationRouterBuilder, RouterBuildError};
pub use tracking_queue::{TrackingMessage, TrackingQueue, TrackingQueueError, TrackingReceiver};
