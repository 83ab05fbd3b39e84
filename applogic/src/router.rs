// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    any::Any,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use engagecommon::{
    ActionKind, ClassifiedPayload, CustomEvent, Disposition, EventKind, NotificationAction,
    NotificationEvent, NotificationPayload, PresentationOptions, RouterSettings, TrackingRecord,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::collaborators::{Application, ApplicationState, EventHandler, InAppPresenter, Tracker};

/// Decides, for every notification center callback, what the OS presents,
/// whether the in-app engine takes over and what gets tracked.
///
/// Holds no state across events, so a single instance can serve callbacks
/// from any thread.
pub struct NotificationRouter {
    application: Arc<dyn Application>,
    tracker: Arc<dyn Tracker>,
    in_app: Arc<dyn InAppPresenter>,
    event_handler: Option<Arc<dyn EventHandler>>,
    settings: RouterSettings,
}

impl fmt::Debug for NotificationRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationRouter")
            .field("has_event_handler", &self.event_handler.is_some())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterBuildError {
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
}

impl NotificationRouter {
    pub fn new(
        application: Arc<dyn Application>,
        tracker: Arc<dyn Tracker>,
        in_app: Arc<dyn InAppPresenter>,
    ) -> Self {
        Self {
            application,
            tracker,
            in_app,
            event_handler: None,
            settings: RouterSettings::default(),
        }
    }

    pub fn builder() -> NotificationRouterBuilder {
        NotificationRouterBuilder::default()
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    /// Handles a single notification center callback.
    ///
    /// The event's completion is invoked exactly once, whatever the
    /// collaborators do.
    pub fn handle(&self, event: NotificationEvent) {
        let (kind, payload, action_identifier, completion) = event.into_parts();
        let disposition = self.dispatch(kind, &payload, action_identifier);
        debug!(%kind, ?disposition, "notification handled");
        completion.complete(disposition);
    }

    fn dispatch(
        &self,
        kind: EventKind,
        payload: &NotificationPayload,
        action_identifier: Option<String>,
    ) -> Disposition {
        let classified = ClassifiedPayload::classify(payload);
        debug!(
            %kind,
            in_app = classified.is_in_app(),
            trackable = classified.is_trackable(),
            "notification classified"
        );

        let rendered = self.hand_off_in_app(kind, &classified);

        if self.should_track(kind, &classified) {
            let record = TrackingRecord::new(
                kind,
                action_identifier.clone(),
                classified.tracking_attributes().clone(),
            );
            guarded("tracker", || self.tracker.record(record));
        }

        if let Some(action) = action_identifier
            .as_deref()
            .and_then(|identifier| classified.action(identifier))
        {
            self.run_action(action);
        }

        match kind {
            EventKind::Delivered if rendered => Disposition::Present(PresentationOptions::NONE),
            EventKind::Delivered => Disposition::Present(self.settings.presentation),
            EventKind::Interacted | EventKind::Dismissed => Disposition::Finished,
        }
    }

    /// Returns whether the in-app engine rendered something.
    fn hand_off_in_app(&self, kind: EventKind, classified: &ClassifiedPayload<'_>) -> bool {
        if !classified.is_in_app() {
            return false;
        }
        match kind {
            EventKind::Dismissed => return false,
            EventKind::Delivered if self.settings.in_app_requires_foreground => {
                let state = guarded("application", || Ok(self.application.state()));
                if state != Some(ApplicationState::Active) {
                    debug!(?state, "application not active; in-app message not presented");
                    return false;
                }
            }
            EventKind::Delivered | EventKind::Interacted => {}
        }
        let rendered = guarded("in-app presenter", || self.in_app.present(classified))
            .unwrap_or(false);
        info!(
            campaign_id = classified.in_app().and_then(|message| message.campaign_id()),
            rendered, "in-app message handed off"
        );
        rendered
    }

    fn should_track(&self, kind: EventKind, classified: &ClassifiedPayload<'_>) -> bool {
        match kind {
            EventKind::Interacted => true,
            EventKind::Delivered => classified.is_trackable(),
            EventKind::Dismissed => self.settings.track_dismissals && classified.is_trackable(),
        }
    }

    fn run_action(&self, action: &NotificationAction) {
        info!(action_id = %action.id, "running notification action");
        match &action.kind {
            ActionKind::AppEvent { name, payload } => match &self.event_handler {
                Some(handler) => {
                    guarded("event handler", || {
                        handler.handle_event(name, payload.as_ref())
                    });
                }
                None => warn!(%name, "no event handler registered; dropping app event"),
            },
            ActionKind::OpenExternalUrl { url } => {
                guarded("application", || self.application.open_url(url));
            }
            ActionKind::CustomEvent { name, payload } => {
                let event = CustomEvent::new(name.clone(), payload.clone());
                guarded("tracker", || self.tracker.track_custom_event(event));
            }
        }
    }
}

/// Calls into a collaborator, containing both errors and panics.
fn guarded<T>(collaborator: &'static str, f: impl FnOnce() -> anyhow::Result<T>) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(error)) => {
            error!(collaborator, %error, "collaborator failed");
            None
        }
        Err(payload) => {
            error!(
                collaborator,
                panic = panic_message(payload.as_ref()),
                "collaborator panicked"
            );
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic payload"
    }
}

/// Assembles a [`NotificationRouter`], rejecting missing collaborators.
#[derive(Default)]
pub struct NotificationRouterBuilder {
    application: Option<Arc<dyn Application>>,
    tracker: Option<Arc<dyn Tracker>>,
    in_app: Option<Arc<dyn InAppPresenter>>,
    event_handler: Option<Arc<dyn EventHandler>>,
    settings: RouterSettings,
}

impl NotificationRouterBuilder {
    pub fn application(mut self, application: Arc<dyn Application>) -> Self {
        self.application = Some(application);
        self
    }

    pub fn tracker(mut self, tracker: Arc<dyn Tracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn in_app(mut self, in_app: Arc<dyn InAppPresenter>) -> Self {
        self.in_app = Some(in_app);
        self
    }

    pub fn event_handler(mut self, event_handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(event_handler);
        self
    }

    pub fn settings(mut self, settings: RouterSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> Result<NotificationRouter, RouterBuildError> {
        use RouterBuildError::*;

        Ok(NotificationRouter {
            application: self.application.ok_or(MissingCollaborator("application"))?,
            tracker: self.tracker.ok_or(MissingCollaborator("tracker"))?,
            in_app: self.in_app.ok_or(MissingCollaborator("in-app presenter"))?,
            event_handler: self.event_handler,
            settings: self.settings,
        })
    }
}
