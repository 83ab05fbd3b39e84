// SPDX-FileCopyrightText: 2025 Phoenix R&D GmbH <hello@phnx.im>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Recording fakes of the router's collaborators.

use std::sync::Arc;

use anyhow::{Result, bail};
use engagecommon::{
    ClassifiedPayload, CompletionHandler, CustomEvent, Disposition, TrackingRecord,
};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use url::Url;

use crate::collaborators::{Application, ApplicationState, EventHandler, InAppPresenter, Tracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Behavior {
    Succeed,
    Fail,
    Panic,
}

impl Behavior {
    fn apply(self, collaborator: &str) -> Result<()> {
        match self {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => bail!("{collaborator} failed"),
            Behavior::Panic => panic!("{collaborator} panicked"),
        }
    }
}

pub(crate) struct FakeApplication {
    state: ApplicationState,
    behavior: Behavior,
    opened_urls: Mutex<Vec<Url>>,
}

impl FakeApplication {
    pub(crate) fn new(state: ApplicationState) -> Self {
        Self::with_behavior(state, Behavior::Succeed)
    }

    /// `Fail` only affects `open_url`; `Panic` affects both methods.
    pub(crate) fn with_behavior(state: ApplicationState, behavior: Behavior) -> Self {
        Self {
            state,
            behavior,
            opened_urls: Default::default(),
        }
    }

    pub(crate) fn opened_urls(&self) -> Vec<Url> {
        self.opened_urls.lock().clone()
    }
}

impl Application for FakeApplication {
    fn state(&self) -> ApplicationState {
        if self.behavior == Behavior::Panic {
            panic!("application state panicked");
        }
        self.state
    }

    fn open_url(&self, url: &Url) -> Result<()> {
        self.behavior.apply("open_url")?;
        self.opened_urls.lock().push(url.clone());
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeTracker {
    behavior: Option<Behavior>,
    submissions: Mutex<usize>,
    records: Mutex<Vec<TrackingRecord>>,
    custom_events: Mutex<Vec<CustomEvent>>,
}

impl FakeTracker {
    pub(crate) fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior: Some(behavior),
            ..Default::default()
        }
    }

    /// Number of `record` calls, successful or not.
    pub(crate) fn submissions(&self) -> usize {
        *self.submissions.lock()
    }

    pub(crate) fn records(&self) -> Vec<TrackingRecord> {
        self.records.lock().clone()
    }

    pub(crate) fn custom_events(&self) -> Vec<CustomEvent> {
        self.custom_events.lock().clone()
    }

    fn behavior(&self) -> Behavior {
        self.behavior.unwrap_or(Behavior::Succeed)
    }
}

impl Tracker for FakeTracker {
    fn record(&self, record: TrackingRecord) -> Result<()> {
        *self.submissions.lock() += 1;
        self.behavior().apply("record")?;
        self.records.lock().push(record);
        Ok(())
    }

    fn track_custom_event(&self, event: CustomEvent) -> Result<()> {
        self.behavior().apply("track_custom_event")?;
        self.custom_events.lock().push(event);
        Ok(())
    }
}

pub(crate) struct FakeInApp {
    rendered: bool,
    behavior: Behavior,
    presented: Mutex<Vec<Map<String, Value>>>,
}

impl FakeInApp {
    pub(crate) fn new(rendered: bool) -> Self {
        Self::with_behavior(rendered, Behavior::Succeed)
    }

    pub(crate) fn with_behavior(rendered: bool, behavior: Behavior) -> Self {
        Self {
            rendered,
            behavior,
            presented: Default::default(),
        }
    }

    /// Content of every in-app message handed over successfully.
    pub(crate) fn presented(&self) -> Vec<Map<String, Value>> {
        self.presented.lock().clone()
    }
}

impl InAppPresenter for FakeInApp {
    fn present(&self, payload: &ClassifiedPayload<'_>) -> Result<bool> {
        self.behavior.apply("present")?;
        if let Some(message) = payload.in_app() {
            self.presented.lock().push(message.content().clone());
        }
        Ok(self.rendered)
    }
}

#[derive(Default)]
pub(crate) struct FakeEventHandler {
    events: Mutex<Vec<(String, Option<Map<String, Value>>)>>,
}

impl FakeEventHandler {
    pub(crate) fn events(&self) -> Vec<(String, Option<Map<String, Value>>)> {
        self.events.lock().clone()
    }
}

impl EventHandler for FakeEventHandler {
    fn handle_event(&self, name: &str, payload: Option<&Map<String, Value>>) -> Result<()> {
        self.events
            .lock()
            .push((name.to_owned(), payload.cloned()));
        Ok(())
    }
}

/// Collects every disposition a completion handler receives.
#[derive(Default, Clone)]
pub(crate) struct CompletionProbe {
    dispositions: Arc<Mutex<Vec<Disposition>>>,
}

impl CompletionProbe {
    pub(crate) fn handler(&self) -> CompletionHandler {
        let dispositions = self.dispositions.clone();
        Box::new(move |disposition| dispositions.lock().push(disposition))
    }

    pub(crate) fn dispositions(&self) -> Vec<Disposition> {
        self.dispositions.lock().clone()
    }
}
