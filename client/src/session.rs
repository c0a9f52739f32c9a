//! Workspace session
//!
//! A [`Session`] owns the workspace state and is its only mutator. User
//! events and task completions both go through [`Session::apply`], which runs
//! the reducer and hands the resulting effects to the dispatcher.

use crate::services::Dispatcher;
use crate::state::AppState;
use chrono::{DateTime, Utc};
use fitness_coach_shared::view::Screen;
use fitness_coach_shared::{update, Event, Notification, WorkspaceState};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

/// A notification that was surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub at: DateTime<Utc>,
    pub notification: Notification,
}

pub struct Session {
    workspace: WorkspaceState,
    dispatcher: Dispatcher,
    completions: UnboundedReceiver<Event>,
    notices: Vec<Notice>,
}

impl Session {
    pub fn new(state: AppState) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            workspace: WorkspaceState::new(),
            dispatcher: Dispatcher::new(state, tx),
            completions: rx,
            notices: Vec::new(),
        }
    }

    pub fn workspace(&self) -> &WorkspaceState {
        &self.workspace
    }

    pub fn screen(&self) -> Screen {
        Screen::from_state(&self.workspace)
    }

    /// Apply one event and execute the effects it produces
    pub fn apply(&mut self, event: Event) {
        if let Some(request) = event.completed_request() {
            self.dispatcher.forget(request);
        }
        debug!(event = event_name(&event), "Applying event");

        for effect in update(&mut self.workspace, event) {
            if let Some(notification) = self.dispatcher.execute(effect) {
                self.notices.push(Notice {
                    at: Utc::now(),
                    notification,
                });
            }
        }
    }

    /// Whether a background task is still expected to report
    pub fn is_busy(&self) -> bool {
        self.dispatcher.has_in_flight()
    }

    /// Wait for the next task completion
    ///
    /// Cancel safe. Pending forever while nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<Event> {
        self.completions.recv().await
    }

    /// Apply completions until no task is in flight
    pub async fn settle(&mut self) {
        while self.is_busy() {
            match self.completions.recv().await {
                Some(event) => self.apply(event),
                None => break,
            }
        }
    }

    /// Notifications surfaced since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::EditField { .. } => "edit_field",
        Event::Submit => "submit",
        Event::Regenerate => "regenerate",
        Event::Back => "back",
        Event::SelectItem { .. } => "select_item",
        Event::DismissOverlay => "dismiss_overlay",
        Event::ReadAloud { .. } => "read_aloud",
        Event::StopReading => "stop_reading",
        Event::Export => "export",
        Event::ToggleTheme => "toggle_theme",
        Event::LoadMotivation => "load_motivation",
        Event::PlanLoaded { .. } => "plan_loaded",
        Event::ImageLoaded { .. } => "image_loaded",
        Event::SpeechLoaded { .. } => "speech_loaded",
        Event::PlaybackFinished { .. } => "playback_finished",
        Event::ExportLoaded { .. } => "export_loaded",
        Event::ExportSaved { .. } => "export_saved",
        Event::MotivationLoaded { .. } => "motivation_loaded",
        Event::RequestFailed { .. } => "request_failed",
    }
}
