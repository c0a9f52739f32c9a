//! Plan workspace state machine
//!
//! The whole client-side state lives in [`WorkspaceState`]. It only changes
//! through [`update`], which applies one [`Event`] and returns the
//! [`Effect`]s the host has to carry out (HTTP calls, playback, saving a
//! download, showing a notification). Hosts report back with further events.
//!
//! Every outstanding request is identified by a [`RequestId`] stored in the
//! slot that owns it. A completion whose id no longer matches its slot is
//! stale and changes nothing.

mod update;

pub use update::update;

use crate::models::{ItemKind, Plan, Profile, ProfileField, Section};
use crate::notify::{Action, Notification};
use crate::types::{ImageRequest, SpeechRequest};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one outstanding request, unique within a workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Which of the two mutually exclusive views is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    Form,
    PlanView,
}

/// Image overlay for a selected exercise or food item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOverlay {
    pub item_name: String,
    pub kind: ItemKind,
    pub status: OverlayStatus,
}

impl ImageOverlay {
    /// The image request still in flight, if any
    pub fn pending_request(&self) -> Option<RequestId> {
        match self.status {
            OverlayStatus::Loading { request } => Some(request),
            OverlayStatus::Shown { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum OverlayStatus {
    Loading { request: RequestId },
    Shown { image: String },
}

/// A read-aloud in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub section: Section,
    pub request: RequestId,
    pub phase: ReadPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadPhase {
    /// Waiting for synthesized audio
    Fetching,
    /// Audio is playing
    Playing,
}

/// Complete client state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceState {
    pub profile: Profile,
    pub plan: Option<Plan>,
    /// Busy flag for plan generation
    pub plan_request: Option<RequestId>,
    pub overlay: Option<ImageOverlay>,
    pub reading: Option<Reading>,
    pub export_request: Option<RequestId>,
    pub motivation: Option<String>,
    pub motivation_request: Option<RequestId>,
    pub theme: Theme,
    #[serde(default)]
    next_request: u64,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        if self.plan.is_some() {
            ViewMode::PlanView
        } else {
            ViewMode::Form
        }
    }

    pub fn is_generating(&self) -> bool {
        self.plan_request.is_some()
    }

    pub fn is_image_loading(&self) -> bool {
        self.overlay
            .as_ref()
            .is_some_and(|overlay| overlay.pending_request().is_some())
    }

    pub fn is_reading(&self) -> bool {
        self.reading.is_some()
    }

    /// Section currently being read, if any
    pub fn reading_section(&self) -> Option<Section> {
        self.reading.map(|reading| reading.section)
    }

    pub fn is_exporting(&self) -> bool {
        self.export_request.is_some()
    }

    fn allocate_request(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }
}

/// A backend call and its request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "body", rename_all = "camelCase")]
pub enum ApiCall {
    GeneratePlan(Profile),
    GenerateImage(ImageRequest),
    TextToSpeech(SpeechRequest),
    ExportPdf(Plan),
    Motivation,
}

impl ApiCall {
    /// The user-facing action this call belongs to
    pub fn action(&self) -> Action {
        match self {
            ApiCall::GeneratePlan(_) => Action::GeneratePlan,
            ApiCall::GenerateImage(_) => Action::GenerateImage,
            ApiCall::TextToSpeech(_) => Action::ReadAloud,
            ApiCall::ExportPdf(_) => Action::ExportPdf,
            ApiCall::Motivation => Action::Motivation,
        }
    }
}

/// Something that happened: user input or an outcome reported by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Event {
    EditField { field: ProfileField, value: String },
    Submit,
    Regenerate,
    Back,
    SelectItem { item_name: String, kind: ItemKind },
    DismissOverlay,
    ReadAloud { section: Section },
    StopReading,
    Export,
    ToggleTheme,
    LoadMotivation,

    PlanLoaded { request: RequestId, plan: Plan },
    ImageLoaded { request: RequestId, image: String },
    SpeechLoaded { request: RequestId, audio: Vec<u8> },
    PlaybackFinished { request: RequestId },
    ExportLoaded { request: RequestId, document: Vec<u8> },
    ExportSaved { request: RequestId, location: String },
    MotivationLoaded { request: RequestId, quote: String },
    RequestFailed { request: RequestId, action: Action, reason: String },
}

impl Event {
    /// Request whose host-side work this event concludes
    pub fn completed_request(&self) -> Option<RequestId> {
        match self {
            Event::PlanLoaded { request, .. }
            | Event::ImageLoaded { request, .. }
            | Event::SpeechLoaded { request, .. }
            | Event::PlaybackFinished { request }
            | Event::ExportLoaded { request, .. }
            | Event::ExportSaved { request, .. }
            | Event::MotivationLoaded { request, .. }
            | Event::RequestFailed { request, .. } => Some(*request),
            _ => None,
        }
    }
}

/// Work the host must carry out after an update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Effect {
    /// Perform a backend call and report its outcome under `request`
    Dispatch { request: RequestId, call: ApiCall },
    /// Abandon an outstanding request; its outcome will be ignored
    Cancel { request: RequestId },
    /// Play synthesized audio, then report `PlaybackFinished`
    Play { request: RequestId, audio: Vec<u8> },
    StopPlayback { request: RequestId },
    /// Hand a document to the user as a download, then report `ExportSaved`
    SaveFile {
        request: RequestId,
        file_name: String,
        contents: Vec<u8>,
    },
    Notify(Notification),
}
