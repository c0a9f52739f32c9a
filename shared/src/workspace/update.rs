//! Transition logic for the plan workspace

use super::{
    ApiCall, Effect, Event, ImageOverlay, OverlayStatus, ReadPhase, Reading, RequestId,
    WorkspaceState,
};
use crate::models::{ItemKind, Section};
use crate::notify::{Action, Notification};
use crate::types::{ImageRequest, SpeechRequest, EXPORT_FILE_NAME};
use crate::validation::validate_profile;

/// Apply one event to the workspace and return the effects it calls for
pub fn update(state: &mut WorkspaceState, event: Event) -> Vec<Effect> {
    match event {
        Event::EditField { field, value } => {
            state.profile.set(field, value);
            Vec::new()
        }
        Event::Submit => submit(state),
        Event::Regenerate => regenerate(state),
        Event::Back => {
            state.plan = None;
            Vec::new()
        }
        Event::SelectItem { item_name, kind } => select_item(state, item_name, kind),
        Event::DismissOverlay => dismiss_overlay(state),
        Event::ReadAloud { section } => read_aloud(state, section),
        Event::StopReading => stop_reading(state),
        Event::Export => export(state),
        Event::ToggleTheme => {
            state.theme = state.theme.toggled();
            Vec::new()
        }
        Event::LoadMotivation => load_motivation(state),

        Event::PlanLoaded { request, plan } => {
            if take_matching(&mut state.plan_request, request) {
                state.plan = Some(plan);
            }
            Vec::new()
        }
        Event::ImageLoaded { request, image } => {
            if let Some(overlay) = state.overlay.as_mut() {
                if overlay.pending_request() == Some(request) {
                    overlay.status = OverlayStatus::Shown { image };
                }
            }
            Vec::new()
        }
        Event::SpeechLoaded { request, audio } => match state.reading.as_mut() {
            Some(reading) if reading.request == request && reading.phase == ReadPhase::Fetching => {
                reading.phase = ReadPhase::Playing;
                vec![Effect::Play { request, audio }]
            }
            _ => Vec::new(),
        },
        Event::PlaybackFinished { request } => {
            if state.reading.is_some_and(|reading| reading.request == request) {
                state.reading = None;
            }
            Vec::new()
        }
        Event::ExportLoaded { request, document } => {
            if state.export_request == Some(request) {
                vec![Effect::SaveFile {
                    request,
                    file_name: EXPORT_FILE_NAME.to_string(),
                    contents: document,
                }]
            } else {
                Vec::new()
            }
        }
        Event::ExportSaved { request, location } => {
            if take_matching(&mut state.export_request, request) {
                vec![Effect::Notify(Notification::notice(format!(
                    "Plan saved to {}",
                    location
                )))]
            } else {
                Vec::new()
            }
        }
        Event::MotivationLoaded { request, quote } => {
            if take_matching(&mut state.motivation_request, request) {
                state.motivation = Some(quote).filter(|quote| !quote.is_empty());
            }
            Vec::new()
        }
        Event::RequestFailed {
            request,
            action,
            reason,
        } => request_failed(state, request, action, reason),
    }
}

/// Clear `slot` if it holds `request`; reports whether it did
fn take_matching(slot: &mut Option<RequestId>, request: RequestId) -> bool {
    if *slot == Some(request) {
        *slot = None;
        true
    } else {
        false
    }
}

fn submit(state: &mut WorkspaceState) -> Vec<Effect> {
    if state.is_generating() || state.plan.is_some() {
        return Vec::new();
    }
    if let Err(message) = validate_profile(&state.profile) {
        return vec![Effect::Notify(Notification::alert(message))];
    }
    start_generation(state)
}

/// Drops the held plan before refetching, so a failed regenerate leaves the
/// user at the empty form.
fn regenerate(state: &mut WorkspaceState) -> Vec<Effect> {
    if state.plan.is_none() || state.is_generating() {
        return Vec::new();
    }
    if let Err(message) = validate_profile(&state.profile) {
        return vec![Effect::Notify(Notification::alert(message))];
    }
    state.plan = None;
    start_generation(state)
}

fn start_generation(state: &mut WorkspaceState) -> Vec<Effect> {
    let request = state.allocate_request();
    state.plan_request = Some(request);
    vec![Effect::Dispatch {
        request,
        call: ApiCall::GeneratePlan(state.profile.clone()),
    }]
}

fn select_item(state: &mut WorkspaceState, item_name: String, kind: ItemKind) -> Vec<Effect> {
    if state.plan.is_none() {
        return Vec::new();
    }

    let mut effects = Vec::new();
    if let Some(stale) = state.overlay.as_ref().and_then(ImageOverlay::pending_request) {
        effects.push(Effect::Cancel { request: stale });
    }

    let request = state.allocate_request();
    state.overlay = Some(ImageOverlay {
        item_name: item_name.clone(),
        kind,
        status: OverlayStatus::Loading { request },
    });
    effects.push(Effect::Dispatch {
        request,
        call: ApiCall::GenerateImage(ImageRequest { item_name, kind }),
    });
    effects
}

fn dismiss_overlay(state: &mut WorkspaceState) -> Vec<Effect> {
    match state.overlay.take().and_then(|overlay| overlay.pending_request()) {
        Some(request) => vec![Effect::Cancel { request }],
        None => Vec::new(),
    }
}

/// One section reads at a time; a start while reading is ignored.
fn read_aloud(state: &mut WorkspaceState, section: Section) -> Vec<Effect> {
    if state.is_reading() {
        return Vec::new();
    }
    let text = match state.plan.as_ref().map(|plan| plan.section_json(section)) {
        None => return Vec::new(),
        Some(Ok(text)) => text,
        Some(Err(err)) => {
            return vec![Effect::Notify(Notification::failed(
                Action::ReadAloud,
                err.to_string(),
            ))]
        }
    };

    let request = state.allocate_request();
    state.reading = Some(Reading {
        section,
        request,
        phase: ReadPhase::Fetching,
    });
    vec![Effect::Dispatch {
        request,
        call: ApiCall::TextToSpeech(SpeechRequest { text }),
    }]
}

fn stop_reading(state: &mut WorkspaceState) -> Vec<Effect> {
    match state.reading.take() {
        Some(Reading {
            request,
            phase: ReadPhase::Fetching,
            ..
        }) => vec![Effect::Cancel { request }],
        Some(Reading {
            request,
            phase: ReadPhase::Playing,
            ..
        }) => vec![Effect::StopPlayback { request }],
        None => Vec::new(),
    }
}

fn export(state: &mut WorkspaceState) -> Vec<Effect> {
    let plan = match state.plan.as_ref() {
        Some(plan) => plan.clone(),
        None => return Vec::new(),
    };

    let mut effects = Vec::new();
    if let Some(stale) = state.export_request.take() {
        effects.push(Effect::Cancel { request: stale });
    }
    let request = state.allocate_request();
    state.export_request = Some(request);
    effects.push(Effect::Dispatch {
        request,
        call: ApiCall::ExportPdf(plan),
    });
    effects
}

fn load_motivation(state: &mut WorkspaceState) -> Vec<Effect> {
    if state.motivation_request.is_some() {
        return Vec::new();
    }
    let request = state.allocate_request();
    state.motivation_request = Some(request);
    vec![Effect::Dispatch {
        request,
        call: ApiCall::Motivation,
    }]
}

fn request_failed(
    state: &mut WorkspaceState,
    request: RequestId,
    action: Action,
    reason: String,
) -> Vec<Effect> {
    let current = match action {
        Action::GeneratePlan => take_matching(&mut state.plan_request, request),
        Action::GenerateImage => {
            let pending = state.overlay.as_ref().and_then(ImageOverlay::pending_request);
            if pending == Some(request) {
                state.overlay = None;
                true
            } else {
                false
            }
        }
        Action::ReadAloud => {
            if state.reading.is_some_and(|reading| reading.request == request) {
                state.reading = None;
                true
            } else {
                false
            }
        }
        Action::ExportPdf => take_matching(&mut state.export_request, request),
        Action::Motivation => take_matching(&mut state.motivation_request, request),
    };

    if current {
        vec![Effect::Notify(Notification::failed(action, reason))]
    } else {
        Vec::new()
    }
}
