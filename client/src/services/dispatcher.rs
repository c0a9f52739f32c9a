//! Effect execution
//!
//! The dispatcher carries out the effects the workspace asks for. Each
//! backend call, playback and file save runs as its own tokio task whose
//! handle is kept under the request id, so a superseding action can abort
//! it. Every task reports exactly one event back over the completion channel.

use crate::error::ClientError;
use crate::services::export::save_download;
use crate::state::AppState;
use fitness_coach_shared::{Action, ApiCall, Effect, Event, Notification, RequestId, Severity};
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

pub struct Dispatcher {
    state: AppState,
    completions: UnboundedSender<Event>,
    tasks: HashMap<RequestId, JoinHandle<()>>,
}

impl Dispatcher {
    pub fn new(state: AppState, completions: UnboundedSender<Event>) -> Self {
        Self {
            state,
            completions,
            tasks: HashMap::new(),
        }
    }

    /// Whether any task still owes a completion event
    pub fn has_in_flight(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Drop the handle of a task whose completion has arrived
    pub fn forget(&mut self, request: RequestId) {
        self.tasks.remove(&request);
    }

    /// Carry out one effect; returns the notification to show, if any
    pub fn execute(&mut self, effect: Effect) -> Option<Notification> {
        match effect {
            Effect::Dispatch { request, call } => {
                self.dispatch(request, call);
                None
            }
            Effect::Cancel { request } => {
                self.abort(request, "Cancelled superseded request");
                None
            }
            Effect::Play { request, audio } => {
                self.play(request, audio);
                None
            }
            Effect::StopPlayback { request } => {
                self.abort(request, "Stopped playback");
                None
            }
            Effect::SaveFile {
                request,
                file_name,
                contents,
            } => {
                self.save(request, file_name, contents);
                None
            }
            Effect::Notify(notification) => Self::report(notification),
        }
    }

    /// Abort every outstanding task
    pub fn shutdown(&mut self) {
        for (request, handle) in self.tasks.drain() {
            debug!(%request, "Aborting task on shutdown");
            handle.abort();
        }
    }

    fn abort(&mut self, request: RequestId, reason: &str) {
        if let Some(handle) = self.tasks.remove(&request) {
            handle.abort();
            debug!(%request, "{}", reason);
        }
    }

    fn spawn<F>(&mut self, request: RequestId, task: F)
    where
        F: std::future::Future<Output = Event> + Send + 'static,
    {
        let completions = self.completions.clone();
        let handle = tokio::spawn(async move {
            let event = task.await;
            // The receiver only goes away on shutdown
            let _ = completions.send(event);
        });
        if let Some(previous) = self.tasks.insert(request, handle) {
            previous.abort();
        }
    }

    fn dispatch(&mut self, request: RequestId, call: ApiCall) {
        let action = call.action();
        info!(%request, %action, "Dispatching backend call");

        let api = self.state.api.clone();
        self.spawn(request, async move {
            let outcome = match call {
                ApiCall::GeneratePlan(profile) => api
                    .generate_plan(&profile)
                    .await
                    .map(|plan| Event::PlanLoaded { request, plan }),
                ApiCall::GenerateImage(body) => api
                    .generate_image(&body)
                    .await
                    .map(|image| Event::ImageLoaded { request, image }),
                ApiCall::TextToSpeech(body) => api
                    .text_to_speech(&body)
                    .await
                    .map(|audio| Event::SpeechLoaded { request, audio }),
                ApiCall::ExportPdf(plan) => api
                    .export_pdf(&plan)
                    .await
                    .map(|document| Event::ExportLoaded { request, document }),
                ApiCall::Motivation => api
                    .motivation()
                    .await
                    .map(|quote| Event::MotivationLoaded { request, quote }),
            };
            outcome.unwrap_or_else(|err| failed(request, action, err))
        });
    }

    fn play(&mut self, request: RequestId, audio: Vec<u8>) {
        let player = self.state.player.clone();
        self.spawn(request, async move {
            match player.play(audio).await {
                Ok(()) => Event::PlaybackFinished { request },
                Err(err) => failed(request, Action::ReadAloud, err),
            }
        });
    }

    fn save(&mut self, request: RequestId, file_name: String, contents: Vec<u8>) {
        let dir = self.state.download_dir().to_path_buf();
        self.spawn(request, async move {
            match save_download(&dir, &file_name, &contents).await {
                Ok(path) => Event::ExportSaved {
                    request,
                    location: path.display().to_string(),
                },
                Err(err) => failed(request, Action::ExportPdf, err),
            }
        });
    }

    fn report(notification: Notification) -> Option<Notification> {
        let detail = notification.detail.as_deref().unwrap_or("");
        match notification.severity {
            Severity::Silent => {
                debug!(text = %notification.message, detail, "Suppressed notification");
                None
            }
            Severity::Notice => {
                info!(text = %notification.message, "Notice");
                Some(notification)
            }
            Severity::Alert => {
                error!(text = %notification.message, detail, "Alert");
                Some(notification)
            }
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn failed(request: RequestId, action: Action, err: ClientError) -> Event {
    if err.is_status() {
        warn!(%request, %action, error = %err, "Backend rejected request");
    } else {
        warn!(%request, %action, error = %err, "Request failed");
    }
    Event::RequestFailed {
        request,
        action,
        reason: err.to_string(),
    }
}
