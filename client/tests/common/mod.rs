//! Common test utilities for integration tests
//!
//! Every test gets its own mock backend and download directory.

#![allow(dead_code)]

use async_trait::async_trait;
use fake::faker::name::en::FirstName;
use fake::Fake;
use fitness_coach_client::api::HttpCoachApi;
use fitness_coach_client::config::{ApiConfig, AppConfig};
use fitness_coach_client::error::ClientResult;
use fitness_coach_client::services::AudioPlayer;
use fitness_coach_client::session::Session;
use fitness_coach_client::state::AppState;
use fitness_coach_shared::{Profile, ProfileField};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::MockServer;

/// Test application wrapper
pub struct TestApp {
    pub server: MockServer,
    pub downloads: TempDir,
    pub player: Arc<RecordingPlayer>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
            downloads: tempfile::tempdir().expect("Failed to create download dir"),
            player: Arc::new(RecordingPlayer::default()),
        }
    }

    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.api = ApiConfig {
            base_url: self.server.uri(),
            timeout_secs: 5,
        };
        config.export.download_dir = self.downloads.path().to_path_buf();
        config
    }

    pub fn api(&self) -> HttpCoachApi {
        HttpCoachApi::new(&self.config().api).expect("Failed to build client")
    }

    pub fn session(&self) -> Session {
        let state = AppState::with_services(
            Arc::new(self.api()),
            self.player.clone(),
            self.config(),
        );
        Session::new(state)
    }
}

/// Records clips instead of playing them
#[derive(Default)]
pub struct RecordingPlayer {
    clips: Mutex<Vec<Vec<u8>>>,
}

impl RecordingPlayer {
    pub fn clips(&self) -> Vec<Vec<u8>> {
        self.clips.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioPlayer for RecordingPlayer {
    async fn play(&self, audio: Vec<u8>) -> ClientResult<()> {
        self.clips.lock().unwrap().push(audio);
        Ok(())
    }
}

/// The example user from the product brief
pub fn ana() -> Profile {
    let mut profile = Profile::default();
    for (field, value) in [
        (ProfileField::Name, "Ana"),
        (ProfileField::Age, "30"),
        (ProfileField::Gender, "female"),
        (ProfileField::Height, "165"),
        (ProfileField::Weight, "60"),
        (ProfileField::Goal, "muscle-gain"),
        (ProfileField::FitnessLevel, "intermediate"),
        (ProfileField::Location, "gym"),
        (ProfileField::Diet, "veg"),
        (ProfileField::StressLevel, "low"),
    ] {
        profile.set(field, value);
    }
    profile
}

/// A profile with every required field filled in
pub fn random_profile() -> Profile {
    let age: u8 = (18..80).fake();
    let height: u16 = (140..210).fake();
    let weight: u16 = (40..150).fake();
    Profile {
        name: FirstName().fake(),
        age: age.to_string(),
        height: height.to_string(),
        weight: weight.to_string(),
        ..Profile::default()
    }
}

pub fn squat_plan() -> Value {
    json!({
        "workoutPlan": [{
            "day": "Day 1",
            "exercises": [{ "name": "Squat", "sets": 3, "reps": 10, "rest": "60s" }]
        }],
        "dietPlan": {
            "breakfast": [{ "name": "Oats", "calories": 350, "protein": 12 }]
        },
        "tips": ["Sleep 8 hours"]
    })
}
