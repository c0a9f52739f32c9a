//! Application state management
//!
//! This module provides the shared services the dispatcher hands to every
//! spawned task: the backend API, the audio player, and configuration.
//! All fields are `Arc`s, so cloning into a task is cheap.

use crate::api::{CoachApi, HttpCoachApi};
use crate::config::AppConfig;
use crate::error::ClientResult;
use crate::services::playback::{AudioPlayer, CommandPlayer};
use std::path::Path;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Backend API client
    pub api: Arc<dyn CoachApi>,
    /// Player for read-aloud clips
    pub player: Arc<dyn AudioPlayer>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Build the production services from configuration
    pub fn new(config: AppConfig) -> ClientResult<Self> {
        let api = HttpCoachApi::new(&config.api)?;
        let player = CommandPlayer::new(&config.playback);
        Ok(Self::with_services(Arc::new(api), Arc::new(player), config))
    }

    /// Assemble state from explicit services
    pub fn with_services(
        api: Arc<dyn CoachApi>,
        player: Arc<dyn AudioPlayer>,
        config: AppConfig,
    ) -> Self {
        Self {
            api,
            player,
            config: Arc::new(config),
        }
    }

    #[inline]
    pub fn download_dir(&self) -> &Path {
        &self.config.export.download_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_clone_shares_services() {
        let state = AppState::new(AppConfig::default()).unwrap();
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(Arc::ptr_eq(&state.api, &cloned.api));
    }

    #[test]
    fn test_download_dir_comes_from_config() {
        let mut config = AppConfig::default();
        config.export.download_dir = "/tmp/coach".into();
        let state = AppState::new(config).unwrap();
        assert_eq!(state.download_dir(), Path::new("/tmp/coach"));
    }
}
