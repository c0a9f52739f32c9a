//! Audio playback for read-aloud
//!
//! Synthesized speech is handed to an external player process. The clip is
//! written to a temporary file first since the backend's audio format is not
//! known up front and players sniff it from the data.

use crate::config::PlaybackConfig;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};
use uuid::Uuid;

/// Plays one clip to completion
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Resolves when playback has finished. Dropping the future stops playback.
    async fn play(&self, audio: Vec<u8>) -> ClientResult<()>;
}

/// Plays clips through a configured command, e.g. `ffplay -nodisp -autoexit`
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    command: String,
    args: Vec<String>,
    scratch_dir: PathBuf,
}

impl CommandPlayer {
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Use `dir` for temporary clip files instead of the system temp dir
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }
}

/// Removes the clip file however playback ends
struct ScratchFile(PathBuf);

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[async_trait]
impl AudioPlayer for CommandPlayer {
    async fn play(&self, audio: Vec<u8>) -> ClientResult<()> {
        let clip = ScratchFile(
            self.scratch_dir
                .join(format!("fitness-coach-speech-{}.audio", Uuid::new_v4())),
        );
        tokio::fs::write(&clip.0, &audio).await?;
        debug!(path = %clip.0.display(), bytes = audio.len(), "Wrote speech clip");

        info!(command = %self.command, "Starting playback");
        let status = Command::new(&self.command)
            .args(&self.args)
            .arg(&clip.0)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| ClientError::Playback(format!("could not start {}: {}", self.command, e)))?;

        if !status.success() {
            return Err(ClientError::Playback(format!(
                "{} exited with {}",
                self.command, status
            )));
        }
        debug!("Playback finished");
        Ok(())
    }
}
