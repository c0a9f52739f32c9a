//! Backend API access
//!
//! [`CoachApi`] is the seam between the dispatcher and the network. The
//! production implementation is [`HttpCoachApi`].

mod http;

pub use http::HttpCoachApi;

use crate::error::ClientResult;
use async_trait::async_trait;
use fitness_coach_shared::{ImageRequest, Plan, Profile, SpeechRequest};

/// The five backend operations
#[async_trait]
pub trait CoachApi: Send + Sync {
    /// POST /api/generate-plan
    async fn generate_plan(&self, profile: &Profile) -> ClientResult<Plan>;

    /// POST /api/generate-image, returns the image reference
    async fn generate_image(&self, request: &ImageRequest) -> ClientResult<String>;

    /// POST /api/text-to-speech, returns encoded audio
    async fn text_to_speech(&self, request: &SpeechRequest) -> ClientResult<Vec<u8>>;

    /// POST /api/export-pdf, returns the document bytes
    async fn export_pdf(&self, plan: &Plan) -> ClientResult<Vec<u8>>;

    /// GET /api/motivation
    async fn motivation(&self) -> ClientResult<String>;
}
