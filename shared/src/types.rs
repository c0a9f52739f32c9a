//! Backend request and response types

use crate::models::ItemKind;
use serde::{Deserialize, Serialize};

/// Relative paths of the backend operations
pub mod paths {
    pub const GENERATE_PLAN: &str = "/api/generate-plan";
    pub const GENERATE_IMAGE: &str = "/api/generate-image";
    pub const TEXT_TO_SPEECH: &str = "/api/text-to-speech";
    pub const EXPORT_PDF: &str = "/api/export-pdf";
    pub const MOTIVATION: &str = "/api/motivation";
}

/// File name the exported plan document is saved under
pub const EXPORT_FILE_NAME: &str = "fitness-plan.pdf";

/// Image generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub item_name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

/// Image generation response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    /// URL or data URI of the generated image; absent or `null` means none
    #[serde(default)]
    pub image: Option<String>,
}

/// Text-to-speech request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
}

/// Motivational quote response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationResponse {
    #[serde(default)]
    pub quote: Option<String>,
}
