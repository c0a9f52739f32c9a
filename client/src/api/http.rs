//! reqwest implementation of the backend API

use super::CoachApi;
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use fitness_coach_shared::types::paths;
use fitness_coach_shared::{
    ImageRequest, ImageResponse, MotivationResponse, Plan, Profile, SpeechRequest,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the coach backend
#[derive(Clone)]
pub struct HttpCoachApi {
    client: Client,
    base_url: String,
}

impl HttpCoachApi {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("fitness-coach/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<Response> {
        self.send(path, self.client.post(self.url(path)).json(body))
            .await
    }

    /// Send with a fresh correlation id and reject non-success statuses
    async fn send(&self, path: &str, request: RequestBuilder) -> ClientResult<Response> {
        let request_id = Uuid::new_v4();
        debug!(%request_id, path, "Sending backend request");

        let response = request
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await?;

        let status = response.status();
        debug!(%request_id, path, status = status.as_u16(), "Backend responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn binary(response: Response) -> ClientResult<Vec<u8>> {
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl CoachApi for HttpCoachApi {
    async fn generate_plan(&self, profile: &Profile) -> ClientResult<Plan> {
        let response = self.post(paths::GENERATE_PLAN, profile).await?;
        Self::json(response).await
    }

    async fn generate_image(&self, request: &ImageRequest) -> ClientResult<String> {
        let response = self.post(paths::GENERATE_IMAGE, request).await?;
        let body: ImageResponse = Self::json(response).await?;
        Ok(body.image.unwrap_or_default())
    }

    async fn text_to_speech(&self, request: &SpeechRequest) -> ClientResult<Vec<u8>> {
        let response = self.post(paths::TEXT_TO_SPEECH, request).await?;
        Self::binary(response).await
    }

    async fn export_pdf(&self, plan: &Plan) -> ClientResult<Vec<u8>> {
        let response = self.post(paths::EXPORT_PDF, plan).await?;
        Self::binary(response).await
    }

    async fn motivation(&self) -> ClientResult<String> {
        let request = self.client.get(self.url(paths::MOTIVATION));
        let response = self.send(paths::MOTIVATION, request).await?;
        let body: MotivationResponse = Self::json(response).await?;
        Ok(body.quote.unwrap_or_default())
    }
}
