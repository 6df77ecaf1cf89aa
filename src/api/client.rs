use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::backend::TestBackend;
use super::types::{
    rejection, BulkQuestions, Credentials, Envelope, LoginData, QuestionPayload, StatusOnly,
    SubTopic, Subject, TestPayload, TestRecord, TestSummary, TestUpdate, Topic,
};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// HTTP client for the test-management API
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Replace the bearer token, e.g. right after logging in.
    pub fn set_token(&mut self, token: Option<String>) {
        self.config.token = token;
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.url(path);
        debug!(%url, "GET");
        let response = self.authorized(self.client.get(&url)).send().await?;
        decode_data(response).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.authorized(request).json(body).send().await?;
        decode_data(response).await
    }

    async fn send_status<B: Serialize + ?Sized>(
        &self,
        request: RequestBuilder,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self.authorized(request).json(body).send().await?;
        let envelope: StatusOnly = decode_body(response).await?;
        match rejection(envelope.status.as_deref(), envelope.message.as_deref()) {
            Some(reason) => Err(ApiError::Rejected(reason)),
            None => Ok(()),
        }
    }
}

/// Check the HTTP status and parse the body as `T`.
async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Unwrap `{status, data}` and reject failed envelopes.
async fn decode_data<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let envelope: Envelope<T> = decode_body(response).await?;
    match rejection(envelope.status.as_deref(), envelope.message.as_deref()) {
        Some(reason) => Err(ApiError::Rejected(reason)),
        None => Ok(envelope.data),
    }
}

#[async_trait]
impl TestBackend for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let url = self.config.url("/auth/login");
        debug!(%url, user_id = %credentials.user_id, "POST");
        let response = self.client.post(&url).json(credentials).send().await?;
        let envelope: Envelope<LoginData> = decode_body(response).await?;
        match envelope.status.as_deref() {
            Some("success") => Ok(envelope.data.token),
            _ => Err(ApiError::Rejected(
                envelope.message.unwrap_or_else(|| "login was not accepted".to_string()),
            )),
        }
    }

    async fn list_tests(&self) -> Result<Vec<TestSummary>, ApiError> {
        self.get("/tests").await
    }

    async fn get_test(&self, id: &str) -> Result<TestRecord, ApiError> {
        self.get(&format!("/tests/{}", id)).await
    }

    async fn create_test(&self, payload: &TestPayload) -> Result<TestRecord, ApiError> {
        let url = self.config.url("/tests");
        debug!(%url, name = %payload.name, "POST");
        self.send_json(self.client.post(&url), payload).await
    }

    async fn update_test(&self, id: &str, update: &TestUpdate) -> Result<TestRecord, ApiError> {
        let url = self.config.url(&format!("/tests/{}", id));
        debug!(%url, "PUT");
        self.send_json(self.client.put(&url), update).await
    }

    async fn publish_test(&self, id: &str) -> Result<(), ApiError> {
        let url = self.config.url(&format!("/tests/{}", id));
        debug!(%url, "PUT publish");
        self.send_status(self.client.put(&url), &TestUpdate::publish())
            .await
    }

    async fn subjects(&self) -> Result<Vec<Subject>, ApiError> {
        self.get("/subjects").await
    }

    async fn topics_by_subject(&self, subject_id: &str) -> Result<Vec<Topic>, ApiError> {
        self.get(&format!("/topics/subject/{}", subject_id)).await
    }

    async fn sub_topics_by_topic(&self, topic_id: &str) -> Result<Vec<SubTopic>, ApiError> {
        self.get(&format!("/sub-topics/topic/{}", topic_id)).await
    }

    async fn create_questions(&self, questions: &[QuestionPayload]) -> Result<(), ApiError> {
        let url = self.config.url("/questions/bulk");
        debug!(%url, count = questions.len(), "POST");
        self.send_status(self.client.post(&url), &BulkQuestions { questions })
            .await
    }
}
