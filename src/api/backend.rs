//! The seam between the wizard and the test-management service.

use async_trait::async_trait;

use super::types::{
    Credentials, QuestionPayload, SubTopic, Subject, TestPayload, TestRecord, TestSummary,
    TestUpdate, Topic,
};
use crate::error::ApiError;

/// Every REST call the wizard depends on.
///
/// [`ApiClient`](super::ApiClient) is the HTTP implementation; tests swap in
/// an in-memory one.
#[async_trait]
pub trait TestBackend: Send + Sync {
    /// `POST /auth/login`. Returns the bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError>;

    /// `GET /tests`
    async fn list_tests(&self) -> Result<Vec<TestSummary>, ApiError>;

    /// `GET /tests/{id}`
    async fn get_test(&self, id: &str) -> Result<TestRecord, ApiError>;

    /// `POST /tests`
    async fn create_test(&self, payload: &TestPayload) -> Result<TestRecord, ApiError>;

    /// `PUT /tests/{id}`
    async fn update_test(&self, id: &str, update: &TestUpdate) -> Result<TestRecord, ApiError>;

    /// `PUT /tests/{id}` with `{status: "live"}`
    async fn publish_test(&self, id: &str) -> Result<(), ApiError>;

    /// `GET /subjects`
    async fn subjects(&self) -> Result<Vec<Subject>, ApiError>;

    /// `GET /topics/subject/{id}`
    async fn topics_by_subject(&self, subject_id: &str) -> Result<Vec<Topic>, ApiError>;

    /// `GET /sub-topics/topic/{id}`
    async fn sub_topics_by_topic(&self, topic_id: &str) -> Result<Vec<SubTopic>, ApiError>;

    /// `POST /questions/bulk`
    async fn create_questions(&self, questions: &[QuestionPayload]) -> Result<(), ApiError>;
}
