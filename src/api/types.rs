//! Wire types for the test-management API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// ENVELOPE
// ============================================================================

/// Every response body is wrapped as `{status, data}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope for calls whose `data` we do not read (bulk create, publish).
#[derive(Debug, Clone, Deserialize)]
pub struct StatusOnly {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Returns the rejection reason when the envelope status marks a failure.
pub fn rejection(status: Option<&str>, message: Option<&str>) -> Option<String> {
    match status {
        Some("error") | Some("fail") | Some("failed") => {
            Some(message.unwrap_or("request failed").to_string())
        }
        _ => None,
    }
}

// ============================================================================
// AUTH
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
}

// ============================================================================
// ENUMERATIONS
// ============================================================================

/// Category tab a test belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    #[default]
    #[serde(rename = "chapterwise")]
    ChapterWise,
    Pyq,
    #[serde(rename = "mock")]
    MockTest,
    DailyChallenge,
    Uncategorized,
}

impl TestKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ChapterWise => "Chapter Wise",
            Self::Pyq => "PYQ",
            Self::MockTest => "Mock Test",
            Self::DailyChallenge => "Daily Challenge",
            Self::Uncategorized => "Uncategorized",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Difficult,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Difficult];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Difficult => "Difficult",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionDifficulty {
    Easy,
    Medium,
    Hard,
}

impl QuestionDifficulty {
    pub const ALL: [QuestionDifficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    #[default]
    Draft,
    Live,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => f.write_str("draft"),
            Self::Live => f.write_str("live"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectOption {
    Option1,
    Option2,
    Option3,
    Option4,
}

impl CorrectOption {
    pub const ALL: [CorrectOption; 4] = [Self::Option1, Self::Option2, Self::Option3, Self::Option4];

    /// Zero-based position of the option.
    pub fn index(&self) -> usize {
        match self {
            Self::Option1 => 0,
            Self::Option2 => 1,
            Self::Option3 => 2,
            Self::Option4 => 3,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

/// Body of `POST /tests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TestKind,
    pub subject: String,
    pub topics: Vec<String>,
    #[serde(default)]
    pub sub_topics: Vec<String>,
    pub difficulty: Difficulty,
    pub correct_marks: i32,
    pub wrong_marks: i32,
    pub unattempt_marks: i32,
    pub total_time: u32,
    pub total_questions: u32,
    pub total_marks: i32,
    pub status: TestStatus,
}

/// Body of `PUT /tests/{id}`. Absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TestKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_topics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_marks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrong_marks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unattempt_marks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_marks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TestStatus>,
}

impl TestUpdate {
    /// The publish body: `{"status": "live"}`.
    pub fn publish() -> Self {
        Self {
            status: Some(TestStatus::Live),
            ..Self::default()
        }
    }
}

impl From<&TestPayload> for TestUpdate {
    fn from(p: &TestPayload) -> Self {
        Self {
            name: Some(p.name.clone()),
            kind: Some(p.kind),
            subject: Some(p.subject.clone()),
            topics: Some(p.topics.clone()),
            sub_topics: Some(p.sub_topics.clone()),
            difficulty: Some(p.difficulty),
            correct_marks: Some(p.correct_marks),
            wrong_marks: Some(p.wrong_marks),
            unattempt_marks: Some(p.unattempt_marks),
            total_time: Some(p.total_time),
            total_questions: Some(p.total_questions),
            total_marks: Some(p.total_marks),
            status: Some(p.status),
        }
    }
}

/// Reference to a question attached to a test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRef {
    pub id: String,
}

/// A test as returned by the server.
///
/// Subject, topics and sub-topics come back as display names, not ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: TestKind,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub sub_topics: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub correct_marks: Option<i32>,
    #[serde(default)]
    pub wrong_marks: Option<i32>,
    #[serde(default)]
    pub unattempt_marks: Option<i32>,
    #[serde(default)]
    pub total_time: Option<u32>,
    #[serde(default)]
    pub total_questions: Option<u32>,
    #[serde(default)]
    pub total_marks: Option<i32>,
    #[serde(default)]
    pub status: TestStatus,
    #[serde(default)]
    pub questions: Vec<QuestionRef>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Row of `GET /tests`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: TestStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ============================================================================
// CATALOGS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subject_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTopic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub topic_id: Option<String>,
}

// ============================================================================
// QUESTIONS
// ============================================================================

/// Only multiple-choice questions exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[default]
    Mcq,
}

/// One question inside `POST /questions/bulk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPayload {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    pub correct_option: CorrectOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<QuestionDifficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub test_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkQuestions<'a> {
    pub questions: &'a [QuestionPayload],
}
