//! In-memory backend and fixtures shared by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::{
    CorrectOption, Credentials, Difficulty, QuestionKind, QuestionPayload, SubTopic, Subject,
    TestBackend, TestKind, TestPayload, TestRecord, TestStatus, TestSummary, TestUpdate, Topic,
};
use crate::error::ApiError;

/// Backend that keeps tests in a map and records every call by name.
#[derive(Default)]
pub(crate) struct FakeBackend {
    pub(crate) subjects: Vec<Subject>,
    pub(crate) topics: HashMap<String, Vec<Topic>>,
    pub(crate) sub_topics: HashMap<String, Vec<SubTopic>>,
    pub(crate) tests: Mutex<HashMap<String, TestRecord>>,
    pub(crate) created_questions: Mutex<Vec<QuestionPayload>>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    next_id: AtomicU64,
}

impl FakeBackend {
    /// Subject "Algebra" (s1) -> topic "Linear Equations" (t1) -> sub-topic "Slope" (st1),
    /// plus topic "Quadratics" (t2) -> "Roots" (st2).
    pub(crate) fn algebra() -> Self {
        let mut backend = Self {
            subjects: vec![
                Subject {
                    id: "s1".to_string(),
                    name: "Algebra".to_string(),
                },
                Subject {
                    id: "s2".to_string(),
                    name: "Geometry".to_string(),
                },
            ],
            ..Self::default()
        };
        backend.topics.insert(
            "s1".to_string(),
            vec![topic("t1", "Linear Equations", "s1"), topic("t2", "Quadratics", "s1")],
        );
        backend
            .topics
            .insert("s2".to_string(), vec![topic("t3", "Triangles", "s2")]);
        backend
            .sub_topics
            .insert("t1".to_string(), vec![sub_topic("st1", "Slope", "t1")]);
        backend
            .sub_topics
            .insert("t2".to_string(), vec![sub_topic("st2", "Roots", "t2")]);
        backend
    }

    /// Make every call to `op` fail with a 500.
    pub(crate) fn fail_on(&self, op: &'static str) {
        self.failing.lock().insert(op);
    }

    pub(crate) fn recover(&self, op: &'static str) {
        self.failing.lock().remove(op);
    }

    pub(crate) fn insert_test(&self, record: TestRecord) {
        self.tests.lock().insert(record.id.clone(), record);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub(crate) fn call_count(&self, op: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == op).count()
    }

    fn record(&self, op: &'static str) -> Result<(), ApiError> {
        self.calls.lock().push(op.to_string());
        if self.failing.lock().contains(op) {
            return Err(ApiError::Status {
                status: 500,
                body: format!("{op} failed"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TestBackend for FakeBackend {
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        self.record("login")?;
        if credentials.password == "secret" {
            Ok(format!("token-{}", credentials.user_id))
        } else {
            Err(ApiError::Rejected("invalid credentials".to_string()))
        }
    }

    async fn list_tests(&self) -> Result<Vec<TestSummary>, ApiError> {
        self.record("list_tests")?;
        let mut rows: Vec<TestSummary> = self
            .tests
            .lock()
            .values()
            .map(|t| TestSummary {
                id: t.id.clone(),
                name: t.name.clone(),
                subject: t.subject.clone(),
                status: t.status,
                created_at: t.created_at,
            })
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }

    async fn get_test(&self, id: &str) -> Result<TestRecord, ApiError> {
        self.record("get_test")?;
        self.tests.lock().get(id).cloned().ok_or(ApiError::Status {
            status: 404,
            body: format!("test {id} not found"),
        })
    }

    async fn create_test(&self, payload: &TestPayload) -> Result<TestRecord, ApiError> {
        self.record("create_test")?;
        let id = format!("T{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let record = TestRecord {
            id: id.clone(),
            name: payload.name.clone(),
            kind: payload.kind,
            subject: Some(payload.subject.clone()),
            topics: payload.topics.clone(),
            sub_topics: payload.sub_topics.clone(),
            difficulty: Some(payload.difficulty),
            correct_marks: Some(payload.correct_marks),
            wrong_marks: Some(payload.wrong_marks),
            unattempt_marks: Some(payload.unattempt_marks),
            total_time: Some(payload.total_time),
            total_questions: Some(payload.total_questions),
            total_marks: Some(payload.total_marks),
            status: payload.status,
            ..TestRecord::default()
        };
        self.tests.lock().insert(id, record.clone());
        Ok(record)
    }

    async fn update_test(&self, id: &str, update: &TestUpdate) -> Result<TestRecord, ApiError> {
        self.record("update_test")?;
        let mut tests = self.tests.lock();
        let record = tests.get_mut(id).ok_or(ApiError::Status {
            status: 404,
            body: format!("test {id} not found"),
        })?;
        if let Some(name) = &update.name {
            record.name = name.clone();
        }
        if let Some(subject) = &update.subject {
            record.subject = Some(subject.clone());
        }
        if let Some(topics) = &update.topics {
            record.topics = topics.clone();
        }
        if let Some(sub_topics) = &update.sub_topics {
            record.sub_topics = sub_topics.clone();
        }
        if update.total_questions.is_some() {
            record.total_questions = update.total_questions;
        }
        if update.total_marks.is_some() {
            record.total_marks = update.total_marks;
        }
        if let Some(status) = update.status {
            record.status = status;
        }
        Ok(record.clone())
    }

    async fn publish_test(&self, id: &str) -> Result<(), ApiError> {
        self.record("publish_test")?;
        let mut tests = self.tests.lock();
        match tests.get_mut(id) {
            Some(record) => {
                record.status = TestStatus::Live;
                Ok(())
            }
            None => Err(ApiError::Status {
                status: 404,
                body: format!("test {id} not found"),
            }),
        }
    }

    async fn subjects(&self) -> Result<Vec<Subject>, ApiError> {
        self.record("subjects")?;
        Ok(self.subjects.clone())
    }

    async fn topics_by_subject(&self, subject_id: &str) -> Result<Vec<Topic>, ApiError> {
        self.record("topics_by_subject")?;
        Ok(self.topics.get(subject_id).cloned().unwrap_or_default())
    }

    async fn sub_topics_by_topic(&self, topic_id: &str) -> Result<Vec<SubTopic>, ApiError> {
        self.record("sub_topics_by_topic")?;
        Ok(self.sub_topics.get(topic_id).cloned().unwrap_or_default())
    }

    async fn create_questions(&self, questions: &[QuestionPayload]) -> Result<(), ApiError> {
        self.record("create_questions")?;
        self.created_questions.lock().extend_from_slice(questions);
        Ok(())
    }
}

pub(crate) fn topic(id: &str, name: &str, subject_id: &str) -> Topic {
    Topic {
        id: id.to_string(),
        name: name.to_string(),
        subject_id: Some(subject_id.to_string()),
    }
}

pub(crate) fn sub_topic(id: &str, name: &str, topic_id: &str) -> SubTopic {
    SubTopic {
        id: id.to_string(),
        name: name.to_string(),
        topic_id: Some(topic_id.to_string()),
    }
}

/// A consistent Step 1 payload.
pub(crate) fn payload(total_questions: u32, correct_marks: i32) -> TestPayload {
    TestPayload {
        name: "Algebra Basics".to_string(),
        kind: TestKind::ChapterWise,
        subject: "s1".to_string(),
        topics: vec!["t1".to_string()],
        sub_topics: vec!["st1".to_string()],
        difficulty: Difficulty::Easy,
        correct_marks,
        wrong_marks: -1,
        unattempt_marks: 0,
        total_time: 30,
        total_questions,
        total_marks: crate::wizard::store::total_marks(total_questions, correct_marks),
        status: TestStatus::Draft,
    }
}

pub(crate) fn question(test_id: &str, text: &str) -> QuestionPayload {
    QuestionPayload {
        kind: QuestionKind::Mcq,
        question: text.to_string(),
        option1: "a".to_string(),
        option2: "b".to_string(),
        option3: "c".to_string(),
        option4: "d".to_string(),
        correct_option: CorrectOption::Option1,
        explanation: None,
        difficulty: None,
        topic: None,
        sub_topic: None,
        subject: None,
        media_url: None,
        test_id: test_id.to_string(),
    }
}

/// Record as the server returns it for edit mode: names, not ids.
pub(crate) fn existing_record(id: &str) -> TestRecord {
    TestRecord {
        id: id.to_string(),
        name: "Existing Test".to_string(),
        subject: Some("Algebra".to_string()),
        topics: vec!["Linear Equations".to_string()],
        sub_topics: vec!["Slope".to_string()],
        difficulty: Some(Difficulty::Medium),
        correct_marks: Some(4),
        wrong_marks: Some(-1),
        unattempt_marks: Some(0),
        total_time: Some(45),
        total_questions: Some(3),
        total_marks: Some(12),
        ..TestRecord::default()
    }
}
