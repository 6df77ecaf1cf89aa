//! Step 1: basic test details.

use tracing::{debug, info};
use validator::Validate;

use super::catalog::Catalogs;
use super::step::{WizardAction, WizardStep};
use super::store::{total_marks, WizardEvent, WizardStore};
use super::expect_step;
use crate::api::{Difficulty, TestBackend, TestKind, TestPayload, TestRecord, TestStatus, TestUpdate};
use crate::error::WizardError;

/// Marking scheme preset when the form opens.
pub const DEFAULT_CORRECT_MARKS: i32 = 5;
pub const DEFAULT_WRONG_MARKS: i32 = -1;
pub const DEFAULT_UNATTEMPT_MARKS: i32 = 0;

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct BasicDetailsForm {
    #[validate(length(min = 1, message = "Test name is required"))]
    pub name: String,
    /// Subject id (a subject name until edit-mode reconciliation runs).
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Topic is required"))]
    pub topics: Vec<String>,
    pub sub_topics: Vec<String>,
    pub duration_minutes: u32,
    #[validate(required(message = "Difficulty is required"))]
    pub difficulty: Option<Difficulty>,
    pub correct_marks: i32,
    pub wrong_marks: i32,
    pub unattempt_marks: i32,
    #[validate(range(min = 1, message = "Number of questions is required"))]
    pub total_questions: u32,
}

impl Default for BasicDetailsForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            subject: String::new(),
            topics: Vec::new(),
            sub_topics: Vec::new(),
            duration_minutes: 0,
            difficulty: None,
            correct_marks: DEFAULT_CORRECT_MARKS,
            wrong_marks: DEFAULT_WRONG_MARKS,
            unattempt_marks: DEFAULT_UNATTEMPT_MARKS,
            total_questions: 0,
        }
    }
}

impl BasicDetailsForm {
    /// Always derived, never stored.
    pub fn total_marks(&self) -> i32 {
        total_marks(self.total_questions, self.correct_marks)
    }

    /// Select a subject. A different subject drops the topic and sub-topic
    /// selections. Returns whether the subject changed.
    pub fn set_subject(&mut self, subject_id: impl Into<String>) -> bool {
        let subject_id = subject_id.into();
        if subject_id == self.subject {
            return false;
        }
        self.subject = subject_id;
        self.topics.clear();
        self.sub_topics.clear();
        true
    }

    /// Select topics. A different set drops the sub-topic selection.
    pub fn set_topics(&mut self, topic_ids: Vec<String>) -> bool {
        if topic_ids == self.topics {
            return false;
        }
        self.topics = topic_ids;
        self.sub_topics.clear();
        true
    }

    /// Validate and build the create payload. Text is trimmed first, so a
    /// whitespace-only name counts as missing.
    pub fn to_payload(&self) -> Result<TestPayload, WizardError> {
        let name = self.name.trim();
        Self {
            name: name.to_string(),
            ..self.clone()
        }
        .validate()?;
        let Some(difficulty) = self.difficulty else {
            return Err(WizardError::Validation("Difficulty is required".to_string()));
        };
        Ok(TestPayload {
            name: name.to_string(),
            kind: TestKind::ChapterWise,
            subject: self.subject.clone(),
            topics: self.topics.clone(),
            sub_topics: self.sub_topics.clone(),
            difficulty,
            correct_marks: self.correct_marks,
            wrong_marks: self.wrong_marks,
            unattempt_marks: self.unattempt_marks,
            total_time: self.duration_minutes,
            total_questions: self.total_questions,
            total_marks: self.total_marks(),
            status: TestStatus::Draft,
        })
    }

    /// Fill the form from a fetched test. Subject, topics and sub-topics are
    /// names at this point; run the `reconcile_*` passes once the matching
    /// catalog has loaded.
    pub fn prefill_from(record: &TestRecord) -> Self {
        let defaults = Self::default();
        Self {
            name: record.name.clone(),
            subject: record.subject.clone().unwrap_or_default(),
            topics: record.topics.clone(),
            sub_topics: record.sub_topics.clone(),
            duration_minutes: record.total_time.unwrap_or(defaults.duration_minutes),
            difficulty: record.difficulty,
            correct_marks: record.correct_marks.unwrap_or(defaults.correct_marks),
            wrong_marks: record.wrong_marks.unwrap_or(defaults.wrong_marks),
            unattempt_marks: record.unattempt_marks.unwrap_or(defaults.unattempt_marks),
            total_questions: record.total_questions.unwrap_or(defaults.total_questions),
        }
    }

    /// Subject name -> id. Returns whether the subject resolved.
    pub fn reconcile_subject(&mut self, catalogs: &Catalogs) -> bool {
        match catalogs.subject_id_for(&self.subject) {
            Some(id) => {
                self.subject = id.to_string();
                true
            }
            None => {
                debug!(subject = %self.subject, "Subject not in catalog");
                false
            }
        }
    }

    /// Topic names -> ids. Unresolved entries are kept as they are.
    pub fn reconcile_topics(&mut self, catalogs: &Catalogs) -> bool {
        reconcile_all(&mut self.topics, |v| catalogs.topic_id_for(v))
    }

    /// Sub-topic names -> ids. Unresolved entries are kept as they are.
    pub fn reconcile_sub_topics(&mut self, catalogs: &Catalogs) -> bool {
        reconcile_all(&mut self.sub_topics, |v| catalogs.sub_topic_id_for(v))
    }
}

fn reconcile_all<'c>(values: &mut [String], lookup: impl Fn(&str) -> Option<&'c str>) -> bool {
    let mut all = true;
    for value in values.iter_mut() {
        match lookup(value.as_str()) {
            Some(id) => *value = id.to_string(),
            None => {
                debug!(%value, "No catalog entry");
                all = false;
            }
        }
    }
    all
}

/// Create the test (or update it when the store already has an id), then
/// record the result and move to Step 2.
///
/// Nothing is written to the store unless the server call succeeds.
pub async fn submit<B: TestBackend + ?Sized>(
    form: &BasicDetailsForm,
    store: &mut WizardStore,
    backend: &B,
) -> Result<WizardStep, WizardError> {
    let test_id = store.test_id().map(str::to_string);
    submit_to(form, store, backend, test_id.as_deref()).await
}

/// Like [`submit`], but updates `test_id` when given and creates otherwise.
pub async fn submit_to<B: TestBackend + ?Sized>(
    form: &BasicDetailsForm,
    store: &mut WizardStore,
    backend: &B,
    test_id: Option<&str>,
) -> Result<WizardStep, WizardError> {
    expect_step(store, WizardStep::Basic)?;
    let payload = form.to_payload()?;
    let next = store.current_step().transition(WizardAction::Advance)?;

    let record = match test_id {
        Some(id) => {
            let record = backend.update_test(id, &TestUpdate::from(&payload)).await?;
            info!(test_id = %id, name = %payload.name, "Updated test");
            record
        }
        None => {
            let record = backend.create_test(&payload).await?;
            info!(test_id = %record.id, name = %payload.name, "Created test");
            record
        }
    };

    let test_id = if record.id.is_empty() {
        test_id.map(str::to_string)
    } else {
        Some(record.id.clone())
    };
    if test_id.is_none() {
        return Err(WizardError::InconsistentState("server did not return a test id"));
    }
    let no_of_questions = record.total_questions.unwrap_or(payload.total_questions);
    let subject_id = payload.subject.clone();

    store.apply(WizardEvent::SetBasicDetails(payload))?;
    store.apply(WizardEvent::SetTestId(test_id))?;
    store.apply(WizardEvent::SetNoOfQuestions(Some(no_of_questions)))?;
    store.apply(WizardEvent::SetSubjectId(Some(subject_id)))?;
    store.apply(WizardEvent::SetGetById(Some(record)))?;
    store.apply(WizardEvent::SetStep(next))?;
    Ok(next)
}
