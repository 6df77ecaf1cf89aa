//! Wizard State Management
//!
//! [`WizardStore`] is the single source of truth for the test being
//! authored. Changes that touch an invariant spanning more than one field
//! go through [`WizardStore::apply`]; the plain setters write one field.

use tracing::trace;

use super::step::WizardStep;
use crate::api::{QuestionPayload, TestPayload, TestRecord};
use crate::error::WizardError;

/// A single state change.
#[derive(Debug, Clone)]
pub enum WizardEvent {
    SetBasicDetails(TestPayload),
    SetTestId(Option<String>),
    AppendQuestion(QuestionPayload),
    SetStep(WizardStep),
    SetNoOfQuestions(Option<u32>),
    SetSubjectId(Option<String>),
    SetGetById(Option<TestRecord>),
    Reset,
}

/// Complete draft state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardStore {
    test_id: Option<String>,
    basic_details: Option<TestPayload>,
    /// Insertion order; question N lives at index N-1.
    questions: Vec<QuestionPayload>,
    current_step: WizardStep,
    no_of_questions: Option<u32>,
    subject_id: Option<String>,
    /// Record fetched (or returned by the server) for prefill.
    get_by_id: Option<TestRecord>,
}

impl WizardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: WizardEvent) -> Result<(), WizardError> {
        trace!(?event, "apply");
        match event {
            WizardEvent::SetBasicDetails(payload) => {
                let expected = total_marks(payload.total_questions, payload.correct_marks);
                if payload.total_marks != expected {
                    return Err(WizardError::Validation(format!(
                        "total marks {} do not match {} questions x {} marks",
                        payload.total_marks, payload.total_questions, payload.correct_marks
                    )));
                }
                self.basic_details = Some(payload);
            }
            WizardEvent::SetTestId(id) => self.test_id = id,
            WizardEvent::AppendQuestion(question) => {
                let Some(test_id) = self.test_id.as_deref() else {
                    return Err(WizardError::InconsistentState("no test id for question"));
                };
                if question.test_id != test_id {
                    return Err(WizardError::InconsistentState(
                        "question belongs to a different test",
                    ));
                }
                self.questions.push(question);
            }
            WizardEvent::SetStep(step) => self.current_step = step,
            WizardEvent::SetNoOfQuestions(n) => self.no_of_questions = n,
            WizardEvent::SetSubjectId(id) => self.subject_id = id,
            WizardEvent::SetGetById(record) => self.get_by_id = record,
            WizardEvent::Reset => *self = Self::default(),
        }
        Ok(())
    }

    pub fn set_basic_details(&mut self, payload: TestPayload) -> Result<(), WizardError> {
        self.apply(WizardEvent::SetBasicDetails(payload))
    }

    pub fn set_test_id(&mut self, id: Option<String>) {
        self.test_id = id;
    }

    pub fn append_question(&mut self, question: QuestionPayload) -> Result<(), WizardError> {
        self.apply(WizardEvent::AppendQuestion(question))
    }

    pub fn set_step(&mut self, step: WizardStep) {
        self.current_step = step;
    }

    pub fn set_no_of_questions(&mut self, n: Option<u32>) {
        self.no_of_questions = n;
    }

    pub fn set_subject_id(&mut self, id: Option<String>) {
        self.subject_id = id;
    }

    pub fn set_get_by_id(&mut self, record: Option<TestRecord>) {
        self.get_by_id = record;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn test_id(&self) -> Option<&str> {
        self.test_id.as_deref()
    }

    pub fn basic_details(&self) -> Option<&TestPayload> {
        self.basic_details.as_ref()
    }

    pub fn questions(&self) -> &[QuestionPayload] {
        &self.questions
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn no_of_questions(&self) -> Option<u32> {
        self.no_of_questions
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }

    pub fn get_by_id(&self) -> Option<&TestRecord> {
        self.get_by_id.as_ref()
    }
}

/// `questions x correct`, saturating at the i32 range.
pub fn total_marks(total_questions: u32, correct_marks: i32) -> i32 {
    i32::try_from(total_questions)
        .unwrap_or(i32::MAX)
        .saturating_mul(correct_marks)
}
