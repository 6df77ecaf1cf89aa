//! Step 2: question authoring.
//!
//! Questions are entered one at a time. Each one is persisted with a
//! single-element bulk create before it is appended locally; the step moves
//! on to confirmation when the last one is saved.

use tracing::info;
use validator::Validate;

use super::expect_step;
use super::step::{WizardAction, WizardStep};
use super::store::WizardStore;
use crate::api::{CorrectOption, QuestionDifficulty, QuestionKind, QuestionPayload, TestBackend};
use crate::error::WizardError;

/// Which button submitted the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Next,
    /// Shortcut enabled only on the final question.
    Publish,
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct QuestionForm {
    #[validate(length(min = 1, message = "Question text is required"))]
    pub question: String,
    #[validate(length(min = 1, message = "Option 1 is required"))]
    pub option1: String,
    #[validate(length(min = 1, message = "Option 2 is required"))]
    pub option2: String,
    #[validate(length(min = 1, message = "Option 3 is required"))]
    pub option3: String,
    #[validate(length(min = 1, message = "Option 4 is required"))]
    pub option4: String,
    #[validate(required(message = "Correct option is required"))]
    pub correct_option: Option<CorrectOption>,
    pub solution: Option<String>,
    pub difficulty: Option<QuestionDifficulty>,
    pub topic: Option<String>,
    pub sub_topic: Option<String>,
}

impl QuestionForm {
    pub fn options(&self) -> [&str; 4] {
        [&self.option1, &self.option2, &self.option3, &self.option4]
    }

    /// Copy with the question and option text trimmed.
    fn trimmed(&self) -> Self {
        Self {
            question: self.question.trim().to_string(),
            option1: self.option1.trim().to_string(),
            option2: self.option2.trim().to_string(),
            option3: self.option3.trim().to_string(),
            option4: self.option4.trim().to_string(),
            ..self.clone()
        }
    }

    /// Validate the trimmed text and build the payload for one question.
    pub fn to_payload(&self, test_id: &str, subject_id: Option<&str>) -> Result<QuestionPayload, WizardError> {
        let form = self.trimmed();
        form.validate()?;
        let Some(correct_option) = form.correct_option else {
            return Err(WizardError::Validation("Correct option is required".to_string()));
        };
        Ok(QuestionPayload {
            kind: QuestionKind::Mcq,
            question: form.question,
            option1: form.option1,
            option2: form.option2,
            option3: form.option3,
            option4: form.option4,
            correct_option,
            explanation: non_empty(&self.solution),
            difficulty: self.difficulty,
            topic: non_empty(&self.topic),
            sub_topic: non_empty(&self.sub_topic),
            subject: subject_id.map(str::to_string),
            media_url: None,
            test_id: test_id.to_string(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Outcome of saving one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSaved {
    /// More to go; the editor now shows this 1-based index.
    Next(u32),
    /// That was the last one; the wizard moved to this step.
    Completed(WizardStep),
}

/// Running position in the authoring loop. Created fresh each time Step 2
/// is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionAuthoring {
    current_index: u32,
    total: u32,
}

impl QuestionAuthoring {
    pub fn new(total: u32) -> Self {
        Self {
            current_index: 1,
            total,
        }
    }

    pub fn for_store(store: &WizardStore) -> Self {
        Self::new(store.no_of_questions().unwrap_or(0))
    }

    pub fn current_index(&self) -> u32 {
        self.current_index
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn publish_enabled(&self) -> bool {
        self.total > 0 && self.current_index == self.total
    }

    /// Persist one question remotely, append it locally, and either move to
    /// the next index or, on the last one, advance to confirmation.
    pub async fn submit<B: TestBackend + ?Sized>(
        &mut self,
        form: &QuestionForm,
        action: SubmitAction,
        store: &mut WizardStore,
        backend: &B,
    ) -> Result<QuestionSaved, WizardError> {
        expect_step(store, WizardStep::Questions)?;
        let (Some(test_id), Some(total)) = (store.test_id(), store.no_of_questions()) else {
            return Err(WizardError::InconsistentState(
                "no test id or question count; complete basic details first",
            ));
        };
        if total == 0 {
            return Err(WizardError::InconsistentState("question count is zero"));
        }
        self.total = total;
        if action == SubmitAction::Publish && !self.publish_enabled() {
            return Err(WizardError::Validation(format!(
                "Publish is available on question {} of {}",
                self.total, self.total
            )));
        }

        let payload = form.to_payload(test_id, store.subject_id())?;
        backend
            .create_questions(std::slice::from_ref(&payload))
            .await?;
        store.append_question(payload)?;

        if self.current_index >= self.total {
            let next = store.current_step().transition(WizardAction::Advance)?;
            store.set_step(next);
            info!(
                test_id = store.test_id().unwrap_or_default(),
                count = store.questions().len(),
                "All questions added"
            );
            return Ok(QuestionSaved::Completed(next));
        }

        info!(index = self.current_index, total = self.total, "Question saved");
        self.current_index += 1;
        Ok(QuestionSaved::Next(self.current_index))
    }
}

/// "Exit Test Creation": back to Step 1 without saving anything.
pub fn exit(store: &mut WizardStore) -> Result<WizardStep, WizardError> {
    expect_step(store, WizardStep::Questions)?;
    let next = store.current_step().transition(WizardAction::Exit)?;
    store.set_step(next);
    Ok(next)
}
