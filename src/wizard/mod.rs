//! Test Creation Wizard
//!
//! Four steps, one draft:
//! 1. Basic details (creates or updates the test)
//! 2. Question authoring
//! 3. Confirmation
//! 4. Publish

pub mod basic;
pub mod catalog;
pub mod confirm;
pub mod controller;
pub mod publish;
pub mod questions;
pub mod step;
pub mod store;

pub use basic::BasicDetailsForm;
pub use catalog::Catalogs;
pub use confirm::{ConfirmSummary, LiveUntil, PublishMode};
pub use controller::{EntryOutcome, StepOutcome, WizardController};
pub use questions::{QuestionAuthoring, QuestionForm, QuestionSaved, SubmitAction};
pub use step::{WizardAction, WizardStep};
pub use store::{WizardEvent, WizardStore};

use crate::error::WizardError;

/// Guard for step operations invoked while the store points elsewhere.
pub(crate) fn expect_step(store: &WizardStore, step: WizardStep) -> Result<(), WizardError> {
    if store.current_step() == step {
        Ok(())
    } else {
        Err(WizardError::InconsistentState("wizard is not on this step"))
    }
}
