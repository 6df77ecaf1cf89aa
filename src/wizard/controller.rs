//! Wizard Controller
//!
//! Owns the draft for one wizard session and routes each user action to the
//! step module that handles it.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::basic::{self, BasicDetailsForm};
use super::catalog::Catalogs;
use super::confirm::{self, ConfirmSummary};
use super::publish;
use super::questions::{self, QuestionAuthoring, QuestionForm, QuestionSaved, SubmitAction};
use super::step::{WizardAction, WizardStep};
use super::store::WizardStore;
use crate::api::{SubTopic, TestBackend};
use crate::error::WizardError;
use crate::routes::{Route, WizardMode};

/// What `enter` found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Clean create session.
    Fresh,
    /// Existing test loaded into the draft.
    Hydrated { test_id: String },
    /// The fetch failed; the wizard sits on Step 1 with nothing loaded.
    LoadFailed { test_id: String },
}

/// Where the user ends up after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Stay,
    Moved(WizardStep),
    /// Leave the wizard.
    Navigate(Route),
}

pub struct WizardController<B: TestBackend + ?Sized> {
    backend: Arc<B>,
    store: WizardStore,
    catalogs: Catalogs,
    authoring: Option<QuestionAuthoring>,
    mode: WizardMode,
    /// Test named by an edit or view route, kept even when the load fails.
    route_test_id: Option<String>,
}

impl<B: TestBackend + ?Sized> WizardController<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            store: WizardStore::new(),
            catalogs: Catalogs::new(),
            authoring: None,
            mode: WizardMode::Create,
            route_test_id: None,
        }
    }

    pub fn store(&self) -> &WizardStore {
        &self.store
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn current_step(&self) -> WizardStep {
        self.store.current_step()
    }

    /// Running question position, present while on Step 2.
    pub fn authoring(&self) -> Option<&QuestionAuthoring> {
        self.authoring.as_ref()
    }

    /// Start a session for `route`.
    ///
    /// Create mode always starts from an empty draft. Edit and view mode
    /// reset first, then load the test; a failed load is logged and leaves
    /// the wizard empty on Step 1.
    pub async fn enter(&mut self, route: &Route) -> Result<EntryOutcome, WizardError> {
        self.store.reset();
        self.catalogs = Catalogs::new();
        self.authoring = None;
        self.route_test_id = None;

        let (id, mode) = match route {
            Route::CreateTest => {
                self.mode = WizardMode::Create;
                debug!("Entered wizard in create mode");
                return Ok(EntryOutcome::Fresh);
            }
            Route::EditTest { id, mode } => (id.clone(), *mode),
            other => return Err(WizardError::NotFound(other.to_string())),
        };
        self.mode = mode;
        self.route_test_id = Some(id.clone());

        let record = match self.backend.get_test(&id).await {
            Ok(record) => record,
            Err(e) => {
                error!(test_id = %id, error = %e, "Failed to load test");
                return Ok(EntryOutcome::LoadFailed { test_id: id });
            }
        };

        let test_id = if record.id.is_empty() {
            id
        } else {
            record.id.clone()
        };
        // Names until the catalogs resolve them; see `prefill_form`.
        let details = BasicDetailsForm::prefill_from(&record).to_payload().ok();
        if let Some(details) = details {
            self.store.set_basic_details(details)?;
        }
        self.store.set_test_id(Some(test_id.clone()));
        self.store.set_no_of_questions(record.total_questions);
        self.store.set_get_by_id(Some(record));
        self.store.set_step(WizardStep::Basic);

        info!(%test_id, mode = mode.as_str(), "Loaded test into wizard");
        Ok(EntryOutcome::Hydrated { test_id })
    }

    /// Step 1 form for the current draft: empty in create mode, prefilled
    /// and reconciled against the catalogs otherwise.
    pub async fn prefill_form(&mut self) -> Result<BasicDetailsForm, WizardError> {
        self.catalogs.load_subjects(self.backend.as_ref()).await?;

        let Some(record) = self.store.get_by_id() else {
            return Ok(BasicDetailsForm::default());
        };
        let mut form = BasicDetailsForm::prefill_from(record);

        if !form.reconcile_subject(&self.catalogs) {
            return Ok(form);
        }
        self.store.set_subject_id(Some(form.subject.clone()));
        self.catalogs
            .select_subject(self.backend.as_ref(), &form.subject)
            .await?;
        form.reconcile_topics(&self.catalogs);
        self.catalogs
            .select_topics(self.backend.as_ref(), &form.topics)
            .await?;
        form.reconcile_sub_topics(&self.catalogs);
        Ok(form)
    }

    /// Change the subject and fetch its topics. The form only changes once
    /// the fetch succeeds; an empty topic list is always refetched.
    pub async fn select_subject(
        &mut self,
        form: &mut BasicDetailsForm,
        subject_id: &str,
    ) -> Result<(), WizardError> {
        if form.subject == subject_id && !self.catalogs.topics().is_empty() {
            return Ok(());
        }
        self.catalogs
            .select_subject(self.backend.as_ref(), subject_id)
            .await?;
        form.set_subject(subject_id);
        Ok(())
    }

    /// Change the topic selection and fetch the merged sub-topics. Same
    /// commit-after-fetch rule as `select_subject`.
    pub async fn select_topics(
        &mut self,
        form: &mut BasicDetailsForm,
        topic_ids: Vec<String>,
    ) -> Result<(), WizardError> {
        let loaded = topic_ids.is_empty() || !self.catalogs.sub_topics().is_empty();
        if form.topics == topic_ids && loaded {
            return Ok(());
        }
        self.catalogs
            .select_topics(self.backend.as_ref(), &topic_ids)
            .await?;
        form.set_topics(topic_ids);
        Ok(())
    }

    /// Sub-topics under the single topic picked for a question.
    pub async fn question_sub_topics(&self, topic_id: &str) -> Result<Vec<SubTopic>, WizardError> {
        Ok(self.backend.sub_topics_by_topic(topic_id).await?)
    }

    /// Save Step 1. Edit mode always updates the routed test, even when its
    /// load failed and the store holds no id yet.
    pub async fn submit_basic(&mut self, form: &BasicDetailsForm) -> Result<StepOutcome, WizardError> {
        self.ensure_writable()?;
        let target = match (self.store.test_id(), self.mode) {
            (Some(id), _) => Some(id.to_string()),
            (None, WizardMode::Edit) => self.route_test_id.clone(),
            (None, _) => None,
        };
        let next = basic::submit_to(form, &mut self.store, self.backend.as_ref(), target.as_deref())
            .await?;
        self.entered(next);
        Ok(StepOutcome::Moved(next))
    }

    /// Save one question. `Stay` means the editor moved to the next index.
    pub async fn submit_question(
        &mut self,
        form: &QuestionForm,
        action: SubmitAction,
    ) -> Result<StepOutcome, WizardError> {
        self.ensure_writable()?;
        let store = &self.store;
        let authoring = self
            .authoring
            .get_or_insert_with(|| QuestionAuthoring::for_store(store));
        let saved = authoring
            .submit(form, action, &mut self.store, self.backend.as_ref())
            .await?;
        match saved {
            QuestionSaved::Next(_) => Ok(StepOutcome::Stay),
            QuestionSaved::Completed(next) => {
                self.entered(next);
                Ok(StepOutcome::Moved(next))
            }
        }
    }

    /// Leave Step 2 for Step 1 without saving the open question.
    pub fn exit_authoring(&mut self) -> Result<StepOutcome, WizardError> {
        let next = questions::exit(&mut self.store)?;
        self.entered(next);
        Ok(StepOutcome::Moved(next))
    }

    /// Move forward without saving. Only view mode browses this way; the
    /// other modes advance by saving the step.
    pub fn browse_next(&mut self) -> Result<StepOutcome, WizardError> {
        if !self.mode.is_read_only() {
            return Err(WizardError::InconsistentState("save this step to continue"));
        }
        let next = self.store.current_step().transition(WizardAction::Advance)?;
        self.store.set_step(next);
        self.entered(next);
        Ok(StepOutcome::Moved(next))
    }

    pub async fn confirm_summary(&self) -> Result<ConfirmSummary, WizardError> {
        ConfirmSummary::load(&self.store, self.backend.as_ref()).await
    }

    /// Step 3 "Back".
    pub fn back(&mut self) -> Result<StepOutcome, WizardError> {
        let next = confirm::back(&mut self.store)?;
        self.entered(next);
        Ok(StepOutcome::Moved(next))
    }

    /// Step 3 "Confirm & Continue".
    pub fn confirm(&mut self) -> Result<StepOutcome, WizardError> {
        let next = confirm::confirm(&mut self.store)?;
        self.entered(next);
        Ok(StepOutcome::Moved(next))
    }

    pub async fn publish(&mut self) -> Result<StepOutcome, WizardError> {
        self.ensure_writable()?;
        let route = publish::publish(&mut self.store, self.backend.as_ref()).await?;
        self.authoring = None;
        self.catalogs = Catalogs::new();
        Ok(StepOutcome::Navigate(route))
    }

    /// Step 4 "Cancel".
    pub fn cancel(&mut self) -> Result<StepOutcome, WizardError> {
        let next = publish::cancel(&mut self.store)?;
        self.entered(next);
        Ok(StepOutcome::Moved(next))
    }

    fn ensure_writable(&self) -> Result<(), WizardError> {
        if self.mode.is_read_only() {
            return Err(WizardError::ReadOnly);
        }
        Ok(())
    }

    /// Step 2 restarts its running index every time it is entered.
    fn entered(&mut self, step: WizardStep) {
        self.authoring = match step {
            WizardStep::Questions => Some(QuestionAuthoring::for_store(&self.store)),
            _ => None,
        };
    }
}
