//! Step 3: confirmation.
//!
//! Read-only summary of the saved test. The scheduling selectors are shown
//! but not sent anywhere yet.

use chrono::{DateTime, Duration, Utc};

use super::expect_step;
use super::step::{WizardAction, WizardStep};
use super::store::WizardStore;
use crate::api::{Difficulty, TestBackend, TestKind};
use crate::error::WizardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishMode {
    #[default]
    PublishNow,
    Schedule,
    SaveToBank,
}

impl PublishMode {
    pub const ALL: [PublishMode; 3] = [Self::PublishNow, Self::Schedule, Self::SaveToBank];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PublishNow => "Publish Now",
            Self::Schedule => "Schedule Publish",
            Self::SaveToBank => "Save to Question Bank",
        }
    }
}

/// How long the test stays available once live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiveUntil {
    #[default]
    Always,
    OneWeek,
    TwoWeeks,
    ThreeWeeks,
    OneMonth,
    Custom(DateTime<Utc>),
}

impl LiveUntil {
    /// Fixed choices; `Custom` needs a date and is offered separately.
    pub const PRESETS: [LiveUntil; 5] = [
        Self::Always,
        Self::OneWeek,
        Self::TwoWeeks,
        Self::ThreeWeeks,
        Self::OneMonth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Always => "Always Available",
            Self::OneWeek => "1 Week",
            Self::TwoWeeks => "2 Weeks",
            Self::ThreeWeeks => "3 Weeks",
            Self::OneMonth => "1 Month",
            Self::Custom(_) => "Custom Duration",
        }
    }

    /// End of availability relative to `now`; `None` means no expiry.
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Always => None,
            Self::OneWeek => Some(now + Duration::weeks(1)),
            Self::TwoWeeks => Some(now + Duration::weeks(2)),
            Self::ThreeWeeks => Some(now + Duration::weeks(3)),
            Self::OneMonth => Some(now + Duration::days(30)),
            Self::Custom(at) => Some(*at),
        }
    }
}

/// What the confirmation screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmSummary {
    pub name: String,
    pub kind: TestKind,
    pub difficulty: Difficulty,
    pub subject: Option<String>,
    pub topics: Vec<String>,
    pub sub_topics: Vec<String>,
    pub total_questions: u32,
    pub total_marks: i32,
}

impl ConfirmSummary {
    /// Fetch the saved test (read-only) and merge it with the in-memory
    /// basic details.
    pub async fn load<B: TestBackend + ?Sized>(
        store: &WizardStore,
        backend: &B,
    ) -> Result<Self, WizardError> {
        let Some(test_id) = store.test_id() else {
            return Err(WizardError::InconsistentState("no test id to confirm"));
        };
        let record = backend.get_test(test_id).await?;
        let basic = store.basic_details();

        Ok(Self {
            name: basic
                .map(|b| b.name.clone())
                .unwrap_or_else(|| record.name.clone()),
            kind: basic.map(|b| b.kind).unwrap_or(record.kind),
            difficulty: basic
                .map(|b| b.difficulty)
                .or(record.difficulty)
                .unwrap_or_default(),
            subject: record.subject,
            topics: record.topics,
            sub_topics: record.sub_topics,
            total_questions: store
                .no_of_questions()
                .or(record.total_questions)
                .unwrap_or_default(),
            total_marks: basic
                .map(|b| b.total_marks)
                .or(record.total_marks)
                .unwrap_or_default(),
        })
    }
}

/// "Back" to the question editor.
pub fn back(store: &mut WizardStore) -> Result<WizardStep, WizardError> {
    move_from(store, WizardAction::Back)
}

/// "Confirm & Continue" to publishing.
pub fn confirm(store: &mut WizardStore) -> Result<WizardStep, WizardError> {
    move_from(store, WizardAction::Advance)
}

fn move_from(store: &mut WizardStore, action: WizardAction) -> Result<WizardStep, WizardError> {
    expect_step(store, WizardStep::Confirm)?;
    let next = store.current_step().transition(action)?;
    store.set_step(next);
    Ok(next)
}
