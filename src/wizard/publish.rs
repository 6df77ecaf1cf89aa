//! Step 4: publish.

use tracing::info;

use super::expect_step;
use super::step::{WizardAction, WizardStep};
use super::store::WizardStore;
use crate::api::TestBackend;
use crate::error::WizardError;
use crate::routes::Route;

/// Set the test live. On success the draft is cleared and the caller should
/// navigate to the returned route; on failure the store is left intact so
/// the user can retry.
pub async fn publish<B: TestBackend + ?Sized>(
    store: &mut WizardStore,
    backend: &B,
) -> Result<Route, WizardError> {
    expect_step(store, WizardStep::Publish)?;
    let Some(test_id) = store.test_id() else {
        return Err(WizardError::InconsistentState("no test id to publish"));
    };

    backend.publish_test(test_id).await?;
    info!(%test_id, "Published test");

    store.reset();
    Ok(Route::Dashboard)
}

/// "Cancel": back to the confirmation screen.
pub fn cancel(store: &mut WizardStore) -> Result<WizardStep, WizardError> {
    expect_step(store, WizardStep::Publish)?;
    let next = store.current_step().transition(WizardAction::Back)?;
    store.set_step(next);
    Ok(next)
}
