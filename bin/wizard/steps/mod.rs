//! Interactive step screens
//!
//! Each screen prompts for one step, hands the input to the controller and
//! reports failures as notifications. A failed action leaves the wizard on
//! the same step so the screen is shown again.

mod basic;
mod confirm;
mod publish;
mod questions;

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};
use test_wizard::wizard::{EntryOutcome, StepOutcome};
use test_wizard::{Route, TestBackend, WizardController, WizardError, WizardStep};

use crate::style::*;

/// What the loop does after a screen returns.
pub enum Flow {
    Continue,
    Leave(Route),
    Quit,
}

impl Flow {
    /// Map a controller result, notifying on failure.
    fn from_outcome(result: Result<StepOutcome, WizardError>) -> Self {
        match result {
            Ok(StepOutcome::Navigate(route)) => Flow::Leave(route),
            Ok(StepOutcome::Moved(_)) | Ok(StepOutcome::Stay) => Flow::Continue,
            Err(e) => {
                notify(&e);
                Flow::Continue
            }
        }
    }
}

/// Run the wizard until the user leaves. Returns where to go next, if
/// anywhere.
pub async fn run<B: TestBackend + ?Sized>(
    wizard: &mut WizardController<B>,
    route: &Route,
) -> Result<Option<Route>> {
    let term = console::Term::stdout();
    if term.is_term() {
        term.clear_screen()?;
        print_banner();
    }

    match with_spinner("Opening wizard...", wizard.enter(route)).await? {
        EntryOutcome::Fresh => print_info("New test"),
        EntryOutcome::Hydrated { test_id } => {
            print_success(&format!("Loaded test {}", style_cyan(&test_id)))
        }
        // Logged by the controller; the form opens empty.
        EntryOutcome::LoadFailed { .. } => {}
    }
    if wizard.mode().is_read_only() {
        print_info("View mode: browse only, nothing is saved");
    }

    loop {
        let step = wizard.current_step();
        print_step(step);
        let flow = match step {
            WizardStep::Basic => basic::run(wizard).await?,
            WizardStep::Questions => questions::run(wizard).await?,
            WizardStep::Confirm => confirm::run(wizard).await?,
            WizardStep::Publish => publish::run(wizard).await?,
        };
        match flow {
            Flow::Continue => {}
            Flow::Leave(next) => return Ok(Some(next)),
            Flow::Quit => return Ok(None),
        }
    }
}

fn retry_or_quit(theme: &ColorfulTheme) -> Result<Flow> {
    let choice = Select::with_theme(theme)
        .items(&["Try again", "Quit"])
        .default(0)
        .interact()?;
    Ok(if choice == 0 { Flow::Continue } else { Flow::Quit })
}
