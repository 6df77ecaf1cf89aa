use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};
use test_wizard::{TestBackend, WizardController};

use super::Flow;
use crate::style::*;

pub async fn run<B: TestBackend + ?Sized>(wizard: &mut WizardController<B>) -> Result<Flow> {
    let theme = ColorfulTheme::default();

    let name = wizard
        .store()
        .basic_details()
        .map(|d| d.name.clone())
        .unwrap_or_default();
    print_info(&format!("Ready to publish {}", style_cyan(&name)));
    println!();

    let choice = Select::with_theme(&theme)
        .items(&["Publish", "Cancel", "Quit"])
        .default(0)
        .interact()?;
    match choice {
        0 => {
            let result = with_spinner("Publishing...", wizard.publish()).await;
            if result.is_ok() {
                print_success(&format!("Published {}", name));
            }
            Ok(Flow::from_outcome(result))
        }
        1 => Ok(Flow::from_outcome(wizard.cancel())),
        _ => Ok(Flow::Quit),
    }
}
