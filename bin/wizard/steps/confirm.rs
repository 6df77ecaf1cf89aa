use anyhow::Result;
use chrono::{NaiveDate, TimeZone, Utc};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use test_wizard::wizard::{ConfirmSummary, LiveUntil, PublishMode};
use test_wizard::{TestBackend, WizardController};

use super::{retry_or_quit, Flow};
use crate::style::*;

pub async fn run<B: TestBackend + ?Sized>(wizard: &mut WizardController<B>) -> Result<Flow> {
    let theme = ColorfulTheme::default();

    let summary = match with_spinner("Loading test...", wizard.confirm_summary()).await {
        Ok(summary) => summary,
        Err(e) => {
            notify(&e);
            return retry_or_quit(&theme);
        }
    };
    print_summary(&summary);

    let labels: Vec<&str> = PublishMode::ALL.iter().map(|m| m.label()).collect();
    let picked = Select::with_theme(&theme)
        .with_prompt("  Publish mode")
        .items(&labels)
        .default(0)
        .interact()?;
    let mode = PublishMode::ALL[picked];

    let live_until = prompt_live_until(&theme)?;
    print_key_value("Mode", mode.label());
    match live_until.expires_at(Utc::now()) {
        Some(at) => print_key_value("Available until", &at.format("%Y-%m-%d").to_string()),
        None => print_key_value("Available until", live_until.label()),
    }
    println!();

    let choice = Select::with_theme(&theme)
        .items(&["Confirm & Continue", "Back", "Quit"])
        .default(0)
        .interact()?;
    Ok(match choice {
        0 => Flow::from_outcome(wizard.confirm()),
        1 => Flow::from_outcome(wizard.back()),
        _ => Flow::Quit,
    })
}

fn print_summary(summary: &ConfirmSummary) {
    print_section("Summary");
    print_key_value("Name", &summary.name);
    print_key_value("Type", summary.kind.label());
    print_key_value("Difficulty", summary.difficulty.label());
    print_key_value("Subject", summary.subject.as_deref().unwrap_or("-"));
    print_key_value("Topics", &summary.topics.join(", "));
    print_key_value("Sub-topics", &summary.sub_topics.join(", "));
    print_key_value("Questions", &summary.total_questions.to_string());
    print_key_value("Total marks", &summary.total_marks.to_string());
    println!();
}

fn prompt_live_until(theme: &ColorfulTheme) -> Result<LiveUntil> {
    let mut labels: Vec<&str> = LiveUntil::PRESETS.iter().map(|l| l.label()).collect();
    labels.push("Custom Duration");
    let picked = Select::with_theme(theme)
        .with_prompt("  Live until")
        .items(&labels)
        .default(0)
        .interact()?;
    if let Some(preset) = LiveUntil::PRESETS.get(picked) {
        return Ok(*preset);
    }

    let date: String = Input::with_theme(theme)
        .with_prompt("  End date (YYYY-MM-DD)")
        .validate_with(|input: &String| -> Result<(), &str> {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| "Use the format YYYY-MM-DD")
        })
        .interact_text()?;
    let end = NaiveDate::parse_from_str(&date, "%Y-%m-%d")?
        .and_hms_opt(23, 59, 59)
        .map(|at| Utc.from_utc_datetime(&at));
    Ok(end.map_or(LiveUntil::Always, LiveUntil::Custom))
}
