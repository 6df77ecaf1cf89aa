use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use test_wizard::api::{CorrectOption, QuestionDifficulty};
use test_wizard::wizard::{QuestionAuthoring, QuestionForm, SubmitAction};
use test_wizard::{TestBackend, WizardController};

use super::Flow;
use crate::style::*;

pub async fn run<B: TestBackend + ?Sized>(wizard: &mut WizardController<B>) -> Result<Flow> {
    let theme = ColorfulTheme::default();
    let authoring = wizard
        .authoring()
        .copied()
        .unwrap_or_else(|| QuestionAuthoring::for_store(wizard.store()));
    let position = format!(
        "Question {} of {}",
        authoring.current_index(),
        authoring.total()
    );

    if wizard.mode().is_read_only() {
        print_info(&format!("{} questions in this test", authoring.total()));
        let choice = Select::with_theme(&theme)
            .items(&["Next", "Exit Test Creation", "Quit"])
            .default(0)
            .interact()?;
        return Ok(match choice {
            0 => Flow::from_outcome(wizard.browse_next()),
            1 => Flow::from_outcome(wizard.exit_authoring()),
            _ => Flow::Quit,
        });
    }

    let choice = Select::with_theme(&theme)
        .with_prompt(format!("  {}", position))
        .items(&["Write question", "Exit Test Creation", "Quit"])
        .default(0)
        .interact()?;
    match choice {
        0 => {}
        1 => return Ok(Flow::from_outcome(wizard.exit_authoring())),
        _ => return Ok(Flow::Quit),
    }

    let form = prompt_question(wizard, &theme).await?;

    let action = if authoring.publish_enabled() {
        let picked = Select::with_theme(&theme)
            .items(&["Save & Continue", "Save & Publish"])
            .default(0)
            .interact()?;
        if picked == 1 {
            SubmitAction::Publish
        } else {
            SubmitAction::Next
        }
    } else {
        SubmitAction::Next
    };

    let result = with_spinner("Saving question...", wizard.submit_question(&form, action)).await;
    if result.is_ok() {
        print_success(&format!("{} saved", position));
    }
    Ok(Flow::from_outcome(result))
}

async fn prompt_question<B: TestBackend + ?Sized>(
    wizard: &WizardController<B>,
    theme: &ColorfulTheme,
) -> Result<QuestionForm> {
    let text = |prompt: &str| -> Result<String> {
        Ok(Input::with_theme(theme)
            .with_prompt(format!("  {}", prompt))
            .allow_empty(true)
            .interact_text()?)
    };

    let mut form = QuestionForm {
        question: text("Question")?,
        option1: text("Option 1")?,
        option2: text("Option 2")?,
        option3: text("Option 3")?,
        option4: text("Option 4")?,
        ..QuestionForm::default()
    };

    let options = form.options();
    let labels: Vec<String> = CorrectOption::ALL
        .iter()
        .map(|o| format!("Option {}: {}", o.index() + 1, options[o.index()]))
        .collect();
    let picked = Select::with_theme(theme)
        .with_prompt("  Correct option")
        .items(&labels)
        .default(0)
        .interact()?;
    form.correct_option = Some(CorrectOption::ALL[picked]);

    let solution = text("Solution (optional)")?;
    form.solution = Some(solution);

    let mut labels = vec!["(none)"];
    labels.extend(QuestionDifficulty::ALL.iter().map(|d| d.label()));
    let picked = Select::with_theme(theme)
        .with_prompt("  Difficulty")
        .items(&labels)
        .default(0)
        .interact()?;
    form.difficulty = picked
        .checked_sub(1)
        .map(|i| QuestionDifficulty::ALL[i]);

    let topics = wizard.catalogs().topics();
    if !topics.is_empty() {
        let mut labels = vec!["(none)"];
        labels.extend(topics.iter().map(|t| t.name.as_str()));
        let picked = Select::with_theme(theme)
            .with_prompt("  Topic")
            .items(&labels)
            .default(0)
            .interact()?;
        form.topic = picked.checked_sub(1).map(|i| topics[i].id.clone());
    }

    let Some(topic_id) = form.topic.clone() else {
        return Ok(form);
    };
    let sub_topics = match wizard.question_sub_topics(&topic_id).await {
        Ok(list) => list,
        Err(e) => {
            notify(&e);
            return Ok(form);
        }
    };
    if !sub_topics.is_empty() {
        let mut labels = vec!["(none)"];
        labels.extend(sub_topics.iter().map(|t| t.name.as_str()));
        let picked = Select::with_theme(theme)
            .with_prompt("  Sub-topic")
            .items(&labels)
            .default(0)
            .interact()?;
        form.sub_topic = picked.checked_sub(1).map(|i| sub_topics[i].id.clone());
    }

    Ok(form)
}
