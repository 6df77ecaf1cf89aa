use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use test_wizard::api::Difficulty;
use test_wizard::wizard::BasicDetailsForm;
use test_wizard::{TestBackend, WizardController};

use super::{retry_or_quit, Flow};
use crate::style::*;

pub async fn run<B: TestBackend + ?Sized>(wizard: &mut WizardController<B>) -> Result<Flow> {
    let theme = ColorfulTheme::default();

    let mut form = match with_spinner("Loading subjects...", wizard.prefill_form()).await {
        Ok(form) => form,
        Err(e) => {
            notify(&e);
            return retry_or_quit(&theme);
        }
    };

    if wizard.mode().is_read_only() {
        print_details(wizard, &form);
        let choice = Select::with_theme(&theme)
            .items(&["Next", "Quit"])
            .default(0)
            .interact()?;
        return Ok(match choice {
            0 => Flow::from_outcome(wizard.browse_next()),
            _ => Flow::Quit,
        });
    }

    form.name = Input::with_theme(&theme)
        .with_prompt("  Test name")
        .with_initial_text(form.name.clone())
        .allow_empty(true)
        .interact_text()?;

    let subjects = wizard.catalogs().subjects().to_vec();
    if subjects.is_empty() {
        print_warning("No subjects available");
        return retry_or_quit(&theme);
    }
    let names: Vec<&str> = subjects.iter().map(|s| s.name.as_str()).collect();
    let current = subjects.iter().position(|s| s.id == form.subject).unwrap_or(0);
    let picked = Select::with_theme(&theme)
        .with_prompt("  Subject")
        .items(&names)
        .default(current)
        .interact()?;
    if let Err(e) = wizard.select_subject(&mut form, &subjects[picked].id).await {
        notify(&e);
        return Ok(Flow::Continue);
    }

    let topics = wizard.catalogs().topics().to_vec();
    let checked: Vec<bool> = topics.iter().map(|t| form.topics.contains(&t.id)).collect();
    let names: Vec<&str> = topics.iter().map(|t| t.name.as_str()).collect();
    let picked = MultiSelect::with_theme(&theme)
        .with_prompt("  Topics (space to select)")
        .items(&names)
        .defaults(&checked)
        .interact()?;
    let topic_ids = picked.into_iter().map(|i| topics[i].id.clone()).collect();
    if let Err(e) = wizard.select_topics(&mut form, topic_ids).await {
        notify(&e);
        return Ok(Flow::Continue);
    }

    let sub_topics = wizard.catalogs().sub_topics().to_vec();
    if !sub_topics.is_empty() {
        let checked: Vec<bool> = sub_topics
            .iter()
            .map(|t| form.sub_topics.contains(&t.id))
            .collect();
        let names: Vec<&str> = sub_topics.iter().map(|t| t.name.as_str()).collect();
        let picked = MultiSelect::with_theme(&theme)
            .with_prompt("  Sub-topics")
            .items(&names)
            .defaults(&checked)
            .interact()?;
        form.sub_topics = picked.into_iter().map(|i| sub_topics[i].id.clone()).collect();
    }

    form.duration_minutes = Input::with_theme(&theme)
        .with_prompt("  Duration (minutes)")
        .default(form.duration_minutes)
        .interact_text()?;

    let labels: Vec<&str> = Difficulty::ALL.iter().map(|d| d.label()).collect();
    let current = form
        .difficulty
        .and_then(|d| Difficulty::ALL.iter().position(|x| *x == d))
        .unwrap_or(0);
    let picked = Select::with_theme(&theme)
        .with_prompt("  Difficulty")
        .items(&labels)
        .default(current)
        .interact()?;
    form.difficulty = Some(Difficulty::ALL[picked]);

    form.correct_marks = Input::with_theme(&theme)
        .with_prompt("  Marks per correct answer")
        .default(form.correct_marks)
        .interact_text()?;
    form.wrong_marks = Input::with_theme(&theme)
        .with_prompt("  Marks per wrong answer")
        .default(form.wrong_marks)
        .interact_text()?;
    form.unattempt_marks = Input::with_theme(&theme)
        .with_prompt("  Marks per unattempted question")
        .default(form.unattempt_marks)
        .interact_text()?;
    form.total_questions = Input::with_theme(&theme)
        .with_prompt("  Number of questions")
        .default(form.total_questions)
        .interact_text()?;

    println!();
    print_key_value("Total marks", &form.total_marks().to_string());
    println!();

    let save = Confirm::with_theme(&theme)
        .with_prompt("  Save and continue to questions?")
        .default(true)
        .interact()?;
    if !save {
        return retry_or_quit(&theme);
    }

    let result = with_spinner("Saving test...", wizard.submit_basic(&form)).await;
    if result.is_ok() {
        print_success("Test saved");
    }
    Ok(Flow::from_outcome(result))
}

fn print_details<B: TestBackend + ?Sized>(wizard: &WizardController<B>, form: &BasicDetailsForm) {
    let catalogs = wizard.catalogs();
    print_section("Basic Details");
    print_key_value("Name", &form.name);
    print_key_value(
        "Subject",
        catalogs.subject_name(&form.subject).unwrap_or(&form.subject),
    );
    let topics: Vec<&str> = form
        .topics
        .iter()
        .map(|id| {
            catalogs
                .topics()
                .iter()
                .find(|t| &t.id == id)
                .map_or(id.as_str(), |t| t.name.as_str())
        })
        .collect();
    let sub_topics: Vec<&str> = form
        .sub_topics
        .iter()
        .map(|id| {
            catalogs
                .sub_topics()
                .iter()
                .find(|t| &t.id == id)
                .map_or(id.as_str(), |t| t.name.as_str())
        })
        .collect();
    print_key_value("Topics", &topics.join(", "));
    print_key_value("Sub-topics", &sub_topics.join(", "));
    print_key_value("Duration", &format!("{} min", form.duration_minutes));
    print_key_value(
        "Difficulty",
        form.difficulty.map(|d| d.label()).unwrap_or("-"),
    );
    print_key_value(
        "Marking",
        &format!(
            "+{} / {} / {}",
            form.correct_marks, form.wrong_marks, form.unattempt_marks
        ),
    );
    print_key_value("Questions", &form.total_questions.to_string());
    print_key_value("Total marks", &form.total_marks().to_string());
    println!();
}
