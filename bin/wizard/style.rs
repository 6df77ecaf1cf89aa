//! Terminal styling for wizard output

use std::future::Future;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use test_wizard::wizard::WizardStep;
use test_wizard::WizardError;

/// ANSI color codes
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

use colors::*;

pub fn style_dim(s: &str) -> String {
    format!("{}{}{}", DIM, s, RESET)
}

pub fn style_cyan(s: &str) -> String {
    format!("{}{}{}", CYAN, s, RESET)
}

pub fn icon_success() -> String {
    format!("{}✓{}", GREEN, RESET)
}

pub fn icon_error() -> String {
    format!("{}✗{}", RED, RESET)
}

pub fn icon_warning() -> String {
    format!("{}⚠{}", YELLOW, RESET)
}

pub fn icon_info() -> String {
    format!("{}ℹ{}", BLUE, RESET)
}

pub fn icon_arrow() -> String {
    format!("{}→{}", CYAN, RESET)
}

pub fn print_success(msg: &str) {
    println!("  {} {}", icon_success(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("  {} {}{}{}", icon_error(), RED, msg, RESET);
}

pub fn print_warning(msg: &str) {
    println!("  {} {}{}{}", icon_warning(), YELLOW, msg, RESET);
}

pub fn print_info(msg: &str) {
    println!("  {} {}", icon_info(), msg);
}

/// "→ 2/4 Add Questions"
pub fn print_step(step: WizardStep) {
    println!();
    println!(
        "{} {}{}/{}{} {}{}{}",
        icon_arrow(),
        CYAN,
        step.step_number(),
        WizardStep::total_steps(),
        RESET,
        BOLD,
        step.title(),
        RESET
    );
    println!();
}

pub fn print_header(title: &str) {
    println!();
    println!(
        "{}{} {} {}{}",
        BOLD,
        CYAN,
        title,
        "─".repeat(50usize.saturating_sub(title.chars().count())),
        RESET
    );
    println!();
}

pub fn print_section(title: &str) {
    println!();
    println!("  {}{}{}", BOLD, title, RESET);
    println!("  {}", style_dim(&"─".repeat(40)));
}

pub fn print_key_value(key: &str, value: &str) {
    println!("  {}{}:{} {}", GRAY, key, RESET, value);
}

/// Transient notification for a failed action. The step stays where it was.
pub fn notify(err: &WizardError) {
    match err {
        WizardError::Validation(msg) => print_warning(msg),
        WizardError::ReadOnly => print_info("View mode: changes are not saved"),
        other => print_error(&other.to_string()),
    }
}

/// Run `fut` behind a spinner on stderr.
pub async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let output = fut.await;
    spinner.finish_and_clear();
    output
}

pub fn print_banner() {
    println!();
    println!("{}", style("  Test Creation Wizard").cyan().bold());
    println!("  {}", style("Create, edit and publish tests").dim());
}
