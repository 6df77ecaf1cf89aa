//! Dashboard - list tests

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use test_wizard::api::{TestStatus, TestSummary};
use test_wizard::{Route, TestBackend};

use crate::style::*;

pub async fn run<B: TestBackend + ?Sized>(backend: &B) -> Result<()> {
    print_header("Tests");

    let tests = with_spinner("Loading tests...", backend.list_tests())
        .await
        .context("Failed to load tests")?;

    if tests.is_empty() {
        print_info("No tests yet");
    } else {
        println!("{}", render(&tests));
    }

    println!();
    print_key_value("Create", &format!("test-wizard open {}", Route::CreateTest));
    print_key_value("Edit", &format!("test-wizard open {}", Route::edit("<id>")));
    print_key_value("View", &format!("test-wizard open {}", Route::view("<id>")));
    Ok(())
}

fn render(tests: &[TestSummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Subject", "Status", "Created"]);

    for test in tests {
        let status = match test.status {
            TestStatus::Live => style_cyan("live"),
            TestStatus::Draft => style_dim("draft"),
        };
        table.add_row(vec![
            test.id.clone(),
            test.name.clone(),
            test.subject.clone().unwrap_or_else(|| "-".to_string()),
            status,
            test.created_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table
}
