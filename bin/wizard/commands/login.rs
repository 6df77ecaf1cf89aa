//! Login command - authenticate and save the session token

use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, Password};
use test_wizard::api::Credentials;
use test_wizard::{Session, WizardConfig};

use crate::style::*;

pub async fn run(config: &WizardConfig, user_id: Option<String>) -> Result<()> {
    print_banner();
    print_header("Login");

    let theme = ColorfulTheme::default();
    let user_id = match user_id {
        Some(id) => id,
        None => Input::with_theme(&theme)
            .with_prompt("  User ID")
            .interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt("  Password")
        .interact()?;

    let client = super::client(config)?;
    let session = Session::new(&config.session_file);
    let credentials = Credentials { user_id, password };

    match with_spinner("Logging in...", session.login(&client, &credentials)).await {
        Ok(_) => {
            print_success("Login successful");
            print_key_value("Session", &session.path().display().to_string());
            Ok(())
        }
        Err(e) => {
            notify(&e);
            Err(e).context("Login failed")
        }
    }
}

pub fn logout(config: &WizardConfig) -> Result<()> {
    let session = Session::new(&config.session_file);
    session
        .logout()
        .with_context(|| format!("Failed to remove {}", session.path().display()))?;
    print_success("Logged out");
    Ok(())
}
