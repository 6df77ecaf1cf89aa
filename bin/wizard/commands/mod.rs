pub mod list;
pub mod login;
pub mod open;

use anyhow::{Context, Result};
use test_wizard::{ApiClient, Session, WizardConfig};

/// Client authorized with the explicit token, else the saved session.
pub fn client(config: &WizardConfig) -> Result<ApiClient> {
    let mut client = ApiClient::new(&config.api).context("Failed to build HTTP client")?;
    if config.api.token.is_none() {
        client.set_token(Session::new(&config.session_file).token());
    }
    Ok(client)
}
