//! Open a route: the dashboard or a wizard session

use std::sync::Arc;

use anyhow::{bail, Result};
use test_wizard::{Route, WizardConfig, WizardController};

use crate::steps;
use crate::style::*;

pub async fn run(config: &WizardConfig, route: Route) -> Result<()> {
    let backend = Arc::new(super::client(config)?);

    match route {
        Route::Login => super::login::run(config, None).await,
        Route::Dashboard => super::list::run(backend.as_ref()).await,
        Route::NotFound(path) => {
            print_error(&format!("Page not found: {}", path));
            bail!("no route matches {}", path)
        }
        wizard_route => {
            let mut wizard = WizardController::new(backend.clone());
            if let Some(Route::Dashboard) = steps::run(&mut wizard, &wizard_route).await? {
                super::list::run(backend.as_ref()).await?;
            }
            Ok(())
        }
    }
}
