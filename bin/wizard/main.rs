mod commands;
mod steps;
mod style;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use test_wizard::{Route, WizardConfig};

#[derive(Parser)]
#[command(name = "test-wizard", version, about = "Create, edit and publish tests")]
struct Cli {
    /// Base URL of the test-management API
    #[arg(long, global = true, env = "TEST_WIZARD_API_URL")]
    api_url: Option<String>,

    /// Bearer token (overrides the saved session)
    #[arg(long, global = true, env = "TEST_WIZARD_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Config file (default: <config dir>/test-wizard/config.toml)
    #[arg(long, global = true, env = "TEST_WIZARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and save the session token
    Login {
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Forget the saved session
    Logout,
    /// List all tests
    List,
    /// Start a new test
    Create,
    /// Open an existing test
    Edit {
        id: String,
        /// Browse without saving changes
        #[arg(long)]
        view: bool,
    },
    /// Open a route such as /tests/create/T1?mode=view
    Open { route: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = WizardConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.api_url, cli.token);

    let route = match cli.command {
        Commands::Login { user_id } => return commands::login::run(&config, user_id).await,
        Commands::Logout => return commands::login::logout(&config),
        Commands::List => Route::Dashboard,
        Commands::Create => Route::CreateTest,
        Commands::Edit { id, view } if view => Route::view(id),
        Commands::Edit { id, .. } => Route::edit(id),
        Commands::Open { route } => Route::parse(&route),
    };

    commands::open::run(&config, route).await
}
