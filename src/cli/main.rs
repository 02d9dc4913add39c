//! PFMO admin CLI
//!
//! Command-line front end for the PFMO monitoring backend.
//!
//! # Usage
//!
//! ```bash
//! pfmo login --username admin
//! pfmo forms list
//! pfmo forms create --name "Clinic Visit" --field "facility_name:Facility Name:text:required"
//! pfmo forms delete 7 --permanent
//! pfmo submissions list --state Lagos --format json
//! ```

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use pfmo_admin::config::AppConfig;
use pfmo_admin::observability::init_tracing;
use pfmo_admin::services::ApiClient;
use pfmo_admin::storage::SessionStore;
use std::sync::Arc;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "pfmo")]
#[command(version)]
#[command(about = "PFMO admin command line interface", long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "PFMO_API_URL")]
    api_url: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    format: output::OutputFormat,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, env = "PFMO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Light/dark theme preference
    Theme {
        #[command(subcommand)]
        action: commands::session::ThemeCommands,
    },
    /// Manage forms
    Forms {
        #[command(subcommand)]
        action: commands::forms::FormCommands,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        action: commands::users::UserCommands,
    },
    /// Browse submissions
    Submissions {
        #[command(subcommand)]
        action: commands::submissions::SubmissionCommands,
    },
    /// View analytics
    Dashboard {
        #[command(subcommand)]
        action: commands::dashboard::DashboardCommands,
    },
    /// AI-derived insights
    Ai {
        #[command(subcommand)]
        action: commands::ai::AiCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(api_url) = cli.api_url.as_deref() {
        config = config.with_api_url(api_url)?;
    }
    let session = Arc::new(
        SessionStore::load_from_dir(&config.state_dir).context("Failed to load client state")?,
    );
    let client = Arc::new(ApiClient::new(&config, session.clone())?);
    let ctx = commands::Context {
        client,
        format: cli.format,
    };

    match cli.command {
        Commands::Login { username, password } => {
            commands::session::login(&ctx, &username, &password).await
        }
        Commands::Logout => commands::session::logout(&ctx),
        Commands::Whoami => commands::session::whoami(&ctx).await,
        Commands::Theme { action } => commands::session::theme(action, &session),
        Commands::Forms { action } => commands::forms::handle(action, &ctx).await,
        Commands::Users { action } => commands::users::handle(action, &ctx).await,
        Commands::Submissions { action } => commands::submissions::handle(action, &ctx).await,
        Commands::Dashboard { action } => commands::dashboard::handle(action, &ctx).await,
        Commands::Ai { action } => commands::ai::handle(action, &ctx).await,
    }
}
