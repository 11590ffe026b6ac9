//! `bnpl`: the BNPL back-office CLI.
//!
//! Prints what a staff member would see in the dashboard (menu, landing
//! page, permission answers) and reads resources through the same hooks
//! the dashboard uses.

mod commands;

use std::path::PathBuf;

use bnpl_core::AdminConfig;
use clap::{Parser, Subcommand};
use tracing::debug;

/// BNPL back-office CLI.
#[derive(Parser, Debug)]
#[command(name = "bnpl", about = "BNPL back-office CLI")]
struct Cli {
    /// Path to config file (default: ~/.bnpl/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    /// Label language (en, ru, uz). Overrides the config file.
    #[arg(long = "locale", global = true)]
    locale: Option<String>,

    /// Evaluate as a session holding these permissions instead of
    /// asking the API, e.g. `view:client,view:order`.
    #[arg(long = "permissions", short = 'p', global = true)]
    permissions: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the sidebar as the session sees it.
    Menu {
        /// Include entries the session cannot see.
        #[arg(long)]
        all: bool,
    },

    /// Print the landing page after login.
    Home,

    /// Check one permission.
    Check {
        /// Action, e.g. view.
        action: String,
        /// Subject, e.g. client.
        subject: String,
    },

    /// Check whether a dashboard path opens or redirects.
    Route { path: String },

    /// List a resource.
    Get {
        /// Resource type (clients, devices, orders, employees, branches,
        /// currencies, investors, payment-plans).
        resource: String,
        /// Search text.
        #[arg(long, short = 's')]
        search: Option<String>,
        /// Page number.
        #[arg(long)]
        page: Option<u32>,
    },

    /// Login and save the token.
    Login {
        #[arg(long)]
        user: Option<String>,
        /// Password (prefer the interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the saved token.
    Logout,

    /// Print the effective configuration.
    Config,

    /// Show version.
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(AdminConfig::default_path);
    debug!("config: {}", config_path.display());

    let mut config = AdminConfig::load(&config_path)?.with_env();
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    let json = cli.output == "json";
    let ctx = commands::Context {
        config,
        config_path,
        permissions: cli.permissions,
        json,
    };

    match cli.command {
        Commands::Menu { all } => commands::nav::menu(&ctx, all).await?,
        Commands::Home => commands::nav::home(&ctx).await?,
        Commands::Check { action, subject } => commands::nav::check(&ctx, &action, &subject).await?,
        Commands::Route { path } => commands::nav::route(&ctx, &path).await?,
        Commands::Get {
            resource,
            search,
            page,
        } => commands::resource::get(&ctx, &resource, search.as_deref(), page).await?,
        Commands::Login { user, password } => {
            let username = match user {
                Some(u) => u,
                None => {
                    eprint!("Username: ");
                    let mut s = String::new();
                    std::io::stdin().read_line(&mut s)?;
                    s.trim().to_string()
                }
            };
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")?,
            };
            commands::login::login(&ctx, &username, &password).await?;
        }
        Commands::Logout => commands::login::logout(&ctx)?,
        Commands::Config => commands::show_config(&ctx)?,
        Commands::Version => println!("bnpl cli v{}", env!("CARGO_PKG_VERSION")),
    }

    Ok(())
}
