//! Subcommand implementations.

pub mod login;
pub mod nav;
pub mod resource;

use std::path::PathBuf;

use anyhow::Result;
use bnpl_admin::{AdminApp, PermissionSet, User};
use bnpl_core::AdminConfig;

/// Everything a command needs from the command line.
pub struct Context {
    pub config: AdminConfig,
    pub config_path: PathBuf,
    /// `--permissions` list, if given.
    pub permissions: Option<String>,
    pub json: bool,
}

/// Build the app and establish whose permissions apply.
///
/// `--permissions` wins; otherwise a saved token is refreshed against
/// the API; otherwise the session stays anonymous.
pub async fn open(ctx: &Context) -> Result<AdminApp> {
    let app = AdminApp::new(ctx.config.clone())?;

    if let Some(list) = &ctx.permissions {
        let user = User {
            id: "cli".into(),
            username: "cli".into(),
            full_name: "Command line".into(),
            role: None,
            branch_id: None,
        };
        app.session().assume(user, PermissionSet::parse_list(list));
    } else if ctx.config.token.is_some() {
        if let Err(e) = app.session().refresh().await {
            tracing::warn!(code = e.error_code(), "could not restore session: {}", e);
        }
    }
    Ok(app)
}

pub fn show_config(ctx: &Context) -> Result<()> {
    let mut shown = ctx.config.clone();
    if shown.token.is_some() {
        shown.token = Some("***".into());
    }
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        println!("# {}", ctx.config_path.display());
        println!("api_base_url         = {}", shown.api_base_url);
        println!("tenant               = {}", shown.tenant.as_deref().unwrap_or("-"));
        println!("locale               = {}", shown.locale);
        println!("debounce_ms          = {}", shown.debounce_ms);
        println!("request_timeout_secs = {}", shown.request_timeout_secs);
        println!("login_path           = {}", shown.login_path);
        println!("token                = {}", shown.token.as_deref().unwrap_or("-"));
    }
    Ok(())
}
