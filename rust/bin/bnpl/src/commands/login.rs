//! Login / logout commands.

use std::path::Path;

use anyhow::Result;
use bnpl_admin::Credentials;
use bnpl_core::AdminConfig;

use super::Context;

pub async fn login(ctx: &Context, username: &str, password: &str) -> Result<()> {
    let app = bnpl_admin::AdminApp::new(ctx.config.clone())?;
    let credentials = Credentials {
        username: username.to_string(),
        password: password.to_string(),
    };
    let user = app
        .session()
        .login(&credentials)
        .await
        .map_err(|e| anyhow::anyhow!("Login failed: {}", e))?;

    save_token(&ctx.config_path, app.session().token())?;

    println!("Logged in as {}.", user.username);
    println!("Home: {}", app.home_route());
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    if save_token(&ctx.config_path, None)?.is_none() {
        println!("Not logged in.");
        return Ok(());
    }
    println!("Logged out.");
    Ok(())
}

/// Write `token` into the config file at `path`, keeping every other key
/// as the file has it. Env overrides stay out of the file. Returns the
/// token that was there before.
fn save_token(path: &Path, token: Option<String>) -> Result<Option<String>> {
    let mut saved = AdminConfig::load(path)?;
    let previous = std::mem::replace(&mut saved.token, token);
    if previous.is_some() || saved.token.is_some() {
        saved.save(path)?;
    }
    Ok(previous)
}
