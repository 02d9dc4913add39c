use anyhow::Result;
use clap::Subcommand;
use pfmo_admin::storage::{SessionStore, Theme};

use super::Context;
use crate::output::{or_dash, print_table};

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set { theme: Theme },
}

pub async fn login(ctx: &Context, username: &str, password: &str) -> Result<()> {
    ctx.client.login(username, password).await?;
    let user = ctx.require_session().await?;
    println!(
        "Logged in as {} ({})",
        user.username,
        user.role().display_label()
    );
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    if ctx.client.logout()? {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    let user = ctx.require_session().await?;
    if !ctx.format.print_structured(&user)? {
        let rows = vec![vec![
            user.id.to_string(),
            user.username.clone(),
            or_dash(user.full_name.as_deref()),
            or_dash(user.email.as_deref()),
            user.role().display_label().to_string(),
        ]];
        print_table(&["ID", "USERNAME", "NAME", "EMAIL", "ROLE"], &rows);
    }
    Ok(())
}

pub fn theme(action: ThemeCommands, session: &SessionStore) -> Result<()> {
    let theme = match action {
        ThemeCommands::Show => session.theme(),
        ThemeCommands::Toggle => session.toggle_theme()?,
        ThemeCommands::Set { theme } => {
            session.set_theme(theme)?;
            theme
        }
    };
    println!("Theme: {}", theme);
    Ok(())
}
