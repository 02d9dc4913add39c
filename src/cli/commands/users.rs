use anyhow::Result;
use clap::Subcommand;
use pfmo_admin::models::{NewUser, RecordId, UserRole};

use super::{Context, confirm};
use crate::output::{or_dash, print_table};

#[derive(Subcommand)]
pub enum UserCommands {
    /// List user accounts
    List,
    /// Register a new account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: String,
        #[arg(long, env = "PFMO_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
        /// data_collector or admin
        #[arg(long, default_value = "data_collector")]
        role: UserRole,
    },
    /// Delete an account
    Delete {
        id: RecordId,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub async fn handle(action: UserCommands, ctx: &Context) -> Result<()> {
    ctx.require_session().await?;

    match action {
        UserCommands::List => {
            let users = ctx.client.list_users().await?;
            if !ctx.format.print_structured(&users)? {
                let rows: Vec<Vec<String>> = users
                    .iter()
                    .map(|u| {
                        vec![
                            u.id.to_string(),
                            u.username.clone(),
                            or_dash(u.full_name.as_deref()),
                            or_dash(u.email.as_deref()),
                            u.role().display_label().to_string(),
                        ]
                    })
                    .collect();
                print_table(&["ID", "USERNAME", "NAME", "EMAIL", "ROLE"], &rows);
            }
        }
        UserCommands::Register {
            username,
            email,
            full_name,
            password,
            role,
        } => {
            let user = ctx
                .client
                .register_user(&NewUser {
                    username,
                    email,
                    full_name,
                    password,
                    role,
                })
                .await?;
            println!("Registered {} ({})", user.username, user.id);
        }
        UserCommands::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this user?") {
                println!("Cancelled");
                return Ok(());
            }
            ctx.client.delete_user(&id).await?;
            println!("User {} deleted", id);
        }
    }
    Ok(())
}
