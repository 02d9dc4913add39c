//! Command handlers

use anyhow::{Result, bail};
use pfmo_admin::models::User;
use pfmo_admin::services::ApiClient;
use pfmo_admin::storage::ClientError;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::output::OutputFormat;

pub mod ai;
pub mod dashboard;
pub mod forms;
pub mod session;
pub mod submissions;
pub mod users;

pub struct Context {
    pub client: Arc<ApiClient>,
    pub format: OutputFormat,
}

impl Context {
    /// Check the stored session before a protected command.
    pub async fn require_session(&self) -> Result<User> {
        match self.client.verify().await {
            Ok(user) => Ok(user),
            Err(ClientError::Unauthorized) => bail!("Not logged in. Run `pfmo login` first."),
            Err(e) => Err(e.into()),
        }
    }
}

/// Ask a yes/no question on stdin. Anything but "y"/"yes" is a no.
pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
