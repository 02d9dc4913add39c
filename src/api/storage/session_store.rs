//! Persistent client state: the session token and the theme preference.
//!
//! Both live as named keys (`auth_token`, `theme`) in one JSON file that is
//! read once at startup and rewritten whenever a value changes. Only the
//! login and logout flows (and the rejected-credential path of the API
//! client) may change the token, so its setters are crate-private.

use super::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

pub const STATE_FILE_NAME: &str = "state.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth_token: Option<String>,
    #[serde(default)]
    theme: Theme,
}

/// Process-wide client state, shared by handle (`Arc<SessionStore>`).
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    state: RwLock<PersistedState>,
}

impl SessionStore {
    /// Load state from `path`. A missing file starts an empty session; an
    /// unreadable one is logged and replaced on the next write.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        let state = if path.exists() {
            let content = fs::read_to_string(&path)?;
            match serde_json::from_str::<PersistedState>(&content) {
                Ok(state) => state,
                Err(e) => {
                    warn!("Ignoring unreadable state file {:?}: {}", path, e);
                    PersistedState::default()
                }
            }
        } else {
            debug!("No state file at {:?}, starting a fresh session", path);
            PersistedState::default()
        };

        Ok(Self {
            path: Some(path),
            state: RwLock::new(state),
        })
    }

    /// Load `state.json` from a state directory.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ClientError> {
        Self::load(dir.join(STATE_FILE_NAME))
    }

    /// State that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(PersistedState::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn token(&self) -> Option<String> {
        self.read().auth_token.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().auth_token.is_some()
    }

    pub fn theme(&self) -> Theme {
        self.read().theme
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), ClientError> {
        let mut state = self.write();
        if state.theme == theme {
            return Ok(());
        }
        state.theme = theme;
        self.persist(&state)
    }

    pub fn toggle_theme(&self) -> Result<Theme, ClientError> {
        let mut state = self.write();
        state.theme = state.theme.toggled();
        self.persist(&state)?;
        Ok(state.theme)
    }

    pub(crate) fn set_token(&self, token: String) -> Result<(), ClientError> {
        let mut state = self.write();
        state.auth_token = Some(token);
        self.persist(&state)
    }

    /// Drop the token. Returns whether one was stored.
    pub(crate) fn clear_token(&self) -> Result<bool, ClientError> {
        let mut state = self.write();
        if state.auth_token.take().is_none() {
            return Ok(false);
        }
        self.persist(&state)?;
        Ok(true)
    }

    fn persist(&self, state: &PersistedState) -> Result<(), ClientError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(state)
            .map_err(|e| ClientError::Io(format!("Failed to encode state: {}", e)))?;
        fs::write(path, content)?;
        debug!("Saved client state to {:?}", path);
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, PersistedState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, PersistedState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
