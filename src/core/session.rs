//! # Session Context
//!
//! The session token is created at login and destroyed at logout, both of
//! which happen outside this client. Here it is read once at startup and then
//! handed to every view as a read-only `SessionContext`.
//!
//! Stored tokens live in `~/.bookshelf/session.json` under the `"token"` key:
//!
//! ```text
//! { "token": "4f2a9c..." }
//! ```
//!
//! Nothing in this crate writes that file.

use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
struct SessionFile {
    token: Option<String>,
}

/// Read-only view of the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    token: Option<String>,
}

impl SessionContext {
    /// An empty or whitespace-only token counts as no token.
    pub fn new(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        Self { token }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Returns `~/.bookshelf/session.json`.
pub fn session_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".bookshelf").join("session.json"))
}

/// Read the stored token from a session file.
///
/// A missing file is a normal "logged out" state and yields `Ok(None)`.
pub fn read_token(path: &Path) -> io::Result<Option<String>> {
    if !path.exists() {
        debug!("No session file at {}", path.display());
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    let file: SessionFile = serde_json::from_str(&contents)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    info!(
        "Read session file {} (token {})",
        path.display(),
        if file.token.is_some() { "present" } else { "absent" }
    );
    Ok(file.token)
}

/// Build the session context: an explicit token (CLI flag or env var) wins
/// over the stored one.
pub fn load_session(explicit_token: Option<String>, path: Option<&Path>) -> SessionContext {
    // An empty BOOKSHELF_TOKEN= must not hide the stored token
    let explicit_token = explicit_token.filter(|t| !t.trim().is_empty());
    if explicit_token.is_some() {
        return SessionContext::new(explicit_token);
    }
    let Some(path) = path else {
        return SessionContext::anonymous();
    };
    match read_token(path) {
        Ok(token) => SessionContext::new(token),
        Err(e) => {
            warn!("Failed to read session file {}: {}", path.display(), e);
            SessionContext::anonymous()
        }
    }
}
