//! On-disk credential store
//!
//! Exactly one bearer secret (web cookie token or OAuth access token) is kept
//! in `~/.dida365/token.json`, readable by the owner only. Files written by
//! older releases (`signon_token` / `signon_saved_at`) are migrated on load.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_DIR_NAME;
use crate::error::{Dida365Error, Result};

const TOKEN_FILE_NAME: &str = "token.json";

/// A saved secret and when it was saved (epoch milliseconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub saved_at: i64,
}

/// Every field any recognized on-disk shape may carry
#[derive(Debug, Default, Deserialize)]
struct StoredCredential {
    token: Option<String>,
    saved_at: Option<i64>,
    signon_token: Option<String>,
    signon_saved_at: Option<i64>,
}

impl StoredCredential {
    /// Map a parsed file onto the current shape; `None` for empty records
    fn normalize(self) -> Option<Credential> {
        if let Some(token) = self.token.filter(|t| !t.is_empty()) {
            return Some(Credential {
                token,
                saved_at: self.saved_at.unwrap_or_default(),
            });
        }

        self.signon_token
            .filter(|t| !t.is_empty())
            .map(|token| Credential {
                token,
                saved_at: self.signon_saved_at.unwrap_or_default(),
            })
    }
}

/// File-backed store for the single credential
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store backed by an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.dida365/token.json`, if a home directory can be found
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(TOKEN_FILE_NAME))
    }

    /// Store at the default per-user location
    pub fn at_default_location() -> Result<Self> {
        Self::default_path()
            .map(Self::new)
            .ok_or_else(|| Dida365Error::Config("cannot determine home directory".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `secret`, replacing whatever was saved before
    pub fn save(&self, secret: &str) -> Result<Credential> {
        let credential = Credential {
            token: secret.to_string(),
            saved_at: Utc::now().timestamp_millis(),
        };
        let json = serde_json::to_string_pretty(&credential)?;
        self.write_private(json.as_bytes())?;

        tracing::info!(path = %self.path.display(), "credential saved");
        Ok(credential)
    }

    /// Load the saved credential; missing, unreadable or malformed files are `None`
    pub fn load(&self) -> Option<Credential> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), "no credential: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<StoredCredential>(&raw) {
            Ok(stored) => stored.normalize(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring malformed credential file: {}", e);
                None
            }
        }
    }

    /// Overwrite the file with an empty record; never fails
    pub fn clear(&self) {
        if let Err(e) = self.write_private(b"{}") {
            tracing::warn!(path = %self.path.display(), "failed to clear credential: {}", e);
        }
    }

    /// Write via a sibling temp file and rename, with owner-only permissions
    fn write_private(&self, contents: &[u8]) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
                restrict_permissions(dir, 0o700)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = open_private(&tmp)?;
            file.write_all(contents)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        restrict_permissions(&self.path, 0o600)?;
        Ok(())
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
