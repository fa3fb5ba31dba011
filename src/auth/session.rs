use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::debug;

/// Token file name inside the data directory.
/// The file holds the raw token string and nothing else.
const TOKEN_FILE: &str = "token";

/// Single-slot persistent store for the auth token.
///
/// Constructed with an explicit directory so tests can point it at a
/// temp dir instead of the real data dir. All components share one
/// instance behind an `Arc`; reads and writes go through an in-memory
/// mirror so `get()` is cheap and synchronous, with every mutation
/// written through to disk.
pub struct SessionStore {
    dir: PathBuf,
    token: Mutex<Option<String>>,
}

impl SessionStore {
    /// Open the store, loading any token persisted by a previous run.
    pub fn new(dir: PathBuf) -> Self {
        let token = Self::read_from_disk(&dir);
        Self {
            dir,
            token: Mutex::new(token),
        }
    }

    /// Current token, or `None` when unauthenticated.
    /// An empty stored value counts as absent.
    pub fn get(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    /// Whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.lock().unwrap().is_some()
    }

    /// Store a new token, replacing any previous one.
    pub fn set(&self, token: &str) -> Result<()> {
        let normalized = Self::normalize(Some(token.to_string()));
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.token_path();
        match normalized {
            Some(ref value) => {
                std::fs::write(&path, value)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            None => {
                // An empty token means unauthenticated, stored as absence
                if path.exists() {
                    std::fs::remove_file(&path)?;
                }
            }
        }
        *self.token.lock().unwrap() = normalized;
        debug!("Session token updated");
        Ok(())
    }

    /// Remove the token. Safe to call when no token is stored.
    pub fn clear(&self) -> Result<()> {
        let path = self.token_path();
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        *self.token.lock().unwrap() = None;
        debug!("Session token cleared");
        Ok(())
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn read_from_disk(dir: &Path) -> Option<String> {
        let contents = std::fs::read_to_string(dir.join(TOKEN_FILE)).ok();
        Self::normalize(contents.map(|s| s.trim_end_matches('\n').to_string()))
    }

    fn normalize(token: Option<String>) -> Option<String> {
        token.filter(|t| !t.is_empty())
    }
}
