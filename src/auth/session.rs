use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::model::{Employee, Role};

/// The signed-in identity with the role it was given at login.
///
/// Stored flat: the identity fields plus `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(flatten)]
    pub identity: Employee,
    pub role: Role,
}

impl Session {
    /// Derives the role from the identity's position. Only called at login.
    pub fn start(identity: Employee) -> Self {
        let role = Role::from_position(&identity.position);
        Self { identity, role }
    }

    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn is_management(&self) -> bool {
        self.role.is_management()
    }
}

/// Holds the one session of this profile, persisted as a JSON file.
///
/// The file is read once in [`SessionStore::init`]; afterwards the in-memory
/// copy is authoritative. There is no expiry.
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn init(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = read_session(&path);

        match &current {
            Some(session) => info!(user = %session.name(), role = %session.role, "Session restored"),
            None => debug!(path = %path.display(), "No stored session"),
        }

        Self {
            path,
            current: RwLock::new(current),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Starts a session for `identity`, replacing any previous one.
    pub async fn login(&self, identity: Employee) -> Session {
        let session = Session::start(identity);

        match serde_json::to_vec(&session) {
            Ok(bytes) => {
                if let Err(e) = tokio::fs::write(&self.path, bytes).await {
                    warn!(error = %e, path = %self.path.display(), "Failed to persist session");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize session"),
        }

        info!(user = %session.name(), role = %session.role, "Logged in");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        session
    }

    pub async fn logout(&self) {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, path = %self.path.display(), "Failed to remove session file"),
        }

        if let Some(session) = previous {
            info!(user = %session.name(), "Logged out");
        }
    }
}

fn read_session(path: &Path) -> Option<Session> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Failed to read session file");
            return None;
        }
    };

    serde_json::from_slice(&bytes)
        .map_err(|e| warn!(error = %e, path = %path.display(), "Ignoring unreadable session file"))
        .ok()
}
