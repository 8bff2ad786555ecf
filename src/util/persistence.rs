//! Persists the farmer's dashboard preferences (selected crop, high-value
//! threshold) between sessions as JSON in the platform config directory.

use std::{fs, io, path::PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::PersistedState;

const STATE_FILENAME: &str = "user_state.json";

fn state_file() -> Option<PathBuf> {
    ProjectDirs::from("tz", "MazaoLabs", "MazaoDashboard")
        .map(|dirs| dirs.config_dir().join(STATE_FILENAME))
}

/// A missing or unreadable state file is not an error: the dashboard
/// simply starts from defaults.
pub fn load_persisted_state() -> Option<PersistedState> {
    let path = state_file()?;
    let data = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(state) => {
            debug!(path = %path.display(), "restored user state");
            Some(state)
        }
        Err(error) => {
            warn!(%error, "ignoring unreadable user state");
            None
        }
    }
}

pub fn save_persisted_state(state: &PersistedState) -> Result<(), PersistError> {
    let path = state_file().ok_or(PersistError::StorageUnavailable)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, serde_json::to_string_pretty(state)?)?;
    debug!(path = %path.display(), "saved user state");
    Ok(())
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("no config directory available on this platform")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
