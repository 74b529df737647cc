//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Backup fallback when the primary copy is corrupt
//! - Storage-agnostic: anything implementing [`Storage`]

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::time::now_ms;

/// Bump when a persisted type changes shape incompatibly
pub const FORMAT_VERSION: u32 = 1;

/// Storage keys
pub const SAVE_KEY: &str = "breaking_bricks_save";
pub const HIGHSCORES_KEY: &str = "breaking_bricks_highscores";
pub const SETTINGS_KEY: &str = "breaking_bricks_settings";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save format version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;

/// A string key/value store (a directory on native, LocalStorage on web)
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;

    /// The previous value written under `key`, if the backend keeps one
    fn get_backup(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// What actually gets written: the payload plus enough to validate it
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    /// Unix timestamp (ms)
    pub saved_at: f64,
    pub payload: T,
}

pub fn save<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) -> Result<()> {
    let envelope = Envelope {
        version: FORMAT_VERSION,
        saved_at: now_ms(),
        payload: value,
    };
    let json = serde_json::to_string(&envelope)?;
    storage.set(key, &json)?;
    log::debug!("Saved {} ({} bytes)", key, json.len());
    Ok(())
}

/// Load the value under `key`. `Ok(None)` when nothing was ever saved.
/// A corrupt primary copy falls back to the backup when one exists.
pub fn load<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    let Some(json) = storage.get(key)? else {
        return Ok(None);
    };

    match decode(&json) {
        Ok(value) => Ok(Some(value)),
        Err(err @ PersistError::VersionMismatch { .. }) => Err(err),
        Err(err) => {
            log::warn!("{} is corrupt ({}), trying backup", key, err);
            match storage.get_backup(key)? {
                Some(backup) => decode(&backup).map(Some).map_err(|_| err),
                None => Err(err),
            }
        }
    }
}

pub fn clear(storage: &mut dyn Storage, key: &str) -> Result<()> {
    storage.remove(key)?;
    log::info!("Cleared {}", key);
    Ok(())
}

fn decode<T: DeserializeOwned>(json: &str) -> Result<T> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(json)?;
    if envelope.version != FORMAT_VERSION {
        return Err(PersistError::VersionMismatch {
            found: envelope.version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(serde_json::from_value(envelope.payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStorage;
    use crate::sim::{GameState, generate_wall};

    #[test]
    fn test_missing_key_is_none() {
        let storage = MemoryStorage::default();
        let loaded: Option<u32> = load(&storage, "nothing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_game_state_survives_save() {
        let mut storage = MemoryStorage::default();
        let mut state = GameState::new(31337);
        generate_wall(&mut state);
        state.score = 4200;
        state.level = 3;

        save(&mut storage, SAVE_KEY, &state).unwrap();
        let loaded: GameState = load(&storage, SAVE_KEY).unwrap().unwrap();

        assert_eq!(loaded.score, 4200);
        assert_eq!(loaded.level, 3);
        assert_eq!(loaded.bricks.len(), state.bricks.len());
        assert_eq!(loaded.rng_state.stream, state.rng_state.stream);
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let mut storage = MemoryStorage::default();
        storage
            .set("k", r#"{"version":99,"saved_at":0.0,"payload":5}"#)
            .unwrap();
        let err = load::<u32>(&storage, "k").unwrap_err();
        assert!(matches!(
            err,
            PersistError::VersionMismatch { found: 99, expected: FORMAT_VERSION }
        ));
    }

    #[test]
    fn test_corrupt_data_is_an_error() {
        let mut storage = MemoryStorage::default();
        storage.set("k", "{not json").unwrap();
        assert!(matches!(load::<u32>(&storage, "k"), Err(PersistError::Json(_))));
    }

    #[test]
    fn test_corrupt_primary_falls_back_to_backup() {
        let mut storage = MemoryStorage::default();
        save(&mut storage, "k", &7u32).unwrap();
        // Second write keeps the first as backup, then gets mangled
        save(&mut storage, "k", &8u32).unwrap();
        storage.corrupt("k");
        assert_eq!(load::<u32>(&storage, "k").unwrap(), Some(7));
    }

    #[test]
    fn test_clear() {
        let mut storage = MemoryStorage::default();
        save(&mut storage, "k", &1u32).unwrap();
        clear(&mut storage, "k").unwrap();
        assert_eq!(load::<u32>(&storage, "k").unwrap(), None);
    }
}
