//! Save file backing the player's key-value store.
use crossroads_game::KeyValueStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("save file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON object of string values, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a save file. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                log::warn!("ignoring malformed save {}: {err}", path.display());
                BTreeMap::new()
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                log::warn!("could not read save {}: {err}", path.display());
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self) -> Result<(), FileStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    type Error = FileStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), value.to_string());
        self.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossroads_game::PlayerState;

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "crossroads-store-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn writes_through_and_reopens() {
        let path = temp_path("roundtrip").join("save.json");
        let mut store = JsonFileStore::open(&path);
        assert!(store.get("health").unwrap().is_none());
        store.set("health", "73").unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("health").unwrap().as_deref(), Some("73"));
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn malformed_file_starts_fresh() {
        let path = temp_path("malformed");
        std::fs::write(&path, "{ not json").unwrap();
        let player = PlayerState::load(JsonFileStore::open(&path));
        assert_eq!(player.health(), 100);
        assert_eq!(player.treasure(), 0);
    }
}
