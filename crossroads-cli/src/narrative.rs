//! Narrative texts read from a directory of `<key>.txt` files.
use async_trait::async_trait;
use crossroads_game::{NarrativeError, NarrativeLoader};
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct DirectoryNarrative {
    root: PathBuf,
}

impl DirectoryNarrative {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait(?Send)]
impl NarrativeLoader for DirectoryNarrative {
    async fn load(&self, key: &str) -> Result<String, NarrativeError> {
        let path = self.root.join(format!("{key}.txt"));
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text.trim_end().to_string()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(NarrativeError::NotFound(key.to_string()))
            }
            Err(err) => Err(NarrativeError::Io {
                key: key.to_string(),
                reason: err.to_string(),
            }),
        }
    }
}
