//! Flavor text shown when an encounter begins.
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::messages;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeError {
    #[error("narrative `{0}` not found")]
    NotFound(String),
    #[error("loading narrative `{key}` failed: {reason}")]
    Io { key: String, reason: String },
}

impl NarrativeError {
    /// Notice appended to the game log when the text is unavailable.
    #[must_use]
    pub const fn notice(&self) -> &'static str {
        match self {
            Self::NotFound(_) => messages::NARRATIVE_NOT_FOUND,
            Self::Io { .. } => messages::NARRATIVE_FAILED,
        }
    }
}

/// Fetches the narrative text for an encounter key (`treasure`, `thief`,
/// `snake`). This is the only suspension point of a choice resolution.
#[async_trait(?Send)]
pub trait NarrativeLoader {
    async fn load(&self, key: &str) -> Result<String, NarrativeError>;
}

#[async_trait(?Send)]
impl<L: NarrativeLoader + ?Sized> NarrativeLoader for &L {
    async fn load(&self, key: &str) -> Result<String, NarrativeError> {
        (**self).load(key).await
    }
}

/// Texts held in memory, keyed by narrative key.
#[derive(Debug, Clone, Default)]
pub struct NarrativeLibrary {
    texts: HashMap<String, String>,
}

impl NarrativeLibrary {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts.insert(key.into(), text.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[async_trait(?Send)]
impl NarrativeLoader for NarrativeLibrary {
    async fn load(&self, key: &str) -> Result<String, NarrativeError> {
        self.texts
            .get(key)
            .cloned()
            .ok_or_else(|| NarrativeError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn library_serves_known_keys() {
        let library = NarrativeLibrary::empty().with_text("snake", "Hiss.");
        assert_eq!(library.load("snake").await.unwrap(), "Hiss.");
        let err = library.load("thief").await.unwrap_err();
        assert_eq!(err, NarrativeError::NotFound("thief".into()));
        assert_eq!(err.notice(), messages::NARRATIVE_NOT_FOUND);
    }

    #[test]
    fn io_errors_use_their_own_notice() {
        let err = NarrativeError::Io {
            key: "treasure".into(),
            reason: "disk on fire".into(),
        };
        assert_eq!(err.notice(), messages::NARRATIVE_FAILED);
        assert!(err.to_string().contains("disk on fire"));
    }
}
