//! Per-session structure class sets

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::CoverError;

/// Where a session came from and how large it was
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub records: usize,
    pub size_bytes: u64,
}

/// Session id to the set of structure signatures found in that session.
///
/// Filled by the structure pass and sealed once that pass is complete; the
/// cover selector only accepts sealed indexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClassIndex {
    pub generated_at: DateTime<Utc>,
    sealed: bool,
    sessions: BTreeMap<String, BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    session_info: BTreeMap<String, SessionInfo>,
}

impl Default for SessionClassIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionClassIndex {
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            sealed: false,
            sessions: BTreeMap::new(),
            session_info: BTreeMap::new(),
        }
    }

    /// Build and seal an index from a complete session map
    pub fn from_sessions<I, S>(sessions: I) -> Self
    where
        I: IntoIterator<Item = (S, BTreeSet<String>)>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for (id, classes) in sessions {
            let id = id.into();
            if !classes.is_empty() {
                index.sessions.insert(id, classes);
            }
        }
        index.seal();
        index
    }

    /// Record the classes of one session.
    ///
    /// Sessions without any class are not recorded; returns whether the
    /// session was added.
    pub fn insert(
        &mut self,
        session_id: impl Into<String>,
        classes: BTreeSet<String>,
    ) -> Result<bool, CoverError> {
        self.insert_with_info(session_id, classes, None)
    }

    pub fn insert_with_info(
        &mut self,
        session_id: impl Into<String>,
        classes: BTreeSet<String>,
        info: Option<SessionInfo>,
    ) -> Result<bool, CoverError> {
        let session_id = session_id.into();
        if self.sealed {
            return Err(CoverError::IndexSealed(session_id));
        }
        if classes.is_empty() {
            debug!(session = %session_id, "Session has no object classes; not indexed");
            return Ok(false);
        }
        if let Some(info) = info {
            self.session_info.insert(session_id.clone(), info);
        }
        self.sessions.insert(session_id, classes);
        Ok(true)
    }

    /// Mark the structure pass complete
    pub fn seal(&mut self) {
        self.sealed = true;
        self.generated_at = Utc::now();
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.sessions
    }

    pub fn classes_of(&self, session_id: &str) -> Option<&BTreeSet<String>> {
        self.sessions.get(session_id)
    }

    pub fn info(&self, session_id: &str) -> Option<&SessionInfo> {
        self.session_info.get(session_id)
    }

    /// Union of all class sets
    pub fn all_classes(&self) -> BTreeSet<String> {
        self.sessions.values().flatten().cloned().collect()
    }

    /// Number of sessions each class appears in
    pub fn class_frequencies(&self) -> BTreeMap<&str, usize> {
        let mut frequencies = BTreeMap::new();
        for classes in self.sessions.values() {
            for class in classes {
                *frequencies.entry(class.as_str()).or_insert(0) += 1;
            }
        }
        frequencies
    }

    /// Keep only the first `max` sessions in id order (0 keeps all)
    pub fn limited(&self, max: usize) -> SessionClassIndex {
        if max == 0 || max >= self.sessions.len() {
            return self.clone();
        }
        let sessions: BTreeMap<String, BTreeSet<String>> = self
            .sessions
            .iter()
            .take(max)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let session_info = self
            .session_info
            .iter()
            .filter(|(k, _)| sessions.contains_key(*k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        SessionClassIndex {
            generated_at: self.generated_at,
            sealed: self.sealed,
            sessions,
            session_info,
        }
    }

    /// Write the index as JSON or YAML depending on the extension
    pub fn save(&self, path: &Path) -> Result<(), CoverError> {
        let content = match extension(path).as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::to_string(self)?,
            Some("json") | None => serde_json::to_string_pretty(self)?,
            Some(_) => return Err(CoverError::UnsupportedFormat(path.to_path_buf())),
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load an index written by [`SessionClassIndex::save`]
    pub fn load(path: &Path) -> Result<Self, CoverError> {
        if !path.exists() {
            return Err(CoverError::MissingArtifact(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let index = match extension(path).as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") | None => serde_json::from_str(&content)?,
            Some(_) => return Err(CoverError::UnsupportedFormat(path.to_path_buf())),
        };
        Ok(index)
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
