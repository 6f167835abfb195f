//! Persisted search history.
//!
//! The most recent distinct queries, newest first, stored as a JSON array
//! of strings in a single file. Loading never fails: a missing or
//! unreadable file yields an empty history.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Number of queries kept by default.
pub const DEFAULT_CAPACITY: usize = 5;

/// Most-recent-first list of distinct search queries backed by a file.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    path: PathBuf,
    capacity: usize,
    entries: Vec<String>,
}

impl SearchHistory {
    /// Load history from `path` with [`DEFAULT_CAPACITY`].
    pub fn load(path: impl Into<PathBuf>) -> Self {
        Self::load_with_capacity(path, DEFAULT_CAPACITY)
    }

    /// Load history from `path`, keeping at most `capacity` entries.
    ///
    /// A missing file, an unreadable file, or content that is not a JSON
    /// array of strings all yield an empty history.
    pub fn load_with_capacity(path: impl Into<PathBuf>, capacity: usize) -> Self {
        let path = path.into();
        let mut entries = read_entries(&path);
        entries.truncate(capacity);
        tracing::debug!(count = entries.len(), path = %path.display(), "loaded search history");
        Self {
            path,
            capacity,
            entries,
        }
    }

    /// Record a submitted query.
    ///
    /// The query moves to the front, any earlier identical entry is removed,
    /// and the list is trimmed to capacity before being persisted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::History`] if the file cannot be written.
    pub fn add(&mut self, query: &str) -> Result<()> {
        self.entries.retain(|entry| entry != query);
        self.entries.insert(0, query.to_owned());
        self.entries.truncate(self.capacity);
        self.persist()
    }

    /// Forget every entry and remove the persisted file.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::History`] if the file exists but cannot be removed.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::History(format!(
                "cannot remove {}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entry at `index` (0 = newest).
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::History(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        let content = serde_json::to_string(&self.entries)
            .map_err(|e| AppError::History(e.to_string()))?;
        std::fs::write(&self.path, content)
            .map_err(|e| AppError::History(format!("cannot write {}: {e}", self.path.display())))
    }
}

fn read_entries(path: &Path) -> Vec<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read search history");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<String>>(&content) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed search history");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_history() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("search-history.json");
        (dir, path)
    }

    #[test]
    fn missing_file_loads_empty() {
        let (_dir, path) = temp_history();
        let history = SearchHistory::load(&path);
        assert!(history.is_empty());
        assert_eq!(history.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn malformed_file_loads_empty() {
        let (_dir, path) = temp_history();
        std::fs::write(&path, "{not json").expect("write");
        assert!(SearchHistory::load(&path).is_empty());

        std::fs::write(&path, r#"{"entries":["a"]}"#).expect("write");
        assert!(SearchHistory::load(&path).is_empty());

        std::fs::write(&path, "[1, 2, 3]").expect("write");
        assert!(SearchHistory::load(&path).is_empty());
    }

    #[test]
    fn add_then_reload_puts_query_first() {
        let (_dir, path) = temp_history();
        let mut history = SearchHistory::load(&path);
        history.add("zekât hesaplama").expect("add");
        history.add("islami finans").expect("add");

        let reloaded = SearchHistory::load(&path);
        assert_eq!(reloaded.get(0), Some("islami finans"));
        assert_eq!(reloaded.entries(), history.entries());
    }

    #[test]
    fn sixth_distinct_query_evicts_oldest() {
        let (_dir, path) = temp_history();
        let mut history = SearchHistory::load(&path);
        for query in ["q1", "q2", "q3", "q4", "q5", "q6"] {
            history.add(query).expect("add");
        }

        let reloaded = SearchHistory::load(&path);
        assert_eq!(reloaded.len(), 5);
        assert_eq!(reloaded.entries(), ["q6", "q5", "q4", "q3", "q2"]);
        assert!(!reloaded.entries().iter().any(|e| e == "q1"));
    }

    #[test]
    fn duplicate_moves_to_front() {
        let (_dir, path) = temp_history();
        let mut history = SearchHistory::load(&path);
        for query in ["zekât", "vakıf", "sadaka", "zekât"] {
            history.add(query).expect("add");
        }
        assert_eq!(history.entries(), ["zekât", "sadaka", "vakıf"]);
    }

    #[test]
    fn dedup_is_exact_match_only() {
        let (_dir, path) = temp_history();
        let mut history = SearchHistory::load(&path);
        history.add("Zekât").expect("add");
        history.add("zekât").expect("add");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn clear_empties_and_removes_file() {
        let (_dir, path) = temp_history();
        let mut history = SearchHistory::load(&path);
        history.add("zekât").expect("add");
        assert!(path.exists());

        history.clear().expect("clear");
        assert!(history.is_empty());
        assert!(!path.exists());
        assert!(SearchHistory::load(&path).is_empty());
    }

    #[test]
    fn clear_without_file_is_ok() {
        let (_dir, path) = temp_history();
        let mut history = SearchHistory::load(&path);
        assert!(history.clear().is_ok());
    }

    #[test]
    fn oversized_file_truncated_on_load() {
        let (_dir, path) = temp_history();
        std::fs::write(&path, r#"["a","b","c","d","e","f","g"]"#).expect("write");
        let history = SearchHistory::load(&path);
        assert_eq!(history.entries(), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn persisted_as_json_array() {
        let (_dir, path) = temp_history();
        let mut history = SearchHistory::load(&path);
        history.add("zekât").expect("add");
        let raw = std::fs::read_to_string(&path).expect("read");
        assert_eq!(raw, r#"["zekât"]"#);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a").join("b").join("history.json");
        let mut history = SearchHistory::load(&path);
        history.add("zekât").expect("add");
        assert!(path.exists());
    }
}
