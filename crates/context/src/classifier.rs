//! Foreground application classifier.
//!
//! An exact executable-name lookup wins over everything; otherwise the
//! keyword sets are tried in category priority order.

use crate::category::AppCategory;
use crate::error::ContextResult;
use crate::keywords::KeywordSets;
use crate::state::WindowObservation;
use crate::table::ProcessCategoryTable;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the active process table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingSource {
    BuiltIn,
    File(PathBuf),
}

/// Maps a window observation to an [`AppCategory`].
#[derive(Debug, Clone)]
pub struct AppClassifier {
    table: ProcessCategoryTable,
    keywords: KeywordSets,
    source: MappingSource,
    /// Path used by [`AppClassifier::reload`].
    configured_path: Option<PathBuf>,
}

impl Default for AppClassifier {
    fn default() -> Self {
        Self {
            table: ProcessCategoryTable::builtin(),
            keywords: KeywordSets::builtin(),
            source: MappingSource::BuiltIn,
            configured_path: None,
        }
    }
}

impl AppClassifier {
    /// Classifier with the built-in table and keyword sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier whose table is initialized from `path`.
    ///
    /// Falls back to the built-in table when the file is unusable; use
    /// [`AppClassifier::initialize_mapping`] directly to inspect the error.
    pub fn with_mapping(path: Option<&Path>) -> Self {
        let mut classifier = Self::new();
        if let Err(e) = classifier.initialize_mapping(path) {
            debug!(error = %e, "with_mapping using built-in table");
        }
        classifier
    }

    /// Replace the active process table.
    ///
    /// - `None`: install the built-in table.
    /// - `Some(path)`: use the file verbatim if it yields at least one entry;
    ///   on any failure install the built-in table and return the error.
    ///
    /// The table is always fully replaced; previous entries never survive.
    /// Returns the number of entries now active.
    pub fn initialize_mapping(&mut self, path: Option<&Path>) -> ContextResult<usize> {
        self.configured_path = path.map(Path::to_path_buf);

        let Some(path) = path else {
            self.install_builtin();
            return Ok(self.table.len());
        };

        match ProcessCategoryTable::load(path) {
            Ok(table) => {
                self.table = table;
                self.source = MappingSource::File(path.to_path_buf());
                Ok(self.table.len())
            }
            Err(e) => {
                warn!(error = %e, "category source unusable, falling back to built-in table");
                self.install_builtin();
                Err(e)
            }
        }
    }

    /// Re-read the configured source with the same contract as
    /// [`AppClassifier::initialize_mapping`].
    pub fn reload(&mut self) -> ContextResult<usize> {
        let path = self.configured_path.clone();
        info!(path = ?path, "reloading category table");
        self.initialize_mapping(path.as_deref())
    }

    fn install_builtin(&mut self) {
        self.table = ProcessCategoryTable::builtin();
        self.source = MappingSource::BuiltIn;
    }

    /// Classify one observation. Never fails.
    pub fn classify(&self, observation: &WindowObservation) -> AppCategory {
        let name = observation.executable_name();
        if let Some(category) = self.table.get(&name) {
            return category;
        }

        self.keywords
            .first_match(&observation.match_text())
            .unwrap_or(AppCategory::Unknown)
    }

    /// `Unknown` when no foreground window could be resolved.
    pub fn classify_optional(&self, observation: Option<&WindowObservation>) -> AppCategory {
        observation
            .map(|obs| self.classify(obs))
            .unwrap_or(AppCategory::Unknown)
    }

    pub fn table(&self) -> &ProcessCategoryTable {
        &self.table
    }

    pub fn source(&self) -> &MappingSource {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContextError;
    use std::io::Write;

    fn obs(process: &str, title: &str) -> WindowObservation {
        WindowObservation::new(process, title)
    }

    fn source_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_exact_match_beats_keywords() {
        let classifier = AppClassifier::new();
        let category = classifier.classify(&obs("chrome.exe", "Best game ever - YouTube"));
        assert_eq!(category, AppCategory::Browser);
    }

    #[test]
    fn test_exact_match_with_path_and_case() {
        let classifier = AppClassifier::new();
        let category = classifier.classify(&obs(r"D:\Tools\VLC\VLC.EXE", ""));
        assert_eq!(category, AppCategory::Video);
    }

    #[test]
    fn test_keyword_fallback_priority() {
        let classifier = AppClassifier::new();
        let category = classifier.classify(&obs("foo.exe", "Game trailer movie"));
        assert_eq!(category, AppCategory::Game);
    }

    #[test]
    fn test_keyword_in_process_name() {
        let classifier = AppClassifier::new();
        let category = classifier.classify(&obs("Spotify Premium", ""));
        assert_eq!(category, AppCategory::Music);
    }

    #[test]
    fn test_unknown_when_nothing_matches() {
        let classifier = AppClassifier::new();
        assert_eq!(classifier.classify(&obs("xyz.exe", "qqq")), AppCategory::Unknown);
    }

    #[test]
    fn test_absent_observation_is_unknown() {
        let classifier = AppClassifier::new();
        assert_eq!(classifier.classify_optional(None), AppCategory::Unknown);
    }

    #[test]
    fn test_initialize_without_path_uses_builtin() {
        let mut classifier = AppClassifier::new();
        let count = classifier.initialize_mapping(None).unwrap();
        assert_eq!(count, ProcessCategoryTable::builtin().len());
        assert_eq!(classifier.source(), &MappingSource::BuiltIn);
    }

    #[test]
    fn test_with_mapping_missing_file_uses_builtin() {
        let path = Path::new("/definitely/not/here.txt");
        let classifier = AppClassifier::with_mapping(Some(path));

        assert_eq!(classifier.source(), &MappingSource::BuiltIn);
        assert_eq!(
            classifier.classify(&WindowObservation::new("chrome.exe", "")),
            AppCategory::Browser
        );
    }

    #[test]
    fn test_file_replaces_builtin_table() {
        let file = source_file("foo.exe=music\n");
        let mut classifier = AppClassifier::new();

        let count = classifier.initialize_mapping(Some(file.path())).unwrap();
        assert_eq!(count, 1);
        assert_eq!(classifier.table().get("foo.exe"), Some(AppCategory::Music));
        // Not merged: chrome.exe falls back to keywords ("chrome")
        assert_eq!(classifier.table().get("chrome.exe"), None);
        assert_eq!(
            classifier.classify(&obs("chrome.exe", "")),
            AppCategory::Browser
        );
    }

    #[test]
    fn test_empty_file_falls_back_to_builtin() {
        let file = source_file("# only a comment\nnot a mapping\n");
        let mut classifier = AppClassifier::new();

        let err = classifier.initialize_mapping(Some(file.path())).unwrap_err();
        assert!(matches!(err, ContextError::NoValidEntries { .. }));
        assert_eq!(classifier.source(), &MappingSource::BuiltIn);
        assert_eq!(classifier.table(), &ProcessCategoryTable::builtin());
    }

    #[test]
    fn test_reload_failure_drops_stale_entries() {
        let mut file = source_file("custom.exe=creative\n");
        let mut classifier = AppClassifier::new();
        classifier.initialize_mapping(Some(file.path())).unwrap();
        assert_eq!(
            classifier.classify(&obs("custom.exe", "")),
            AppCategory::Creative
        );

        // Truncate the source so the reload yields nothing usable
        file.as_file_mut().set_len(0).unwrap();
        assert!(classifier.reload().is_err());

        assert_eq!(classifier.table().get("custom.exe"), None);
        assert_eq!(classifier.table(), &ProcessCategoryTable::builtin());
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let mut file = source_file("a.exe=game\n");
        let mut classifier = AppClassifier::new();
        classifier.initialize_mapping(Some(file.path())).unwrap();

        file.as_file_mut().set_len(0).unwrap();
        std::fs::write(file.path(), "a.exe=document\nb.exe=video\n").unwrap();

        assert_eq!(classifier.reload().unwrap(), 2);
        assert_eq!(classifier.table().get("a.exe"), Some(AppCategory::Document));
    }
}
