//! Exact process-name to category mapping.
//!
//! Source file format, one mapping per line:
//!
//! ```text
//! # comment
//! chrome.exe = browser
//! vlc.exe=video
//! ```
//!
//! Blank lines and `#` comments are ignored. Lines without `=`, with an
//! empty side, or with an unrecognised category token are skipped. Names
//! are reduced to their last path component, so a name with nothing after
//! its final separator (`dir/=music`) is skipped too.

use crate::category::AppCategory;
use crate::error::{ContextError, ContextResult};
use crate::state::strip_path;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Built-in mapping. Later entries overwrite earlier ones with the same key.
const BUILTIN_MAPPINGS: &[(&str, AppCategory)] = &[
    // Game platforms
    ("steam.exe", AppCategory::Game),
    ("epicgameslauncher.exe", AppCategory::Game),
    ("origin.exe", AppCategory::Game),
    ("battle.net.exe", AppCategory::Game),
    ("riotclientservices.exe", AppCategory::Game),
    // Video players
    ("vlc.exe", AppCategory::Video),
    ("potplayermini64.exe", AppCategory::Video),
    ("potplayermini.exe", AppCategory::Video),
    ("mpc-hc.exe", AppCategory::Video),
    ("kodi.exe", AppCategory::Video),
    // Music players
    ("spotify.exe", AppCategory::Music),
    ("musicbee.exe", AppCategory::Music),
    ("foobar2000.exe", AppCategory::Music),
    ("itunes.exe", AppCategory::Music),
    // Office
    ("winword.exe", AppCategory::Document),
    ("excel.exe", AppCategory::Document),
    ("powerpnt.exe", AppCategory::Document),
    ("outlook.exe", AppCategory::Document),
    ("onenote.exe", AppCategory::Document),
    ("wps.exe", AppCategory::Document),
    ("notepad++.exe", AppCategory::Document),
    ("notepad.exe", AppCategory::Document),
    // Browsers
    ("chrome.exe", AppCategory::Browser),
    ("firefox.exe", AppCategory::Browser),
    ("msedge.exe", AppCategory::Browser),
    ("opera.exe", AppCategory::Browser),
    ("brave.exe", AppCategory::Browser),
    ("vivaldi.exe", AppCategory::Browser),
    ("iexplore.exe", AppCategory::Browser),
    // Development
    ("devenv.exe", AppCategory::Development),
    ("code.exe", AppCategory::Development),
    ("pycharm64.exe", AppCategory::Development),
    ("pycharm.exe", AppCategory::Development),
    ("idea64.exe", AppCategory::Development),
    ("idea.exe", AppCategory::Development),
    ("eclipse.exe", AppCategory::Development),
    ("sublime_text.exe", AppCategory::Development),
    ("cursor.exe", AppCategory::Development),
    ("notepad++.exe", AppCategory::Development),
    // Creative
    ("photoshop.exe", AppCategory::Creative),
    ("illustrator.exe", AppCategory::Creative),
    ("premiere pro.exe", AppCategory::Creative),
    ("afterfx.exe", AppCategory::Creative),
    ("davinci resolve.exe", AppCategory::Creative),
    ("blender.exe", AppCategory::Creative),
];

/// Lower-cased, path-stripped executable name to category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessCategoryTable {
    entries: HashMap<String, AppCategory>,
}

impl ProcessCategoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (name, category) in BUILTIN_MAPPINGS {
            table.insert(name, *category);
        }
        table
    }

    /// Insert or overwrite a mapping. The key is normalized first.
    pub fn insert(&mut self, process_name: &str, category: AppCategory) {
        let key = normalize_key(process_name);
        if !key.is_empty() {
            self.entries.insert(key, category);
        }
    }

    /// Look up an executable name (normalized before lookup).
    pub fn get(&self, process_name: &str) -> Option<AppCategory> {
        self.entries.get(&normalize_key(process_name)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse source text, skipping malformed lines.
    ///
    /// Never fails; an empty result is for the caller to judge.
    pub fn parse(content: &str) -> Self {
        let mut table = Self::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match parse_line(line) {
                Some((name, category)) => table.insert(&name, category),
                None => debug!(line = idx + 1, content = line, "skipping category line"),
            }
        }

        table
    }

    /// Read and parse a category source file.
    ///
    /// Fails when the file cannot be read or yields no valid entry.
    pub fn load(path: &Path) -> ContextResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ContextError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let table = Self::parse(&content);
        if table.is_empty() {
            return Err(ContextError::NoValidEntries {
                path: path.to_path_buf(),
            });
        }

        info!(path = %path.display(), entries = table.len(), "category table loaded");
        Ok(table)
    }
}

fn normalize_key(process_name: &str) -> String {
    strip_path(process_name.trim()).to_lowercase()
}

/// Split `name=category` on the first `=`.
fn parse_line(line: &str) -> Option<(String, AppCategory)> {
    let (name, category) = line.split_once('=')?;
    let name = name.trim();
    let category = category.trim();

    let key = normalize_key(name);
    if key.is_empty() || category.is_empty() {
        return None;
    }

    let category = AppCategory::from_token(category)?;
    Some((key, category))
}
