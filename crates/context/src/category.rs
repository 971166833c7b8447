//! Application categories produced by the classifier.

use serde::{Deserialize, Serialize};

/// Semantic category of the foreground application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppCategory {
    /// Games and game launchers.
    Game,

    /// Movie and video players, streaming sites.
    Video,

    /// Music players.
    Music,

    /// Office suites, editors, PDF readers.
    Document,

    /// Web browsers.
    Browser,

    /// IDEs, terminals, developer tooling.
    Development,

    /// Image, video and 3D authoring tools.
    Creative,

    /// Nothing matched, or no foreground window was resolvable.
    #[default]
    Unknown,
}

impl AppCategory {
    /// Order in which keyword sets are tried when no exact table entry exists.
    pub const KEYWORD_PRIORITY: [AppCategory; 7] = [
        AppCategory::Game,
        AppCategory::Video,
        AppCategory::Music,
        AppCategory::Browser,
        AppCategory::Development,
        AppCategory::Creative,
        AppCategory::Document,
    ];

    /// Returns a human-readable label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            AppCategory::Game => "Game",
            AppCategory::Video => "Video",
            AppCategory::Music => "Music",
            AppCategory::Document => "Document",
            AppCategory::Browser => "Browser",
            AppCategory::Development => "Development",
            AppCategory::Creative => "Creative",
            AppCategory::Unknown => "Unknown",
        }
    }

    /// Token used in category source files.
    pub fn token(&self) -> &'static str {
        match self {
            AppCategory::Game => "game",
            AppCategory::Video => "video",
            AppCategory::Music => "music",
            AppCategory::Document => "document",
            AppCategory::Browser => "browser",
            AppCategory::Development => "development",
            AppCategory::Creative => "creative",
            AppCategory::Unknown => "unknown",
        }
    }

    /// Parse a category source token, ignoring ASCII case.
    ///
    /// `unknown` is not a valid token: a mapping can only assign a real category.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::KEYWORD_PRIORITY
            .into_iter()
            .find(|category| category.token().eq_ignore_ascii_case(token))
    }
}

impl std::fmt::Display for AppCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_is_case_insensitive() {
        assert_eq!(AppCategory::from_token("game"), Some(AppCategory::Game));
        assert_eq!(AppCategory::from_token("MUSIC"), Some(AppCategory::Music));
        assert_eq!(
            AppCategory::from_token("Development"),
            Some(AppCategory::Development)
        );
    }

    #[test]
    fn test_from_token_rejects_unknown() {
        assert_eq!(AppCategory::from_token("unknown"), None);
        assert_eq!(AppCategory::from_token("games"), None);
        assert_eq!(AppCategory::from_token(""), None);
    }

    #[test]
    fn test_keyword_priority_excludes_unknown() {
        assert!(!AppCategory::KEYWORD_PRIORITY.contains(&AppCategory::Unknown));
        assert_eq!(AppCategory::KEYWORD_PRIORITY[0], AppCategory::Game);
        assert_eq!(AppCategory::KEYWORD_PRIORITY[6], AppCategory::Document);
    }

    #[test]
    fn test_serde_uses_tokens() {
        let json = serde_json::to_string(&AppCategory::Browser).unwrap();
        assert_eq!(json, "\"browser\"");
        let parsed: AppCategory = serde_json::from_str("\"creative\"").unwrap();
        assert_eq!(parsed, AppCategory::Creative);
    }
}
