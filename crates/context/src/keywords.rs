//! Keyword heuristics used when a process has no exact table entry.
//!
//! Matching is plain substring containment on the lower-cased
//! `"<executable> <title>"` text. Short keywords like "ps" or "ai" will hit
//! inside unrelated words; the category priority order absorbs most of that.

use crate::category::AppCategory;

/// Keywords that suggest a game or game launcher.
pub const GAME_KEYWORDS: &[&str] = &[
    "steam",
    "epic",
    "origin",
    "battle.net",
    "riot",
    "valorant",
    "league of legends",
    "csgo",
    "counter-strike",
    "dota",
    "apex",
    "fortnite",
    "minecraft",
    "roblox",
    "unity",
    "unreal",
    "game",
    "gaming",
    "play",
    "launcher",
];

/// Keywords that suggest video playback.
pub const VIDEO_KEYWORDS: &[&str] = &[
    "vlc",
    "potplayer",
    "mpc",
    "media player",
    "kodi",
    "plex",
    "netflix",
    "youtube",
    "bilibili",
    "youku",
    "iqiyi",
    "tencent video",
    "disney",
    "hbo",
    "prime video",
    "player",
    "播放器",
    "视频",
    "movie",
    "film",
    "media",
    "streaming",
];

/// Keywords that suggest a music player.
pub const MUSIC_KEYWORDS: &[&str] = &[
    "spotify",
    "music",
    "网易云音乐",
    "qq音乐",
    "酷狗",
    "酷我",
    "foobar",
    "winamp",
    "itunes",
    "apple music",
    "youtube music",
    "soundcloud",
    "musicbee",
    "aimp",
    "audacious",
    "音乐",
    "播放器",
];

/// Keywords that suggest office or document work.
pub const DOCUMENT_KEYWORDS: &[&str] = &[
    "word",
    "excel",
    "powerpoint",
    "outlook",
    "onenote",
    "office",
    "wps",
    "libreoffice",
    "openoffice",
    "notepad",
    "notepad++",
    "wordpad",
    "pdf",
    "adobe reader",
    "foxit",
    "文档",
    "办公",
    "microsoft",
    "writer",
    "calc",
    "impress",
];

/// Keywords that suggest a web browser.
pub const BROWSER_KEYWORDS: &[&str] = &[
    "chrome", "firefox", "edge", "safari", "opera", "brave", "vivaldi", "tor", "browser",
    "浏览器", "iexplore", "msedge",
];

/// Keywords that suggest development tooling.
pub const DEVELOPMENT_KEYWORDS: &[&str] = &[
    "visual studio",
    "vscode",
    "vs code",
    "code.exe",
    "pycharm",
    "intellij",
    "eclipse",
    "android studio",
    "xcode",
    "sublime",
    "atom",
    "vim",
    "emacs",
    "github",
    "gitlab",
    "docker",
    "kubernetes",
    "terminal",
    "powershell",
    "bash",
    "zsh",
    "ide",
    "editor",
    "开发",
    "编程",
    "jetbrains",
    "rider",
    "clion",
    "cursor",
    "devenv",
];

/// Keywords that suggest creative authoring tools.
pub const CREATIVE_KEYWORDS: &[&str] = &[
    "photoshop",
    "illustrator",
    "premiere",
    "after effects",
    "ae",
    "davinci",
    "resolve",
    "final cut",
    "blender",
    "maya",
    "3ds max",
    "cinema 4d",
    "sketch",
    "figma",
    "adobe",
    "creative",
    "创作",
    "剪辑",
    "设计",
    "ps",
    "ai",
    "pr",
    "c4d",
    "unity",
    "unreal",
];

/// Keywords for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    pub category: AppCategory,
    pub keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(category: AppCategory, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            category,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Whether any keyword occurs anywhere in `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

/// Keyword sets kept in the order they are tried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSets {
    sets: Vec<KeywordSet>,
}

impl KeywordSets {
    /// Built-in sets, ordered Game > Video > Music > Browser > Development > Creative > Document.
    pub fn builtin() -> Self {
        let sets = AppCategory::KEYWORD_PRIORITY
            .into_iter()
            .map(|category| KeywordSet::new(category, builtin_keywords(category)))
            .collect();
        Self { sets }
    }

    /// Category of the first set with a hit.
    pub fn first_match(&self, text: &str) -> Option<AppCategory> {
        self.sets
            .iter()
            .find(|set| set.matches(text))
            .map(|set| set.category)
    }

    pub fn sets(&self) -> &[KeywordSet] {
        &self.sets
    }
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_keywords(category: AppCategory) -> &'static [&'static str] {
    match category {
        AppCategory::Game => GAME_KEYWORDS,
        AppCategory::Video => VIDEO_KEYWORDS,
        AppCategory::Music => MUSIC_KEYWORDS,
        AppCategory::Document => DOCUMENT_KEYWORDS,
        AppCategory::Browser => BROWSER_KEYWORDS,
        AppCategory::Development => DEVELOPMENT_KEYWORDS,
        AppCategory::Creative => CREATIVE_KEYWORDS,
        AppCategory::Unknown => &[],
    }
}
