use std::env;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tunegrab/config.toml` or
/// `~/.config/tunegrab/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TUNEGRAB__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub fetch: FetchSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search: SearchSettings::default(),
            fetch: FetchSettings::default(),
            library: LibrarySettings::default(),
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// YouTube Data API v3 key. There is no default; the app refuses to
    /// start without one. Usually supplied via `TUNEGRAB__SEARCH__API_KEY`.
    pub api_key: String,

    /// Search endpoint base URL. Overridable so tests (or an API-compatible
    /// mirror) can be pointed somewhere else.
    pub endpoint: String,

    /// Cap on returned results per query. The API accepts 1..=50.
    pub max_results: u8,

    /// HTTP timeout for one search round-trip (seconds).
    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://www.googleapis.com/youtube/v3/search".to_string(),
            max_results: 15,
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Name or path of the external downloader binary.
    pub ytdlp_bin: String,

    /// Target audio codec/container, passed to `--audio-format` and used to
    /// recognize the produced file by extension.
    pub audio_format: String,

    /// Target bitrate, passed to `--audio-quality`.
    pub audio_quality: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            ytdlp_bin: "yt-dlp".to_string(),
            audio_format: "mp3".to_string(),
            audio_quality: "192K".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Where persisted tracks land. Empty means `$HOME/Downloads`.
    pub directory: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            directory: String::new(),
        }
    }
}

impl LibrarySettings {
    /// Resolve the destination directory, falling back to the user's
    /// standard downloads location when nothing is configured.
    pub fn resolve_directory(&self) -> PathBuf {
        let configured = self.directory.trim();
        if !configured.is_empty() {
            return PathBuf::from(configured);
        }

        match env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join("Downloads"),
            None => PathBuf::from("Downloads"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top "tunegrab" header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ search it, grab it, play it ~ ".to_string(),
        }
    }
}
