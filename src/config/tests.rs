use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_tunegrab_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TUNEGRAB_CONFIG_PATH", "/tmp/tunegrab-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/tunegrab-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("tunegrab")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("tunegrab")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[search]
api_key = "test-key"
endpoint = "http://localhost:9999/search"
max_results = 5
timeout_secs = 3

[fetch]
ytdlp_bin = "/opt/bin/yt-dlp"
audio_format = "opus"
audio_quality = "160K"

[library]
directory = "/tmp/tunes"

[ui]
header_text = "hello"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNEGRAB_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TUNEGRAB__SEARCH__API_KEY");
    let _g3 = EnvGuard::remove("TUNEGRAB__SEARCH__MAX_RESULTS");

    let s = Settings::load().unwrap();
    assert_eq!(s.search.api_key, "test-key");
    assert_eq!(s.search.endpoint, "http://localhost:9999/search");
    assert_eq!(s.search.max_results, 5);
    assert_eq!(s.search.timeout_secs, 3);
    assert_eq!(s.fetch.ytdlp_bin, "/opt/bin/yt-dlp");
    assert_eq!(s.fetch.audio_format, "opus");
    assert_eq!(s.fetch.audio_quality, "160K");
    assert_eq!(s.library.directory, "/tmp/tunes");
    assert_eq!(s.ui.header_text, "hello");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[search]
api_key = "from-file"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNEGRAB_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TUNEGRAB__SEARCH__API_KEY", "from-env");

    let s = Settings::load().unwrap();
    assert_eq!(s.search.api_key, "from-env");
}

#[test]
fn validate_rejects_out_of_range_max_results() {
    let mut s = Settings::default();
    s.search.max_results = 0;
    assert!(s.validate().is_err());

    s.search.max_results = 51;
    assert!(s.validate().is_err());

    s.search.max_results = 50;
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_empty_fetch_settings() {
    let mut s = Settings::default();
    s.fetch.audio_format = "  ".to_string();
    assert!(s.validate().is_err());

    s = Settings::default();
    s.fetch.ytdlp_bin = String::new();
    assert!(s.validate().is_err());
}

#[test]
fn library_directory_resolution_prefers_configured_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let lib = LibrarySettings {
        directory: "/srv/music".to_string(),
    };
    assert_eq!(
        lib.resolve_directory(),
        std::path::PathBuf::from("/srv/music")
    );
}

#[test]
fn library_directory_resolution_falls_back_to_home_downloads() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("HOME", "/tmp/home-dir");

    let lib = LibrarySettings::default();
    assert_eq!(
        lib.resolve_directory(),
        std::path::PathBuf::from("/tmp/home-dir").join("Downloads")
    );
}
