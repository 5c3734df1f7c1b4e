use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::types::{PlaybackHandle, PlaybackInfo};

#[test]
fn playback_info_defaults_to_stopped() {
    let info = PlaybackInfo::default();
    assert!(info.path.is_none());
    assert_eq!(info.elapsed, Duration::ZERO);
    assert!(!info.playing);
}

#[test]
fn playback_handle_clones_share_state() {
    let handle: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
    let reader = handle.clone();

    {
        let mut info = handle.lock().unwrap();
        info.path = Some(PathBuf::from("/tmp/song.mp3"));
        info.playing = true;
    }

    let info = reader.lock().unwrap();
    assert_eq!(info.path.as_deref(), Some(std::path::Path::new("/tmp/song.mp3")));
    assert!(info.playing);
}
