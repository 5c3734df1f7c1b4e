use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use lofty::prelude::AudioFile;

use crate::config::FetchSettings;
use crate::error::WorkflowError;

/// One fetched-and-converted audio file.
///
/// The file lives in its per-fetch temporary directory until the user
/// persists it into the library or discards it.
#[derive(Debug, Clone)]
pub struct FetchedTrack {
    pub source_id: String,
    pub title: String,
    pub local_path: PathBuf,
    pub format: String,
    pub duration: Option<Duration>,
}

pub struct FetchConverter {
    settings: FetchSettings,
}

impl FetchConverter {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    /// Fetch the best audio stream for `video_id` and transcode it to the
    /// configured format and bitrate.
    ///
    /// On any failure the working directory is torn down, so a failed fetch
    /// never leaves a partially written file behind. No automatic retry; the
    /// caller decides whether to re-invoke.
    pub fn fetch(&self, video_id: &str, title_hint: &str) -> Result<FetchedTrack, WorkflowError> {
        let work_dir = tempfile::Builder::new()
            .prefix("tunegrab-")
            .tempdir()
            .map_err(|e| WorkflowError::Fetch(format!("temp dir: {e}")))?;
        // The file must outlive this call: it is played from here until the
        // user persists or discards it. Cleanup happens at those points.
        let work_dir = work_dir.keep();

        let located = self
            .run_tool(video_id, &work_dir)
            .and_then(|()| locate_single_output(&work_dir, &self.settings.audio_format));

        let local_path = match located {
            Ok(path) => path,
            Err(e) => {
                let _ = fs::remove_dir_all(&work_dir);
                return Err(e);
            }
        };

        // yt-dlp names the file after the video title via the output
        // template, so the stem is the best title source we have.
        let title = local_path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| title_hint.to_string());

        Ok(FetchedTrack {
            source_id: video_id.to_string(),
            title,
            local_path: local_path.clone(),
            format: self.settings.audio_format.clone(),
            duration: probe_duration(&local_path),
        })
    }

    fn run_tool(&self, video_id: &str, work_dir: &Path) -> Result<(), WorkflowError> {
        let template = work_dir.join("%(title)s.%(ext)s");
        let url = format!("https://www.youtube.com/watch?v={video_id}");

        let output = Command::new(&self.settings.ytdlp_bin)
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("--no-playlist")
            .args(["-f", "bestaudio/best"])
            .arg("-x")
            .args(["--audio-format", &self.settings.audio_format])
            .args(["--audio-quality", &self.settings.audio_quality])
            .arg("-o")
            .arg(&template)
            .arg(&url)
            .output()
            .map_err(|e| {
                WorkflowError::Fetch(format!("failed to run {}: {e}", self.settings.ytdlp_bin))
            })?;

        if !output.status.success() {
            return Err(WorkflowError::Fetch(stderr_tail(&output.stderr)));
        }

        Ok(())
    }
}

/// Find the single produced file by extension match.
///
/// Zero matches means the tool failed silently or wrote an unexpected
/// extension; more than one means we refuse to guess which is ours.
pub(crate) fn locate_single_output(dir: &Path, format: &str) -> Result<PathBuf, WorkflowError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| WorkflowError::Fetch(format!("read {}: {e}", dir.display())))?;

    let mut matches: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|s| s.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case(format))
                    .unwrap_or(false)
        })
        .collect();

    match matches.len() {
        0 => Err(WorkflowError::FetchMissing {
            dir: dir.to_path_buf(),
            format: format.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        count => Err(WorkflowError::FetchAmbiguous {
            dir: dir.to_path_buf(),
            format: format.to_string(),
            count,
        }),
    }
}

/// Last few stderr lines, joined; that is where yt-dlp puts the actual error.
pub(crate) fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let mut tail: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .rev()
        .take(3)
        .collect();
    tail.reverse();

    if tail.is_empty() {
        "external tool failed without output".to_string()
    } else {
        tail.join(" | ")
    }
}

fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}
