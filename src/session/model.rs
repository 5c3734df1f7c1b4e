use std::path::PathBuf;

use crate::fetch::FetchedTrack;
use crate::search::SearchResult;

/// Where the workflow currently stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    Selected,
    Fetching,
    Ready,
    Failed,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// One user's interaction state, reset on navigation.
///
/// `active_track` is private on purpose: it can only become `Some` through
/// `fetch_succeeded`, which is the only place `Ready` is entered, keeping
/// the "active track implies Ready" invariant in one spot.
#[derive(Default)]
pub struct Session {
    pub phase: Phase,
    pub results: Vec<SearchResult>,
    pub selected: Option<SearchResult>,
    active_track: Option<FetchedTrack>,

    /// Highlighted row in the results list.
    pub cursor: usize,
    /// The query the results belong to; `None` until the first search.
    pub last_query: Option<String>,
    /// Query text being edited, and whether the query box has focus.
    pub query: String,
    pub query_mode: bool,

    pub error: Option<String>,
    pub last_persisted: Option<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_track(&self) -> Option<&FetchedTrack> {
        self.active_track.as_ref()
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Start a search. Refused while a fetch is running or while a track is
    /// still active (the caller discards it first); otherwise the session
    /// may be in any phase; searching again from `Ready` or `Failed` is
    /// the "back to search" path.
    pub fn begin_search(&mut self, query: &str) -> bool {
        if self.phase == Phase::Fetching || self.active_track.is_some() {
            return false;
        }
        self.selected = None;
        self.error = None;
        self.last_query = Some(query.trim().to_string());
        self.phase = Phase::Searching;
        true
    }

    /// Record the (possibly empty) results of a completed search.
    pub fn search_done(&mut self, results: Vec<SearchResult>) {
        if self.phase != Phase::Searching {
            return;
        }
        self.results = results;
        self.cursor = 0;
        self.phase = Phase::Idle;
    }

    /// A failed search surfaces its message and drops back to `Idle` so the
    /// user can retry immediately.
    pub fn search_failed(&mut self, message: String) {
        self.results.clear();
        self.cursor = 0;
        self.error = Some(message);
        self.phase = Phase::Idle;
    }

    /// Select the result under the cursor.
    pub fn select_under_cursor(&mut self) -> bool {
        let Some(result) = self.results.get(self.cursor).cloned() else {
            return false;
        };
        self.select(result)
    }

    /// Bind `result` as the selected video. Used both for list picks and for
    /// directly pasted watch URLs. Refused while a fetch is running or while
    /// a track is still active (the caller discards it first), so an active
    /// track can never be carried into `Selected`.
    pub fn select(&mut self, result: SearchResult) -> bool {
        if self.phase == Phase::Fetching || self.active_track.is_some() {
            return false;
        }
        self.selected = Some(result);
        self.error = None;
        self.phase = Phase::Selected;
        true
    }

    /// Enter the `Fetching` phase. Returns false (a no-op, nothing queued)
    /// when a fetch is already in flight, when nothing is selected, or when
    /// a track is still active (the caller discards it first).
    pub fn begin_fetch(&mut self) -> bool {
        if self.phase == Phase::Fetching || self.selected.is_none() || self.active_track.is_some()
        {
            return false;
        }
        self.error = None;
        self.phase = Phase::Fetching;
        true
    }

    pub fn fetch_succeeded(&mut self, track: FetchedTrack) {
        if self.phase != Phase::Fetching {
            return;
        }
        self.active_track = Some(track);
        self.phase = Phase::Ready;
    }

    /// A failed fetch keeps `selected` so the user can retry or pick
    /// another result.
    pub fn fetch_failed(&mut self, message: String) {
        if self.phase != Phase::Fetching {
            return;
        }
        self.error = Some(message);
        self.phase = Phase::Failed;
    }

    /// A successful persist does not change phase; the track remains active
    /// and playable from its new home.
    pub fn persist_done(&mut self, path: PathBuf) {
        if let Some(track) = self.active_track.as_mut() {
            track.local_path = path.clone();
        }
        self.error = None;
        self.last_persisted = Some(path);
    }

    /// A failed persist keeps everything as it was; the temporary file is
    /// untouched and the move can be retried.
    pub fn persist_failed(&mut self, message: String) {
        self.error = Some(message);
    }

    /// Drop the active track, returning it for cleanup. `Ready` falls back
    /// to `Selected` so the same video can be fetched again.
    pub fn discard_track(&mut self) -> Option<FetchedTrack> {
        let dropped = self.active_track.take();
        if self.phase == Phase::Ready {
            self.phase = Phase::Selected;
        }
        dropped
    }

    /// Back to a blank `Idle` session ("back to search"). Returns the
    /// dropped track, if any, for cleanup. Refused mid-fetch.
    pub fn reset(&mut self) -> Option<FetchedTrack> {
        if self.phase == Phase::Fetching {
            return None;
        }
        let dropped = self.active_track.take();
        self.selected = None;
        self.error = None;
        self.last_persisted = None;
        self.phase = Phase::Idle;
        dropped
    }

    pub fn cursor_next(&mut self) {
        if !self.results.is_empty() {
            self.cursor = (self.cursor + 1) % self.results.len();
        }
    }

    pub fn cursor_prev(&mut self) {
        if !self.results.is_empty() {
            self.cursor = if self.cursor == 0 {
                self.results.len() - 1
            } else {
                self.cursor - 1
            };
        }
    }

    /// Give the query box focus.
    pub fn enter_query_mode(&mut self) {
        self.query_mode = true;
    }

    pub fn exit_query_mode(&mut self) {
        self.query_mode = false;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
    }
}
