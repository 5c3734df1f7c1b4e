use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;
use crate::fetch::{FetchConverter, FetchedTrack};
use crate::library::LibraryStore;
use crate::search::{SearchClient, SearchResult, parse_video_ref};
use crate::session::Session;
use crate::ui;

/// Main terminal event loop: handles input, UI drawing and the
/// search/fetch/persist workflow. Returns `Ok(())` when shutdown is
/// requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    session: &mut Session,
    search_client: &SearchClient,
    fetcher: &FetchConverter,
    library: &mut LibraryStore,
    audio_player: &AudioPlayer,
) -> Result<(), Box<dyn std::error::Error>> {
    let playback = audio_player.playback_handle();
    let library_dir: PathBuf = library.directory().to_path_buf();

    loop {
        terminal.draw(|f| ui::draw(f, session, &playback, &library_dir, &settings.ui))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Windows terminals emit both Press and Release events.
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if session.query_mode {
            match key.code {
                KeyCode::Esc => {
                    session.exit_query_mode();
                }
                KeyCode::Backspace => {
                    session.pop_query_char();
                }
                KeyCode::Enter => {
                    session.exit_query_mode();
                    let query = session.query.trim().to_string();
                    if query.is_empty() {
                        continue;
                    }

                    // Dropping a fresh search always abandons the current track.
                    let _ = audio_player.send(AudioCmd::Stop);
                    if let Some(track) = session.discard_track() {
                        cleanup_track(&track);
                    }

                    if let Some(id) = parse_video_ref(&query) {
                        // Pasted watch URL: skip the search round-trip.
                        session.select(SearchResult {
                            id: id.clone(),
                            title: query.clone(),
                            thumbnail_url: format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg"),
                            channel: None,
                        });
                        session.last_query = Some(query);
                        continue;
                    }

                    if !session.begin_search(&query) {
                        continue;
                    }
                    // The request blocks; show the Searching state first.
                    terminal
                        .draw(|f| ui::draw(f, session, &playback, &library_dir, &settings.ui))?;
                    match search_client.search(&query) {
                        Ok(results) => session.search_done(results),
                        Err(e) => session.search_failed(e.to_string()),
                    }
                }
                KeyCode::Char(c) => {
                    // Keep it simple: accept printable characters only.
                    if !c.is_control() {
                        session.push_query_char(c);
                    }
                }
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Char('q') => {
                    let _ = audio_player.send(AudioCmd::Stop);
                    if let Some(track) = session.reset() {
                        cleanup_track(&track);
                    }
                    break;
                }
                KeyCode::Char('/') => {
                    session.query.clear();
                    session.enter_query_mode();
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    session.cursor_next();
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    session.cursor_prev();
                }
                KeyCode::Enter => {
                    if !session.has_results() {
                        continue;
                    }
                    // Picking a result abandons the current track, like a
                    // fresh search does.
                    let _ = audio_player.send(AudioCmd::Stop);
                    if let Some(track) = session.discard_track() {
                        cleanup_track(&track);
                    }
                    session.select_under_cursor();
                }
                KeyCode::Char('f') => {
                    let Some(selected) = session.selected.clone() else {
                        continue;
                    };
                    if !session.begin_fetch() {
                        continue;
                    }
                    // The download blocks; show the Fetching state first.
                    terminal
                        .draw(|f| ui::draw(f, session, &playback, &library_dir, &settings.ui))?;
                    match fetcher.fetch(&selected.id, &selected.title) {
                        Ok(track) => session.fetch_succeeded(track),
                        Err(e) => session.fetch_failed(e.to_string()),
                    }
                }
                KeyCode::Char('p') | KeyCode::Char(' ') => {
                    let Some(track) = session.active_track() else {
                        continue;
                    };
                    let loaded = playback
                        .lock()
                        .ok()
                        .is_some_and(|info| info.path.as_deref() == Some(&track.local_path));
                    if loaded {
                        let _ = audio_player.send(AudioCmd::TogglePause);
                    } else {
                        let _ = audio_player.send(AudioCmd::Play(track.local_path.clone()));
                    }
                }
                KeyCode::Char('s') => {
                    let _ = audio_player.send(AudioCmd::Stop);
                }
                KeyCode::Char('w') => {
                    let Some(track) = session.active_track() else {
                        continue;
                    };
                    if session.last_persisted.as_deref() == Some(track.local_path.as_path()) {
                        // Already saved; nothing to move.
                        continue;
                    }
                    // The decoder may still hold the temp file open.
                    let _ = audio_player.send(AudioCmd::Stop);
                    match library.persist(track) {
                        Ok(path) => session.persist_done(path),
                        Err(e) => session.persist_failed(e.to_string()),
                    }
                }
                KeyCode::Char('d') => {
                    let _ = audio_player.send(AudioCmd::Stop);
                    if let Some(track) = session.discard_track() {
                        cleanup_track(&track);
                    }
                }
                KeyCode::Esc => {
                    let _ = audio_player.send(AudioCmd::Stop);
                    if let Some(track) = session.reset() {
                        cleanup_track(&track);
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Remove a discarded track's working directory. Only directories created by
/// the fetch step carry the `tunegrab-` prefix; a file already moved into the
/// library lives elsewhere and must not be touched.
fn cleanup_track(track: &FetchedTrack) {
    let Some(parent) = track.local_path.parent() else {
        return;
    };
    let is_work_dir = parent
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("tunegrab-"));
    if is_work_dir {
        let _ = std::fs::remove_dir_all(parent);
    }
}
