//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, path::Path, sync::LazyLock, time::Duration};

use crate::audio::PlaybackHandle;
use crate::config::UiSettings;
use crate::session::{Phase, Session};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("/".to_string(), "search".to_string());
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("enter".to_string(), "pick result".to_string());
    map.insert("f".to_string(), "fetch audio".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("s".to_string(), "stop".to_string());
    map.insert("w".to_string(), "save to library".to_string());
    map.insert("d".to_string(), "discard".to_string());
    map.insert("esc".to_string(), "back".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text.
fn controls_text() -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "/", "j/k", "enter", "f", "space/p", "s", "w", "d", "esc", "q",
    ];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn phase_text(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Idle",
        Phase::Searching => "Searching...",
        Phase::Selected => "Picked",
        Phase::Fetching => "Fetching audio...",
        Phase::Ready => "Ready",
        Phase::Failed => "Failed",
    }
}

/// Render the entire UI into the provided `frame` from the session state.
pub fn draw(
    frame: &mut Frame,
    session: &Session,
    playback: &PlaybackHandle,
    library_dir: &Path,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tunegrab ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        parts.push(format!(" {}", phase_text(session.phase)));

        if session.query_mode {
            parts.push(format!("SEARCH: {}_", session.query));
        } else if let Some(q) = session.last_query.as_deref() {
            if !q.is_empty() {
                parts.push(format!("Query: {}", q));
            }
        }

        if let Some(picked) = session.selected.as_ref() {
            parts.push(format!("Picked: {}", picked.title));
        }

        if let Some(track) = session.active_track() {
            let time = match (playback.lock().ok(), track.duration) {
                (Some(info), Some(total)) => {
                    format!(" [{}/{}]", format_mmss(info.elapsed), format_mmss(total))
                }
                (Some(info), None) => format!(" [{}]", format_mmss(info.elapsed)),
                (None, _) => String::new(),
            };
            let state = playback
                .lock()
                .ok()
                .map(|info| if info.playing { "Playing" } else { "Paused" })
                .unwrap_or("Paused");
            parts.push(format!("Track: {}{} {}", track.title, time, state));
        }

        if let Some(saved) = session.last_persisted.as_ref() {
            parts.push(format!("Saved: {}", saved.display()));
        }

        parts.push(format!("Library: {}", library_dir.display()));

        if let Some(err) = session.error.as_deref() {
            parts.push(format!("ERR: {}", err));
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Results list
    if session.has_results() {
        let items: Vec<ListItem> = session
            .results
            .iter()
            .map(|r| {
                let picked = session
                    .selected
                    .as_ref()
                    .is_some_and(|sel| sel.id == r.id);
                let marker = if picked { "\u{25cf} " } else { "" };
                let line = match r.channel.as_deref() {
                    Some(c) if !c.trim().is_empty() => {
                        format!("{}{} - {}", marker, r.title, c.trim())
                    }
                    _ => format!("{}{}", marker, r.title),
                };
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" results "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(session.cursor.min(session.results.len() - 1)));
        frame.render_stateful_widget(list, chunks[2], &mut state);
    } else {
        let hint = match session.last_query.as_deref() {
            Some(q) if !q.is_empty() => format!("no results for \"{}\"", q),
            _ => "press / and type to search".to_string(),
        };
        let empty = Paragraph::new(hint)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" results "));
        frame.render_widget(empty, chunks[2]);
    }

    // Footer
    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}
