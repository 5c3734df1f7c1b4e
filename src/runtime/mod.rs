use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::AudioPlayer;
use crate::fetch::FetchConverter;
use crate::library::LibraryStore;
use crate::search::SearchClient;
use crate::session::Session;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    startup::check_credentials(&settings)?;

    let search_client = SearchClient::new(settings.search.clone())?;
    let fetcher = FetchConverter::new(settings.fetch.clone());
    let mut library = LibraryStore::new(settings.library.resolve_directory());
    let audio_player = AudioPlayer::new();
    let mut session = Session::new();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        event_loop::run(
            &mut terminal,
            &settings,
            &mut session,
            &search_client,
            &fetcher,
            &mut library,
            &audio_player,
        )
    })();

    audio_player.quit();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
