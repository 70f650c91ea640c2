use std::io;

use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use daybook::{
    app::{AppState, Mode},
    input::{command_mode, command_mode::CommandOutcome, confirm_mode, insert_mode, normal_mode, search_mode},
    storage::{
        config::Config,
        persistence::{KeyValueStore, SqliteStore, load_state, save_state},
    },
    ui::theme::Theme,
};
use crate::tui::{presentation::ui, sample_events::add_sample_events};

pub fn run_tui(config: Config, sample: bool) -> Result<(), io::Error> {
    let mut store = SqliteStore::open(&config.storage.database_path)
        .map_err(|e| io::Error::other(e.to_string()))?;

    let theme = Theme::get_by_name(&config.ui.theme);
    let mut app = load_state(&store, Local::now().date_naive())
        .into_app_state()
        .with_theme(theme);

    if sample {
        add_sample_events(&mut app);
        persist(&mut store, &mut app);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &mut store, &config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    store: &mut S,
    config: &Config,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app, &config.ui))?;

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let outcome = match app.mode {
                Mode::Normal => {
                    if app.show_help {
                        handle_help_keys(key.code, app);
                        CommandOutcome::Continue
                    } else if key.code == KeyCode::Char('q') {
                        CommandOutcome::Quit
                    } else {
                        normal_mode::handle_key(key.code, app);
                        CommandOutcome::Continue
                    }
                }
                Mode::Command => command_mode::handle_key(key.code, app, &config.export.directory),
                Mode::Insert => {
                    insert_mode::handle_key(key.code, app);
                    CommandOutcome::Continue
                }
                Mode::Search => {
                    search_mode::handle_key(key.code, app);
                    CommandOutcome::Continue
                }
                Mode::Confirm => {
                    confirm_mode::handle_key(key.code, app);
                    CommandOutcome::Continue
                }
            };

            if app.take_dirty() {
                persist(store, app);
            }

            if outcome == CommandOutcome::Quit {
                return Ok(());
            }
        }
    }
}

fn persist<S: KeyValueStore>(store: &mut S, app: &mut AppState) {
    if let Err(e) = save_state(store, app) {
        tracing::error!("Failed to persist calendar state: {}", e);
        app.set_error(format!("Could not save changes: {}", e));
    }
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}
