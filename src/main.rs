//! Scrawl - a terminal crossword tile game
//!
//! Build words from your rack, lay them on the board, chase the top ten.

mod app;
mod config;
mod game;
mod storage;
mod tui;

use anyhow::Context;
use app::App;
use clap::Parser;
use config::{Args, Config};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use game::{Dictionary, GameSession};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use storage::Storage;
use tracing::{info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tui::Tui;

fn main() -> anyhow::Result<()> {
    let config = Config::try_from(Args::parse())?;
    initialize_logging(config.log_level, &log_path(&config))?;

    let dictionary = Arc::new(Dictionary::load_or_bundled(config.dictionary.as_deref()));
    let storage = open_storage(&config);

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let session = GameSession::new(dictionary, config.players.clone(), config.rack_size, rng);

    let mut app = App::new(session, storage, config.dictionary.clone());
    if config.fresh {
        app.discard_saved_session();
    } else {
        app.resume_saved_session();
    }
    run(&mut app).context("terminal error")?;
    app.save_session();
    info!("Exiting");
    Ok(())
}

fn run(app: &mut App) -> std::io::Result<()> {
    let mut terminal = Tui::new()?;
    terminal.enter()?;

    loop {
        terminal.draw(|frame| tui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            // Only handle key press events (not release)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc => app.quit(),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
                KeyCode::Tab => app.next_field(),
                KeyCode::BackTab => app.prev_field(),
                KeyCode::Enter => app.on_submit(),
                KeyCode::Backspace => app.on_backspace(),
                KeyCode::F(2) => app.on_hint(),
                KeyCode::F(5) => app.on_reset(),
                KeyCode::F(6) => app.on_reload_dictionary(),
                KeyCode::F(9) => app.on_end_game(),
                KeyCode::Char(' ') => app.toggle_direction(),
                KeyCode::Char(c) => app.on_char(c),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}

fn open_storage(config: &Config) -> Option<Storage> {
    let opened = match &config.database {
        Some(path) => Storage::open(path),
        None => Storage::open_default(),
    };
    match opened {
        Ok(storage) => Some(storage),
        Err(err) => {
            warn!(error = %err, "Scores and saved sessions are disabled");
            None
        }
    }
}

fn log_path(config: &Config) -> PathBuf {
    if let Some(path) = &config.log_file {
        return path.clone();
    }
    Storage::data_dir()
        .map(|dir| dir.join("scrawl.log"))
        .unwrap_or_else(|_| PathBuf::from("scrawl.log"))
}

/// Log to a file, since the terminal belongs to the UI.
fn initialize_logging(level: LevelFilter, path: &std::path::Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
    Ok(())
}
