mod api;
mod app;
mod config;
mod error;
mod form;
mod models;
mod session;
mod ui;
mod utils;

use crate::api::TriviaClient;
use crate::app::App;
use crate::config::Config;
use crate::ui::run_app;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{ enable_raw_mode, disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen },
};
use std::{ fs::File, io, sync::{ Arc, Mutex } };
use tui::{ backend::CrosstermBackend, Terminal };

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // The terminal belongs to the UI, so logs only go to a file.
    if let Some(path) = &config.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(config.log_level)
            .init();
    }

    let client = TriviaClient::new(config.request_timeout).context("failed to build HTTP client")?;
    let app = App::new(config.api_url.clone(), Arc::new(client));

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, config.tick_rate);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{:?}", err);
    }

    Ok(())
}
