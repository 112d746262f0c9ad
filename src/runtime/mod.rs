use std::io::{self, Stdout};

use clap::Parser;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::cli::Cli;
use crate::config;
use crate::library::{SortKey, SortOrder, expand_paths};

mod event_loop;
mod logging;

pub(crate) type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = config::Settings::load_or_default();

    match logging::init_logger(&settings.logging) {
        Ok(Some(path)) => log::info!("logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("stitchee: failed to start logging: {e}"),
    }

    let items = expand_paths(&cli.paths, &settings.library);
    log::info!("starting with {} item(s)", items.len());
    let mut app = App::new(items);

    let initial_sort = match cli.sort {
        Some(arg) => {
            let order = if cli.descending {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            Some((SortKey::from(arg), order))
        }
        None => settings.ui.initial_sort.map(|key| {
            let order = if settings.ui.initial_descending {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            (SortKey::from(key), order)
        }),
    };
    if let Some((key, order)) = initial_sort {
        app.apply_sort(key, order);
    }

    if let Some(dest) = cli.print_command.as_deref() {
        match app.concat_plan(dest, &settings.concat) {
            Ok(plan) if cli.script => println!("{}", plan.terminal_script()),
            Ok(plan) => println!("{}", plan.display_command()),
            Err(e) => eprintln!("stitchee: {e}"),
        }
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &mut state)
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

/// Hand the terminal back to the shell while `f` runs, then restore the UI.
pub(crate) fn suspended<T>(terminal: &mut Term, f: impl FnOnce() -> T) -> io::Result<T> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let out = f();

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen, EnableBracketedPaste)?;
    terminal.clear()?;
    Ok(out)
}
