use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::app::{App, PromptKind};
use crate::concat::ConcatPlan;
use crate::config;
use crate::library::{SortKey, expand_paths, items_from_paths};
use crate::payload::parse_dropped_paths;
use crate::preview;
use crate::ui;

use super::{Term, suspended};

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// What the loop has to do after a key, beyond redrawing.
#[derive(Debug)]
pub enum Action {
    None,
    Quit,
    Preview(Vec<PathBuf>),
    Concat(ConcatPlan),
}

/// Main terminal event loop: handles input, runs external tools with the UI
/// suspended and redraws. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Term,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key_event(key, settings, app, state)
            }
            Event::Paste(text) => {
                handle_paste(&text, app);
                Action::None
            }
            _ => Action::None,
        };

        match action {
            Action::None => {}
            Action::Quit => return Ok(()),
            Action::Preview(paths) => {
                let result = suspended(terminal, || preview::show(&paths, &settings.preview))?;
                if let Err(e) = result {
                    log::error!("{e}");
                    app.set_status(e.to_string());
                }
            }
            Action::Concat(plan) => {
                let result = suspended(terminal, || {
                    let result = plan.run();
                    wait_for_enter();
                    result
                })?;
                match result {
                    Ok(status) if status.success() => {
                        app.set_status(format!("wrote {}", plan.output().display()))
                    }
                    Ok(status) => app.set_status(format!("ffmpeg exited with {status}")),
                    Err(e) => {
                        log::error!("{e}");
                        app.set_status(e.to_string());
                    }
                }
            }
        }
    }
}

fn wait_for_enter() {
    print!("\n[stitchee] press enter to return ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

/// Text pasted into the terminal: part of the answer when a prompt is open,
/// otherwise files dropped onto the window.
pub fn handle_paste(text: &str, app: &mut App) {
    if app.prompt.is_some() {
        let flat: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        app.push_prompt_str(&flat);
        return;
    }
    if app.is_dragging() {
        return;
    }

    let items = items_from_paths(&parse_dropped_paths(text));
    let added = app.add_items(items);
    log::info!("dropped {added} item(s)");
    app.set_status(format!("added {added} item(s)"));
}

/// Path typed into the save prompt, with shell quoting removed and a
/// leading `~` expanded.
fn prompt_path(input: &str) -> Option<PathBuf> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let word = match shell_words::split(input) {
        Ok(words) if words.len() == 1 => words.into_iter().next().unwrap_or_default(),
        _ => input.to_string(),
    };
    match (word.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => Some(PathBuf::from(home).join(rest)),
        _ => Some(PathBuf::from(word)),
    }
}

fn submit_prompt(settings: &config::Settings, app: &mut App) -> Action {
    let Some(prompt) = app.take_prompt() else {
        return Action::None;
    };

    match prompt.kind {
        PromptKind::AddFiles => {
            let paths = parse_dropped_paths(&prompt.input);
            let items = expand_paths(&paths, &settings.library);
            let added = app.add_items(items);
            log::info!("added {added} item(s) from {} path(s)", paths.len());
            app.set_status(format!("added {added} item(s)"));
            Action::None
        }
        PromptKind::SaveAs => {
            let Some(dest) = prompt_path(&prompt.input) else {
                app.set_status("cancelled");
                return Action::None;
            };
            match app.concat_plan(&dest, &settings.concat) {
                Ok(plan) => {
                    log::info!("{}", plan.display_command());
                    Action::Concat(plan)
                }
                Err(e) => {
                    app.set_status(e.to_string());
                    Action::None
                }
            }
        }
    }
}

/// Apply one key press to `app`.
pub fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> Action {
    if app.prompt.is_some() {
        state.pending_gg = false;
        match key.code {
            KeyCode::Esc => {
                app.take_prompt();
                app.set_status("cancelled");
            }
            KeyCode::Backspace => app.pop_prompt_char(),
            KeyCode::Enter => return submit_prompt(settings, app),
            KeyCode::Char(c) if !c.is_control() => app.push_prompt_str(c.encode_utf8(&mut [0; 4])),
            _ => {}
        }
        return Action::None;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    // Shared cursor motion.
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.next();
            return Action::None;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.prev();
            return Action::None;
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.last();
            return Action::None;
        }
        KeyCode::Home => {
            app.first();
            return Action::None;
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.first();
            } else {
                state.pending_gg = true;
            }
            return Action::None;
        }
        _ => {}
    }

    if app.is_dragging() {
        match key.code {
            KeyCode::Enter => match app.drop_at_cursor() {
                Ok(range) => app.set_status(format!("moved {} item(s)", range.len())),
                Err(e) => {
                    log::warn!("drop rejected: {e}");
                    app.set_status(format!("drop rejected: {e}"));
                }
            },
            KeyCode::Esc => {
                app.cancel_drag();
                app.set_status("drag cancelled");
            }
            _ => {}
        }
        return Action::None;
    }

    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('x') => app.toggle_selected(),
        KeyCode::Char('A') => app.select_all(),
        KeyCode::Esc => app.clear_selection(),
        KeyCode::Char('J') => {
            app.shift_selection(true);
        }
        KeyCode::Char('K') => {
            app.shift_selection(false);
        }
        KeyCode::Char('m') => {
            let n = app.begin_drag();
            if n > 0 {
                app.set_status(format!("dragging {n} item(s)"));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let n = app.remove_selected();
            app.set_status(format!("removed {n} item(s)"));
        }
        KeyCode::Char(c @ ('1' | '2' | '3')) => {
            let key = match c {
                '1' => SortKey::Name,
                '2' => SortKey::Date,
                _ => SortKey::Size,
            };
            let (key, order) = app.sort_by(key);
            app.set_status(format!("sorted by {key:?} {}", order.arrow()).to_lowercase());
        }
        KeyCode::Char('a') => app.open_prompt(PromptKind::AddFiles),
        KeyCode::Char('c') => {
            if app.has_items() {
                app.open_prompt(PromptKind::SaveAs);
            } else {
                app.set_status("nothing to concatenate");
            }
        }
        KeyCode::Char(' ') => {
            let paths = app.preview_paths();
            if !paths.is_empty() {
                return Action::Preview(paths);
            }
        }
        _ => {}
    }

    Action::None
}
