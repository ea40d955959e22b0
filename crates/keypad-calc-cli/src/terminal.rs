//! Crossterm front-end: key mapping, screen layout and the event loop

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use keypad_calc::prelude::CalculatorDriver;

use crate::app::TerminalApp;
use crate::error::{CliError, CliResult};

/// How long the loop waits for input before syncing the clock
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Width of one keypad cell, brackets included
const CELL_WIDTH: usize = 6;

/// Terminal input after mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    /// A key name understood by the keypad (`"7"`, `"Enter"`, `"Escape"`...)
    Key(String),
    /// Leave the application
    Quit,
}

/// Maps a crossterm key event to a keypad key name.
///
/// Returns `None` for events the calculator has no use for.
#[must_use]
pub fn map_key(event: KeyEvent) -> Option<KeyInput> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c' | 'q') => Some(KeyInput::Quit),
            _ => None,
        };
    }
    match event.code {
        KeyCode::Char('q') => Some(KeyInput::Quit),
        KeyCode::Char(c) => Some(KeyInput::Key(c.to_string())),
        KeyCode::Enter => Some(KeyInput::Key("Enter".to_string())),
        KeyCode::Esc => Some(KeyInput::Key("Escape".to_string())),
        KeyCode::Backspace => Some(KeyInput::Key("Backspace".to_string())),
        KeyCode::Delete => Some(KeyInput::Key("Delete".to_string())),
        _ => None,
    }
}

/// Lays out the screen as text lines: annotation, display, then the keypad
#[must_use]
pub fn screen_lines(app: &TerminalApp) -> Vec<String> {
    let (rows, cols) = app.keypad().dimensions();
    let width = cols * CELL_WIDTH;

    let mut lines = Vec::with_capacity(rows + 4);
    lines.push(format!("{:>width$}", app.annotation().unwrap_or_default()));
    lines.push(format!("{:>width$}", app.display()));
    lines.push("-".repeat(width));

    for row in 0..rows {
        let mut line = String::new();
        let mut col = 0;
        while col < cols {
            match app.keypad().get_button_at(row, col) {
                Some(button) => {
                    let cell = CELL_WIDTH * button.span - 2;
                    line.push_str(&format!("[{:^cell$}]", button.action.label()));
                    col += button.span;
                }
                None => {
                    line.push_str(&" ".repeat(CELL_WIDTH));
                    col += 1;
                }
            }
        }
        lines.push(line);
    }

    lines.push("q: quit  Esc/Del: clear".to_string());
    lines
}

/// Draws the screen
pub fn draw(out: &mut impl Write, app: &TerminalApp) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    for (row, line) in screen_lines(app).iter().enumerate() {
        queue!(out, MoveTo(0, row as u16), Print(line))?;
    }
    out.flush()
}

/// Runs the interactive loop until the user quits
pub fn run(app: &mut TerminalApp) -> CliResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let result = execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(CliError::from)
        .and_then(|()| event_loop(&mut stdout, app));

    restore(&mut stdout)?;
    result
}

/// Leaves raw mode and the alternate screen, whichever setup step failed
pub fn restore(out: &mut impl Write) -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(out, Show, LeaveAlternateScreen)?;
    raw
}

fn event_loop(out: &mut impl Write, app: &mut TerminalApp) -> CliResult<()> {
    draw(out, app)?;

    while !app.should_quit() {
        let mut dirty = app.tick();

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    Some(KeyInput::Quit) => app.quit(),
                    Some(KeyInput::Key(name)) => {
                        app.press_key(&name);
                        dirty = true;
                    }
                    None => {}
                }
            }
        }

        if dirty {
            draw(out, app)?;
        }
    }

    Ok(())
}
