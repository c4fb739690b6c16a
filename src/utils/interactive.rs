use crate::utils::error::{AppError, AppResult};
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{self, ClearType},
};
use std::io::{self, Write};

pub fn prompt_input(prompt: &str) -> AppResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_string())
}

pub fn prompt_yes_no(prompt: &str) -> AppResult<bool> {
    loop {
        let input = prompt_input(&format!("{} [y/N]: ", prompt))?;
        match input.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "" => return Ok(false),
            _ => println!("Please enter 'y' or 'n'"),
        }
    }
}

fn terminal_error(e: io::Error) -> AppError {
    AppError::Terminal(e.to_string())
}

/// Raw mode plus the alternate screen for as long as the guard lives
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> AppResult<Self> {
        terminal::enable_raw_mode().map_err(terminal_error)?;
        let guard = TerminalGuard;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide).map_err(terminal_error)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// (columns, rows), falling back to 100x30 when there is no terminal
pub fn screen_size() -> (usize, usize) {
    terminal::size()
        .map(|(w, h)| (usize::from(w), usize::from(h)))
        .unwrap_or((100, 30))
}

/// Redraw the whole screen, one line per row
pub fn draw_frame(out: &mut impl Write, lines: &[String]) -> AppResult<()> {
    queue!(out, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All)).map_err(terminal_error)?;
    for (row, line) in lines.iter().enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(out, cursor::MoveTo(0, row), Print(line)).map_err(terminal_error)?;
    }
    out.flush().map_err(terminal_error)?;
    Ok(())
}

/// Next input that matters to the screen: a key press, or `None` after a resize
pub fn read_key() -> AppResult<Option<KeyEvent>> {
    loop {
        match event::read().map_err(terminal_error)? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
            Event::Resize(_, _) => return Ok(None),
            _ => {}
        }
    }
}
