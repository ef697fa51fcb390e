use crossterm::{
    cursor,
    event::{
        self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{self, Color},
    terminal,
};
use lifecanvas::{CellPos, CellSize, Driver};
use std::{
    io::{self, Write},
    time::Duration,
};

const ALIVE: &str = "█";
const PREVIEW_DEAD: &str = "░";
const PREVIEW_ALIVE: &str = "▓";
const HELP: &str = "[s]tart [p]ause [n]ext [c]lear [r]andom [q]uit";

pub enum ConsoleCommand {
    Exit,
    Start,
    Pause,
    TogglePause,
    Step,
    Clear,
    Randomize,
    Press { x: i32, y: i32 },
    Drag { x: i32, y: i32 },
    Release,
    Hover { x: i32, y: i32 },
    Leave,
    Redraw,
    Handled,
}

pub struct ConsoleRender {
    cell_size: CellSize,
    gens_per_sec: f64,
}
impl ConsoleRender {
    pub fn new(cell_size: CellSize) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let setup = execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            event::EnableFocusChange,
            cursor::Hide
        );
        // `Drop` only runs once `Self` exists, so undo raw mode here
        undo_on_err(setup, || {
            let _ = terminal::disable_raw_mode();
        })?;
        Ok(Self {
            cell_size,
            gens_per_sec: 0.0,
        })
    }

    /// Queues `glyph` over every terminal position covered by `cell`
    ///
    /// Anything past the right edge or onto the footer row is clipped.
    fn paint_cell<W: Write>(
        &self,
        out: &mut W,
        cell: CellPos,
        glyph: &str,
        color: Color,
        (cols, rows): (u16, u16),
    ) -> io::Result<()> {
        let CellSize { width, height } = self.cell_size;
        if cell.row < 0 || cell.col < 0 {
            return Ok(());
        }
        let x = cell.col as i64 * width as i64;
        if x >= cols as i64 {
            return Ok(());
        }
        let visible = (width as i64).min(cols as i64 - x) as usize;
        let run = glyph.repeat(visible);
        queue!(out, style::SetForegroundColor(color))?;
        for dy in 0..height as i64 {
            let y = cell.row as i64 * height as i64 + dy;
            if y >= rows.saturating_sub(1) as i64 {
                break;
            }
            queue!(out, cursor::MoveTo(x as u16, y as u16), style::Print(&run))?;
        }
        queue!(out, style::ResetColor)
    }

    pub fn render(&self, driver: &Driver, preview: Option<CellPos>) -> io::Result<()> {
        let size = terminal::size()?;
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;

        let grid = driver.grid();
        for cell in grid.iter_alive() {
            self.paint_cell(&mut stdout, cell, ALIVE, Color::Reset, size)?;
        }
        if let Some(cell) = preview {
            let (glyph, color) = if grid.get(cell).is_alive() {
                (PREVIEW_ALIVE, Color::Yellow)
            } else {
                (PREVIEW_DEAD, Color::DarkGrey)
            };
            self.paint_cell(&mut stdout, cell, glyph, color, size)?;
        }

        // write footer
        let state = if driver.is_running() {
            "running"
        } else {
            "stopped"
        };
        let footer = format!(
            "{} gen:{} alive:{} | {:.02}gen/s | {}",
            state,
            driver.generation(),
            driver.population(),
            self.gens_per_sec,
            HELP
        );
        let footer: String = footer.chars().take(size.0 as usize).collect();
        queue!(
            stdout,
            cursor::MoveTo(0, size.1.saturating_sub(1)),
            style::Print(footer)
        )?;

        stdout.flush()
    }

    pub fn poll_events(&mut self, timeout: Duration) -> io::Result<Option<ConsoleCommand>> {
        // make sure an event is present for us to take
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let cmd = match event::read()? {
            // CTRL+C
            event::Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }) => ConsoleCommand::Exit,
            event::Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => ConsoleCommand::Exit,
                KeyCode::Char('s') => ConsoleCommand::Start,
                KeyCode::Char('p') => ConsoleCommand::Pause,
                KeyCode::Char(' ') => ConsoleCommand::TogglePause,
                KeyCode::Char('n') => ConsoleCommand::Step,
                KeyCode::Char('c') => ConsoleCommand::Clear,
                KeyCode::Char('r') => ConsoleCommand::Randomize,
                _ => ConsoleCommand::Handled,
            },
            event::Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => {
                let (x, y) = (column as i32, row as i32);
                match kind {
                    MouseEventKind::Down(MouseButton::Left) => ConsoleCommand::Press { x, y },
                    MouseEventKind::Drag(MouseButton::Left) => ConsoleCommand::Drag { x, y },
                    MouseEventKind::Up(MouseButton::Left) => ConsoleCommand::Release,
                    MouseEventKind::Moved => ConsoleCommand::Hover { x, y },
                    _ => ConsoleCommand::Handled,
                }
            }
            event::Event::FocusLost => ConsoleCommand::Leave,
            event::Event::Resize(..) => ConsoleCommand::Redraw,
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(cmd))
    }

    pub fn set_rate(&mut self, gens_per_sec: f64) {
        self.gens_per_sec = gens_per_sec;
    }
}

/// Runs `undo` when `result` is an error, then passes `result` through
fn undo_on_err<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        // if we can enable it, we should be able to disable it
        terminal::disable_raw_mode().expect("disable raw mode");
        execute!(
            io::stdout(),
            cursor::Show,
            event::DisableMouseCapture,
            event::DisableFocusChange,
            terminal::LeaveAlternateScreen
        )
        .expect("restore terminal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_runs_on_failed_setup() {
        let mut undone = false;

        let failed: io::Result<()> = Err(io::Error::other("no tty"));
        let result = undo_on_err(failed, || undone = true);

        assert!(result.is_err());
        assert!(undone);
    }

    #[test]
    fn undo_skipped_on_success() {
        let mut undone = false;

        let result = undo_on_err(Ok(3), || undone = true);

        assert_eq!(result.unwrap(), 3);
        assert!(!undone);
    }
}
