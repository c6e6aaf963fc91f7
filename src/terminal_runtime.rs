use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Concrete terminal type used by the terminal sink.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Holds raw mode so single key presses reach the game. Restores the
/// terminal on drop.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Raw mode plus the alternate screen, wrapped around a ratatui terminal.
///
/// Raw mode is held by the inner [`RawModeGuard`]; dropping the session
/// leaves the alternate screen first, then the guard restores cooked mode.
pub struct TerminalSession {
    terminal: AppTerminal,
    _raw_mode: RawModeGuard,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        let raw_mode = RawModeGuard::enable()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| {
            let _ = leave_alternate_screen();
        })?;

        Ok(Self {
            terminal,
            _raw_mode: raw_mode,
        })
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = leave_alternate_screen();
    }
}

fn leave_alternate_screen() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}

/// Leaves raw mode and the alternate screen without a guard at hand.
/// Harmless when neither is active; the panic hook relies on that.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    leave_alternate_screen()
}
