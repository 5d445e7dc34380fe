use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// The ratatui terminal the game draws into.
pub type GameTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Holds the terminal in game mode until dropped.
///
/// Game mode is raw input, a private screen, a hidden cursor and mouse
/// reporting for drag steering.
pub struct TerminalGuard {
    terminal: GameTerminal,
}

impl TerminalGuard {
    /// Switches stdout into game mode. Partial setup is undone on failure.
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        Terminal::new(CrosstermBackend::new(stdout))
            .map(|terminal| Self { terminal })
            .inspect_err(|_| {
                let _ = restore_terminal();
            })
    }

    pub fn terminal(&mut self) -> &mut GameTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Returns stdout to the shell's normal mode. Also called from the panic hook.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, DisableMouseCapture, Show, LeaveAlternateScreen)
}
