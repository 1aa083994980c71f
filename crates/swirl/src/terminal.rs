//! The terminal the animation plays on.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::{Attribute, ResetColor, SetAttribute},
};
use ratatui::DefaultTerminal;

/// Outcome of waiting between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The wait ran out.
    Timeout,
    /// The user asked to quit.
    Interrupt,
}

/// Reports the current terminal size.
pub trait SizeProvider {
    /// `(cols, rows)`, or `None` when the size cannot be determined.
    fn query(&mut self) -> Option<(u16, u16)>;
}

/// Receives encoded frames and cursor/style control.
pub trait Surface {
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>;
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
    fn reset_style(&mut self) -> io::Result<()>;
}

/// Sleeps between frames, waking early on interrupts.
pub trait SignalSource {
    fn wait(&mut self, timeout: Duration) -> io::Result<Signal>;
}

/// A ratatui terminal in raw mode on the alternate screen.
pub struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    pub fn new(terminal: DefaultTerminal) -> Self {
        Self { terminal }
    }
}

impl SizeProvider for TerminalSession {
    fn query(&mut self) -> Option<(u16, u16)> {
        self.terminal
            .size()
            .ok()
            .map(|size| (size.width, size.height))
    }
}

impl Surface for TerminalSession {
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        let backend = self.terminal.backend_mut();
        backend.write_all(frame)?;
        Write::flush(backend)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            self.terminal.show_cursor()
        } else {
            self.terminal.hide_cursor()
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        self.terminal.clear()
    }

    fn reset_style(&mut self) -> io::Result<()> {
        execute!(
            self.terminal.backend_mut(),
            ResetColor,
            SetAttribute(Attribute::Reset)
        )
    }
}

impl SignalSource for TerminalSession {
    /// Poll crossterm events until `timeout` passes or a quit key arrives.
    fn wait(&mut self, timeout: Duration) -> io::Result<Signal> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(Signal::Timeout);
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && is_interrupt(key) {
                    return Ok(Signal::Interrupt);
                }
            }
        }
    }
}

/// Ctrl-C, `q` or Esc.
fn is_interrupt(key: KeyEvent) -> bool {
    matches!(
        (key.modifiers, key.code),
        (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C'))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys_interrupt() {
        let press = |code, modifiers| KeyEvent::new(code, modifiers);
        assert!(is_interrupt(press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_interrupt(press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_interrupt(press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_interrupt(press(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_interrupt(press(KeyCode::Char('x'), KeyModifiers::CONTROL)));
    }
}
