use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, poll, read};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// Providing Keyboard Input independent of an implementation.
pub trait KeyboardInputProvider {
    /// Returns the code of a pending key if there is one, does not block.
    fn check_key(&mut self) -> Option<u16>;
    /// Blocks until a key is available and returns its code.
    ///
    /// # Errors
    /// - reading from the underlying device failed
    /// - [`io::ErrorKind::Interrupted`] if CTRL-C was pressed while waiting
    fn read_key(&mut self) -> io::Result<u16>;
    /// True if CTRL-C was triggered
    fn is_interrupted(&self) -> bool;
}

/// Keyboard of the terminal the emulator runs in, expects the terminal to be in raw mode.
#[derive(Debug, Default)]
pub struct TerminalInputProvider {
    is_interrupted: bool,
}
impl TerminalInputProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            is_interrupted: false,
        }
    }
    /// Maps a key press to its LC-3 key code, `None` for events without one.
    fn key_code(&mut self, event: &Event) -> Option<u16> {
        let key_event = event.as_key_press_event()?;
        if Self::is_ctrl_c(&key_event) {
            self.is_interrupted = true;
            return None;
        }
        match key_event.code {
            KeyCode::Char(c) => u16::try_from(u32::from(c)).ok(),
            KeyCode::Enter => Some(u16::from(b'\n')),
            KeyCode::Tab => Some(u16::from(b'\t')),
            KeyCode::Backspace => Some(0x08),
            KeyCode::Esc => Some(0x1B),
            _ => None,
        }
    }
    fn is_ctrl_c(event: &KeyEvent) -> bool {
        event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL)
    }
}
impl KeyboardInputProvider for TerminalInputProvider {
    fn check_key(&mut self) -> Option<u16> {
        let event = match poll(Duration::from_secs(0)) {
            Ok(true) => read(),
            Ok(false) => return None,
            Err(e) => Err(e),
        };
        match event {
            Ok(event) => self.key_code(&event),
            Err(e) => {
                tracing::warn!("Polling keyboard failed: {e}");
                None
            }
        }
    }
    fn read_key(&mut self) -> io::Result<u16> {
        loop {
            let event = read()?;
            if let Some(key) = self.key_code(&event) {
                return Ok(key);
            }
            if self.is_interrupted {
                return Err(io::Error::new(
                    io::ErrorKind::Interrupted,
                    "CTRL-C while waiting for key",
                ));
            }
        }
    }
    fn is_interrupted(&self) -> bool {
        self.is_interrupted
    }
}

/// Keyboard replaying a fixed sequence of key codes, for deterministic runs.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInputProvider {
    keys: VecDeque<u16>,
}
impl ScriptedInputProvider {
    /// One key per UTF-16 code unit of `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::from_keys(input.encode_utf16())
    }
    #[must_use]
    pub fn from_keys(keys: impl IntoIterator<Item = u16>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
    pub fn push_key(&mut self, key: u16) {
        self.keys.push_back(key);
    }
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}
impl KeyboardInputProvider for ScriptedInputProvider {
    fn check_key(&mut self) -> Option<u16> {
        self.keys.pop_front()
    }
    fn read_key(&mut self) -> io::Result<u16> {
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "scripted keyboard input exhausted",
            )
        })
    }
    fn is_interrupted(&self) -> bool {
        false
    }
}
