//! Terminal handling for interactive runs.
use crossterm::{ExecutableCommand, terminal};
use std::io;
use std::io::Write;

/// Keeps the terminal in raw mode until dropped.
pub struct RawLock {}

impl Drop for RawLock {
    fn drop(&mut self) {
        // terminal stays in raw mode but no means to repair
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::error!("Error resetting terminal {e}");
        }
    }
}

/// Set terminal to raw in best-effort mode, only log on failure, since it does not work when
/// stdin is not a terminal.
///
/// Raw mode is needed so single key presses reach the keyboard without waiting for Enter and
/// without being echoed.
pub fn set_terminal_raw(mut stdout: impl Write) -> RawLock {
    if let Err(e) =
        terminal::enable_raw_mode().and_then(|()| stdout.execute(terminal::EnableLineWrap))
    {
        tracing::warn!("Could not set terminal to raw mode: {e}");
    }
    RawLock {}
}

/// Writer for a terminal in raw mode, where `\n` only moves the cursor down:
/// every `\n` is written as `\r\n`.
pub struct RawModeWriter<W: Write> {
    inner: W,
}

impl<W: Write> RawModeWriter<W> {
    pub const fn new(inner: W) -> Self {
        Self { inner }
    }
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for RawModeWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for part in buf.split_inclusive(|b| *b == b'\n') {
            if let Some(line) = part.strip_suffix(b"\n") {
                self.inner.write_all(line)?;
                self.inner.write_all(b"\r\n")?;
            } else {
                self.inner.write_all(part)?;
            }
        }
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
