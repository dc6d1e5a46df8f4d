//! Display sinks: where a flattened frame ends up.
//!
//! The renderer only talks to the [`DisplaySink`] trait. [`TerminalDisplay`]
//! writes frames to a terminal through crossterm; [`RecordingDisplay`] keeps
//! them in memory for tests and headless runs.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
    QueueableCommand,
};

use crate::render::framebuffer::TERMINATOR;

/// Output side of the pipeline.
///
/// `present` receives a borrowed snapshot of the flat buffer; implementations
/// must copy what they need before returning.
pub trait DisplaySink {
    /// Writes a flat frame. Characters after the first `'\0'` are ignored.
    fn present(&mut self, buffer: &[char]) -> io::Result<()>;

    /// Clears the physical display and homes the cursor.
    fn clear_screen(&mut self) -> io::Result<()>;

    fn hide_cursor(&mut self) -> io::Result<()>;

    /// Makes every write reach the display immediately.
    fn disable_buffering(&mut self) -> io::Result<()>;
}

/// Frame text up to (not including) the terminator.
pub fn frame_text(buffer: &[char]) -> String {
    buffer.iter().take_while(|&&c| c != TERMINATOR).collect()
}

const FRAME_COLOR: Color = Color::White;

/// Crossterm-backed terminal sink.
///
/// Commands are queued into an internal byte buffer and written to `out` in a
/// single call per frame. Newlines are expanded to `\r\n` so frames render the
/// same whether or not the terminal is in raw mode.
pub struct TerminalDisplay<W: Write> {
    out: W,
    buf: Vec<u8>,
    unbuffered: bool,
}

impl TerminalDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(64 * 1024),
            unbuffered: false,
        }
    }

    /// Writes a line of text (e.g. an FPS readout) without clearing first.
    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.buf.clear();
        self.buf.queue(Print(text))?;
        self.buf.queue(Print("\r\n"))?;
        self.flush_buf()
    }

    /// Shows the cursor and resets colors; call before handing the terminal back.
    pub fn restore(&mut self) -> io::Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(cursor::Show)?;
        self.flush_buf()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_buf(&mut self) -> io::Result<()> {
        self.out.write_all(&self.buf)?;
        if self.unbuffered {
            self.out.flush()?;
        }
        Ok(())
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn present(&mut self, buffer: &[char]) -> io::Result<()> {
        let text = frame_text(buffer).replace('\n', "\r\n");
        self.buf.clear();
        self.buf.queue(SetForegroundColor(FRAME_COLOR))?;
        self.buf.queue(Print(text))?;
        self.buf.queue(ResetColor)?;
        self.flush_buf()?;
        self.out.flush()
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::Clear(ClearType::All))?;
        self.buf.queue(cursor::MoveTo(0, 0))?;
        self.flush_buf()
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.buf.clear();
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()
    }

    fn disable_buffering(&mut self) -> io::Result<()> {
        self.unbuffered = true;
        self.out.flush()
    }
}

/// In-memory sink that records every presented frame.
#[derive(Debug, Default, Clone)]
pub struct RecordingDisplay {
    pub frames: Vec<Vec<char>>,
    pub clears: usize,
    pub cursor_hidden: bool,
    pub unbuffered: bool,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the most recent frame, without the terminator.
    pub fn last_frame_text(&self) -> Option<String> {
        self.frames.last().map(|f| frame_text(f))
    }
}

impl DisplaySink for RecordingDisplay {
    fn present(&mut self, buffer: &[char]) -> io::Result<()> {
        self.frames.push(buffer.to_vec());
        Ok(())
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.cursor_hidden = true;
        Ok(())
    }

    fn disable_buffering(&mut self) -> io::Result<()> {
        self.unbuffered = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_text_stops_at_terminator() {
        let buf = ['a', 'a', '\n', '\0', 'z'];
        assert_eq!(frame_text(&buf), "aa\n");
    }

    #[test]
    fn terminal_present_writes_frame_with_crlf() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.present(&['#', '#', '\n', '\0']).unwrap();
        let bytes = display.into_inner();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("##\r\n"));
        assert!(!text.contains('\0'));
    }

    #[test]
    fn terminal_clear_emits_escape_sequence() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.clear_screen().unwrap();
        display.hide_cursor().unwrap();
        let text = String::from_utf8(display.into_inner()).unwrap();
        assert!(text.contains("\x1b[2J"));
        assert!(text.contains("\x1b[?25l"));
    }

    #[test]
    fn recording_display_keeps_frames() {
        let mut display = RecordingDisplay::new();
        display.clear_screen().unwrap();
        display.present(&['x', '\0']).unwrap();
        assert_eq!(display.clears, 1);
        assert_eq!(display.last_frame_text().as_deref(), Some("x"));
    }
}
