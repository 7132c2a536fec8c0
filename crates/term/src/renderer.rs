//! TerminalRenderer: flushes a frame to a real terminal.
//!
//! Every redraw is a full redraw. The encoders write crossterm commands into
//! a byte buffer, so the same bytes can go to the local stdout or to a remote
//! session's socket.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::frame::{Color, Frame, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode plus alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        encode_enter_into(&mut self.buf)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        encode_exit_into(&mut self.buf)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        encode_full_into(frame, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Switch to the alternate screen and hide the cursor.
pub fn encode_enter_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::EnterAlternateScreen)?;
    out.queue(cursor::Hide)?;
    out.queue(terminal::DisableLineWrap)?;
    Ok(())
}

/// Undo [`encode_enter_into`].
pub fn encode_exit_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(terminal::EnableLineWrap)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
/// Lines are separated by `\r\n` since raw mode (and telnet) do not translate
/// a bare `\n`.
pub fn encode_full_into(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<Style> = None;
    for (y, line) in frame.lines().iter().enumerate() {
        if y > 0 {
            out.queue(Print("\r\n"))?;
        }
        for span in line.spans() {
            if current != Some(span.style) {
                apply_style_into(out, span.style)?;
                current = Some(span.style);
            }
            out.queue(Print(span.text.as_str()))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(ResetColor)?;
    if let Some(fg) = style.fg {
        out.queue(SetForegroundColor(to_crossterm(fg)))?;
    }
    if let Some(bg) = style.bg {
        out.queue(SetBackgroundColor(to_crossterm(bg)))?;
    }
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Rgb(rgb) => style::Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        },
        Color::Ansi(n) => style::Color::AnsiValue(n),
    }
}
