//! Frame and style types for terminal rendering.
//!
//! A [`Frame`] is a list of lines; each line is a run of styled spans. It is
//! the complete screen for one redraw. Frames can be flattened to plain text,
//! which is what the tests look at.

use unicode_width::UnicodeWidthStr;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Rgb(Rgb),
    /// Index into the terminal's 256-color palette.
    Ansi(u8),
}

/// Minimal span styling. `None` colors leave the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Style {
    pub const fn plain() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
        }
    }

    pub const fn fg(mut self, c: Color) -> Self {
        self.fg = Some(c);
        self
    }

    pub const fn bg(mut self, c: Color) -> Self {
        self.bg = Some(c);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    pub fn blank() -> Self {
        Self::default()
    }

    /// A line starting with `n` unstyled spaces.
    pub fn padded(n: u16) -> Self {
        let mut line = Self::default();
        line.pad(n);
        line
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn pad(&mut self, n: u16) {
        if n > 0 {
            self.push(" ".repeat(n as usize), Style::plain());
        }
    }

    pub fn push(&mut self, text: impl Into<String>, style: Style) {
        self.spans.push(Span {
            text: text.into(),
            style,
        });
    }

    pub fn with(mut self, text: impl Into<String>, style: Style) -> Self {
        self.push(text, style);
        self
    }

    /// Shift the whole line right by `n` columns.
    pub fn indent(&mut self, n: u16) {
        if n > 0 {
            self.spans.insert(
                0,
                Span {
                    text: " ".repeat(n as usize),
                    style: Style::plain(),
                },
            );
        }
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.width()).sum()
    }

    pub fn to_plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// One full screen of output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    lines: Vec<Line>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// All lines joined with `\n`, styles dropped.
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&line.to_plain());
        }
        out
    }
}
