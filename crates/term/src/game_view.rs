//! GameView: maps `core::GameState` into a terminal frame.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, top to bottom: title, rules, status, board, vertical fill, help.
//! Everything is shifted right by a fixed margin. Horizontal placement uses
//! [`center_pad`] against a fixed slot width per block, so it only depends
//! on the terminal width.

use crate::core::GameState;
use crate::frame::{Color, Frame, Line, Rgb, Style};
use crate::help::{full_help, short_help};
use crate::input::map::{FULL_HELP, SHORT_HELP};
use crate::text::{center_pad, word_wrap};

pub const TITLE: &str = "== Nimm ==";

pub const RULES: &str = "Nim is a mathematical game of strategy in which two players take \
    turns removing (or \"nimming\") objects from distinct heaps or piles. On each turn, a \
    player must remove at least one object, and may remove any number of objects provided \
    they all come from the same heap or pile. The goal of the game is to avoid taking the \
    last object.";

/// Slot widths the blocks are centered in.
const TITLE_SLOT: u16 = 11;
const STATUS_SLOT: u16 = 15;
const BOARD_SLOT: u16 = 24;
const HELP_SLOT: u16 = 24;
const HELP_SLOT_EXPANDED: u16 = 34;

const RULES_INDENT: u16 = 4;
/// Rules wrap at `width - RULES_MARGIN`.
const RULES_MARGIN: u16 = 12;
const FRAME_MARGIN: u16 = 2;
/// Rows kept free below the help block.
const RESERVED_ROWS: usize = 4;

const PRESENT_GLYPH: &str = "X";
const ABSENT_GLYPH: &str = " ";
const CELL_GAP: &str = "  ";

const TITLE_STYLE: Style = Style::plain().bold();
const RULES_STYLE: Style = Style::plain().fg(Color::Rgb(Rgb::new(0x62, 0x62, 0x62)));
const CURSOR_STYLE: Style = Style::plain().bold().bg(Color::Rgb(Rgb::new(0x7d, 0x56, 0xf4)));
const SELECTED_STYLE: Style = Style::plain().fg(Color::Ansi(5));

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Presentation state that is not part of the game itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub help_expanded: bool,
    /// Width the help block is truncated to. 0 means unlimited.
    pub help_width: u16,
}

impl ViewState {
    pub fn new(help_width: u16) -> Self {
        Self {
            help_expanded: false,
            help_width,
        }
    }
}

/// Stateless renderer for the game screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render the full screen for the given state.
    pub fn render(&self, game: &GameState, view: &ViewState, viewport: Viewport) -> Frame {
        let width = viewport.width;
        let mut body: Vec<Line> = Vec::with_capacity(32);

        body.push(Line::blank());
        body.push(Line::padded(center_pad(width, TITLE_SLOT)).with(TITLE, TITLE_STYLE));
        body.push(Line::blank());

        let wrap_at = width.saturating_sub(RULES_MARGIN) as usize;
        for text in word_wrap(RULES, wrap_at) {
            body.push(Line::padded(RULES_INDENT).with(text, RULES_STYLE));
        }
        body.push(Line::blank());

        body.push(
            Line::padded(center_pad(width, STATUS_SLOT)).with(status_text(game), Style::plain()),
        );
        body.push(Line::blank());

        self.draw_board(&mut body, game, center_pad(width, BOARD_SLOT));

        let help = self.help_lines(view, width);

        // Line breaks above the fill and inside the help block.
        let used = (body.len() - 1) + (help.len() - 1);
        let fill = (viewport.height as usize).saturating_sub(RESERVED_ROWS + used);

        let mut frame = Frame::new();
        let blanks = std::iter::repeat_with(Line::blank).take(fill);
        for mut line in body.into_iter().chain(blanks).chain(help) {
            // Blank lines stay empty rather than carrying trailing spaces.
            if !line.spans().is_empty() {
                line.indent(FRAME_MARGIN);
            }
            frame.push(line);
        }
        frame
    }

    fn draw_board(&self, out: &mut Vec<Line>, game: &GameState, pad: u16) {
        let board = game.board();
        let cursor = game.cursor();
        let selection = game.selection();

        for row in 0..board.rows() {
            let mut line = Line::padded(pad);
            for col in 0..board.cols() {
                let glyph = if board.is_present(row, col) {
                    PRESENT_GLYPH
                } else {
                    ABSENT_GLYPH
                };
                let style = if cursor.row == row && cursor.col == col {
                    CURSOR_STYLE
                } else if selection.contains(row, col) {
                    SELECTED_STYLE
                } else {
                    Style::plain()
                };
                line.push(CELL_GAP, Style::plain());
                line.push(glyph, style);
            }
            out.push(line);
        }
    }

    fn help_lines(&self, view: &ViewState, width: u16) -> Vec<Line> {
        let (mut lines, slot) = if view.help_expanded {
            (full_help(&FULL_HELP, view.help_width), HELP_SLOT_EXPANDED)
        } else {
            (vec![short_help(&SHORT_HELP, view.help_width)], HELP_SLOT)
        };
        let pad = center_pad(width, slot);
        for line in &mut lines {
            line.indent(pad);
        }
        lines
    }
}

/// "Player N's turn", or "Player N lost" once a single cell is left.
pub fn status_text(game: &GameState) -> String {
    let n = game.player().number();
    if game.is_lost() {
        format!("Player {n} lost  ")
    } else {
        format!("Player {n}'s turn")
    }
}
