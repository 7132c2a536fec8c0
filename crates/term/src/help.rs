//! Help panel rendering: a one-line compact form and a multi-column expanded
//! form. Both are cut off with an ellipsis when they would exceed the
//! available width (0 means unlimited).

use unicode_width::UnicodeWidthStr;

use crate::frame::{Color, Line, Rgb, Style};
use crate::input::Binding;

const SHORT_SEPARATOR: &str = " • ";
const FULL_SEPARATOR: &str = "    ";
const ELLIPSIS: &str = "…";

const KEY_STYLE: Style = Style::plain().fg(Color::Rgb(Rgb::new(0x90, 0x90, 0x90)));
const DESC_STYLE: Style = Style::plain().fg(Color::Rgb(Rgb::new(0x62, 0x62, 0x62)));
const SEP_STYLE: Style = Style::plain().fg(Color::Rgb(Rgb::new(0x4a, 0x4a, 0x4a)));

/// `? toggle help • q quit`
pub fn short_help(bindings: &[Binding], width: u16) -> Line {
    let width = width as usize;
    let mut line = Line::blank();
    let mut total = 0usize;

    for b in bindings {
        let sep = if total > 0 { SHORT_SEPARATOR } else { "" };
        let item_w = sep.width() + b.help_key.width() + 1 + b.help_desc.width();

        if width > 0 && total + item_w > width {
            push_tail(&mut line, total, width);
            break;
        }

        total += item_w;
        if !sep.is_empty() {
            line.push(sep, SEP_STYLE);
        }
        line.push(b.help_key, KEY_STYLE);
        line.push(" ", Style::plain());
        line.push(b.help_desc, DESC_STYLE);
    }
    line
}

/// Columns of `key desc` pairs, separated by four spaces.
pub fn full_help<G: AsRef<[Binding]>>(groups: &[G], width: u16) -> Vec<Line> {
    let width = width as usize;
    let height = groups.iter().map(|g| g.as_ref().len()).max().unwrap_or(0);
    let mut lines = vec![Line::blank(); height.max(1)];
    let mut total = 0usize;

    for (i, group) in groups.iter().enumerate() {
        let group = group.as_ref();
        let sep = if i > 0 { FULL_SEPARATOR } else { "" };
        let key_w = group.iter().map(|b| b.help_key.width()).max().unwrap_or(0);
        let desc_w = group.iter().map(|b| b.help_desc.width()).max().unwrap_or(0);
        let col_w = sep.width() + key_w + 1 + desc_w;

        if width > 0 && total + col_w > width {
            push_tail(&mut lines[0], total, width);
            break;
        }
        total += col_w;

        for (row, line) in lines.iter_mut().enumerate() {
            if !sep.is_empty() {
                line.push(sep, Style::plain());
            }
            match group.get(row) {
                Some(b) => {
                    line.push(pad_to(b.help_key, key_w), KEY_STYLE);
                    line.push(" ", Style::plain());
                    line.push(pad_to(b.help_desc, desc_w), DESC_STYLE);
                }
                None => line.push(" ".repeat(key_w + 1 + desc_w), Style::plain()),
            }
        }
    }
    lines
}

fn push_tail(line: &mut Line, total: usize, width: usize) {
    let tail_w = 1 + ELLIPSIS.width();
    if total + tail_w < width {
        line.push(" ", Style::plain());
        line.push(ELLIPSIS, SEP_STYLE);
    }
}

fn pad_to(s: &str, w: usize) -> String {
    let mut out = String::from(s);
    let sw = s.width();
    if sw < w {
        out.push_str(&" ".repeat(w - sw));
    }
    out
}
