//! Small text layout helpers.

use unicode_width::UnicodeWidthStr;

/// Left padding that centers `content` columns in `width` columns.
///
/// Never negative: content wider than the terminal gets no padding.
#[inline]
pub fn center_pad(width: u16, content: u16) -> u16 {
    width.saturating_sub(content) / 2
}

/// Greedy word wrap on whitespace.
///
/// Words are never split, so a word longer than `limit` gets a line of its
/// own. A `limit` of 0 disables wrapping.
pub fn word_wrap(text: &str, limit: usize) -> Vec<String> {
    if limit == 0 {
        return vec![text.split_whitespace().collect::<Vec<_>>().join(" ")];
    }

    let mut lines = Vec::new();
    let mut cur = String::new();
    let mut cur_w = 0usize;

    for word in text.split_whitespace() {
        let w = word.width();
        if cur_w > 0 && cur_w + 1 + w > limit {
            lines.push(std::mem::take(&mut cur));
            cur_w = 0;
        }
        if cur_w > 0 {
            cur.push(' ');
            cur_w += 1;
        }
        cur.push_str(word);
        cur_w += w;
    }

    if !cur.is_empty() || lines.is_empty() {
        lines.push(cur);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pad_uses_integer_division() {
        assert_eq!(center_pad(80, 11), 34);
        assert_eq!(center_pad(40, 24), 8);
        assert_eq!(center_pad(25, 24), 0);
        assert_eq!(center_pad(10, 24), 0);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = word_wrap("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        assert!(lines.iter().all(|l| l.width() <= 10));
    }

    #[test]
    fn long_word_keeps_its_own_line() {
        let lines = word_wrap("a supercalifragilistic b", 5);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn zero_limit_disables_wrapping() {
        assert_eq!(word_wrap("one  two three", 0), vec!["one two three"]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(word_wrap("", 8), vec![String::new()]);
    }
}
