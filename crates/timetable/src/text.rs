//! # Text measurement and wrapping
//!
//! Cell text is wrapped by character count, not by glyph metrics: the
//! average glyph is assumed to be half as wide as the font is tall. The
//! result only drives box sizing, so the approximation is good enough and,
//! more importantly, identical for the sizing and the drawing pass.

use crate::style::Metrics;

/// The lines of a wrapped cell and the height they take up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapped {
    /// Display lines, top to bottom. Never empty.
    pub lines: Vec<String>,
    /// `lines.len() * line_height`
    pub height: u32,
}

/// How many characters fit into `max_width` pixels at `font_size`
pub fn chars_per_line(max_width: u32, font_size: u32) -> usize {
    let avg_char_width = f64::from(font_size.max(1)) / 2.0;
    ((f64::from(max_width) / avg_char_width) as usize).max(1)
}

/// Greedy word wrap to at most `width` characters per line
///
/// Whitespace runs collapse into a single space. A word longer than a whole
/// line fills up the current line and continues on the next ones. An empty
/// text produces a single empty line.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let sep = usize::from(current_len > 0);

        if current_len + sep + word_len <= width {
            if sep > 0 {
                current.push(' ');
            }
            current.push_str(word);
            current_len += sep + word_len;
            continue;
        }

        if word_len <= width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
            continue;
        }

        // too long for any line: break it up
        let mut rest = word;
        let space_left = width.saturating_sub(current_len + sep);
        if current_len > 0 {
            if space_left > 0 {
                let (head, tail) = split_at_char(rest, space_left);
                current.push(' ');
                current.push_str(head);
                rest = tail;
            }
            lines.push(std::mem::take(&mut current));
        }
        let mut rest_len = rest.chars().count();
        while rest_len > width {
            let (head, tail) = split_at_char(rest, width);
            lines.push(head.to_owned());
            rest = tail;
            rest_len -= width;
        }
        current.push_str(rest);
        current_len = rest_len;
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let index = s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len());
    s.split_at(index)
}

/// Wrap `text` into a box `max_width` pixels wide
pub fn wrap(text: &str, max_width: u32, metrics: &Metrics) -> Wrapped {
    let lines = wrap_lines(text, chars_per_line(max_width, metrics.font_size));
    let height = lines.len() as u32 * metrics.line_height();
    Wrapped { lines, height }
}

#[cfg(test)]
mod tests {
    use super::{chars_per_line, wrap, wrap_lines};
    use crate::Style;

    #[test]
    fn test_chars_per_line() {
        // (540 - 2 * 60) / (54 / 2) = 15.5
        assert_eq!(chars_per_line(420, 54), 15);
        assert_eq!(chars_per_line(36, 6), 12);
        assert_eq!(chars_per_line(0, 6), 1);
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrap_lines("Физика", 15), ["Физика"]);
        assert_eq!(wrap_lines("  Physik \t lab ", 15), ["Physik lab"]);
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        assert_eq!(wrap_lines("", 15), [""]);
        assert_eq!(wrap_lines(" \n ", 15), [""]);
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        assert_eq!(
            wrap_lines("Математический анализ", 15),
            ["Математический", "анализ"]
        );
        assert_eq!(
            wrap_lines("one two three four", 9),
            ["one two", "three", "four"]
        );
    }

    #[test]
    fn test_long_words_are_split() {
        assert_eq!(
            wrap_lines("Программирование", 15),
            ["Программировани", "е"]
        );
        assert_eq!(wrap_lines("ab cdefghijk", 5), ["ab cd", "efghi", "jk"]);
        assert_eq!(wrap_lines("abcdefgh xy", 3), ["abc", "def", "gh", "xy"]);
    }

    #[test]
    fn test_lines_never_exceed_width() {
        let text = "Основы проектирования распределённых вычислительных систем реального времени";
        for width in 1..30 {
            for line in wrap_lines(text, width) {
                assert!(line.chars().count() <= width, "{:?} @ {}", line, width);
            }
        }
    }

    #[test]
    fn test_wrap_height_and_idempotence() {
        let m = Style::default().metrics().unwrap();
        let a = wrap("Математический анализ", m.content_width(), &m);
        let b = wrap("Математический анализ", m.content_width(), &m);
        assert_eq!(a, b);
        assert_eq!(a.lines.len(), 2);
        assert_eq!(a.height, 2 * m.line_height());
    }
}
