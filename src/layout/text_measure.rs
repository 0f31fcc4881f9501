//! Text Measurement
//!
//! Utilities for measuring label and button text in dips.
//!
//! There is no font rasterizer here. A glyph is assumed to advance
//! `font_size * GLYPH_ADVANCE` dips per display column, with display columns
//! taken from `unicode-width`:
//! - ASCII characters: 1 column
//! - CJK characters: 2 columns (fullwidth)
//! - Emoji: 2 columns (most)
//! - Zero-width characters: 0 columns

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Horizontal advance of one display column, relative to the font size.
pub const GLYPH_ADVANCE: f32 = 0.55;

/// Line height, relative to the font size.
pub const LINE_HEIGHT: f32 = 1.2;

/// Measure the display width of a string in columns.
pub fn string_width(s: &str) -> usize {
    s.width()
}

/// Width in dips of one display column at `font_size`.
#[inline]
pub fn column_advance(font_size: f32) -> f32 {
    font_size * GLYPH_ADVANCE
}

/// Height in dips of one line at `font_size`.
#[inline]
pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT
}

/// Width in dips of the widest word, the narrowest the text can wrap to
/// without breaking words.
pub fn min_content_width(text: &str, font_size: f32) -> f32 {
    let columns = text
        .split([' ', '\n'])
        .map(string_width)
        .max()
        .unwrap_or(0);
    columns as f32 * column_advance(font_size)
}

/// Wrap text into lines no wider than `max_columns`.
///
/// Breaks at spaces where possible and mid-word when a single word does not
/// fit. Explicit newlines are honoured. Trailing spaces at a break are dropped.
pub fn wrap_text(text: &str, max_columns: usize) -> Vec<String> {
    let max_columns = max_columns.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split(' ') {
            let word_width = word.width();
            let sep = usize::from(!line.is_empty());

            if line_width + sep + word_width <= max_columns {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                line_width += sep + word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }

            // Hard-break words longer than a whole line
            for c in word.chars() {
                let cw = c.width().unwrap_or(0);
                if line_width + cw > max_columns && line_width > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(c);
                line_width += cw;
            }
        }

        lines.push(line);
    }

    lines
}

/// Measure text at `font_size`, wrapping at `available_width` dips if given.
///
/// Returns `(width, height)` in dips. Empty text still occupies one line.
pub fn measure_text(text: &str, font_size: f32, available_width: Option<f32>) -> (f32, f32) {
    let advance = column_advance(font_size);
    let natural_columns = text.split('\n').map(string_width).max().unwrap_or(0);

    let lines = match available_width {
        Some(width) if advance > 0.0 && (natural_columns as f32) * advance > width => {
            let max_columns = ((width + 1e-3) / advance).floor().max(1.0) as usize;
            wrap_text(text, max_columns)
        }
        _ => text.split('\n').map(str::to_string).collect(),
    };

    let columns = lines.iter().map(|l| string_width(l)).max().unwrap_or(0);
    let line_count = lines.len().max(1);

    (columns as f32 * advance, line_count as f32 * line_height(font_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_width() {
        assert_eq!(string_width("Hello"), 5);
        assert_eq!(string_width("日本"), 4);
        assert_eq!(string_width(""), 0);
    }

    #[test]
    fn test_wrap_text_at_spaces() {
        assert_eq!(wrap_text("hello world", 5), vec!["hello", "world"]);
        assert_eq!(wrap_text("a b c", 3), vec!["a b", "c"]);
        assert_eq!(wrap_text("one\ntwo", 10), vec!["one", "two"]);
    }

    #[test]
    fn test_wrap_text_breaks_long_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_measure_single_line() {
        let (w, h) = measure_text("Label", 10.0, None);
        assert!((w - 27.5).abs() < 1e-4);
        assert!((h - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_measure_wraps_to_available_width() {
        // 11 columns at 5.5 dips = 60.5 dips natural; 33 dips fits 6 columns
        let (w, h) = measure_text("hello world", 10.0, Some(33.0));
        assert!((w - 27.5).abs() < 1e-4);
        assert!((h - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_min_content_width_keeps_words_whole() {
        let min = min_content_width("overflowing text", 10.0);
        assert!((min - 60.5).abs() < 1e-4);

        let (w, h) = measure_text("overflowing text", 10.0, Some(min));
        assert!((w - 60.5).abs() < 1e-4);
        assert!((h - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let (w, h) = measure_text("", 10.0, Some(100.0));
        assert_eq!(w, 0.0);
        assert!((h - 12.0).abs() < 1e-4);
    }
}
