#![forbid(unsafe_code)]

//! Label measurement.
//!
//! Tab and list labels are measured through [`TextMeasure`]. The default
//! [`CellTextMetrics`] counts terminal-style display columns with
//! `unicode-width` and scales them by a fixed advance, which is enough for
//! monospaced hosts and for tests. Hosts with real font metrics implement the
//! trait themselves.

use lnf_core::geometry::Size;
use unicode_width::UnicodeWidthStr;

/// Measures the extent of a single-line label.
pub trait TextMeasure {
    /// Pixel size of `text` on one line.
    fn measure(&self, text: &str) -> Size;
}

/// Fixed-advance metrics: every display column is `advance` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellTextMetrics {
    pub advance: i32,
    pub line_height: i32,
}

impl Default for CellTextMetrics {
    fn default() -> Self {
        Self {
            advance: 7,
            line_height: 16,
        }
    }
}

impl CellTextMetrics {
    #[must_use]
    pub const fn new(advance: i32, line_height: i32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

/// Display width of `text` in columns (wide CJK glyphs count two).
#[inline]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

impl TextMeasure for CellTextMetrics {
    fn measure(&self, text: &str) -> Size {
        let columns = i32::try_from(display_width(text)).unwrap_or(i32::MAX);
        let height = if text.is_empty() { 0 } else { self.line_height };
        Size::new(columns.saturating_mul(self.advance), height)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure(&self, text: &str) -> Size {
        (**self).measure(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_wide_glyphs() {
        let metrics = CellTextMetrics::new(8, 14);
        assert_eq!(metrics.measure("Tab"), Size::new(24, 14));
        assert_eq!(metrics.measure("日本"), Size::new(32, 14));
    }

    #[test]
    fn empty_label_has_no_extent() {
        assert_eq!(CellTextMetrics::default().measure(""), Size::ZERO);
    }
}
