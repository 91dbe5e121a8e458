//! Byte ranges into document source text.

use std::ops::Range;

/// A byte range in the source of a circuit document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Create a span covering the character at a 1-based line and column.
    ///
    /// Positions past the end of the source clamp to an empty span at the end.
    pub fn at_line_column(source: &str, line: usize, column: usize) -> Self {
        let line_start = source
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum::<usize>();
        let mut start = (line_start + column.saturating_sub(1)).min(source.len());
        while !source.is_char_boundary(start) {
            start -= 1;
        }
        let end = source[start..]
            .chars()
            .next()
            .map_or(start, |c| start + c.len_utf8());
        Self::new(start..end)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_line_column() {
        let source = "{\n  \"a\": 1,\n  oops\n}";
        let span = Span::at_line_column(source, 3, 3);
        assert_eq!(&source[span.start()..span.end()], "o");
    }

    #[test]
    fn test_at_line_column_clamps() {
        let source = "[1, 2";
        let span = Span::at_line_column(source, 1, 99);
        assert_eq!(span, Span::new(5..5));
        assert!(span.is_empty());
    }
}
