use std::ops::Range;

/// Byte extent of one line's text in the document, newline excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Byte length; an inverted span counts as empty.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Document offset of `column`, clamped to the line's end.
    #[must_use]
    pub fn offset_of(self, column: usize) -> usize {
        self.start + column.min(self.len())
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn blank_line_span_is_empty() {
        let span = Span { start: 4, end: 4 };
        assert!(span.is_empty());
        assert!(Span { start: 5, end: 2 }.is_empty());
    }

    #[rstest]
    #[case(0, 10)]
    #[case(1, 11)]
    #[case(3, 13)]
    #[case(40, 13)]
    fn column_clamps_to_line_end(#[case] column: usize, #[case] offset: usize) {
        assert_eq!(Span { start: 10, end: 13 }.offset_of(column), offset);
    }

    #[test]
    fn converts_to_byte_range() {
        assert_eq!(Range::from(Span { start: 10, end: 13 }), 10..13);
    }
}
