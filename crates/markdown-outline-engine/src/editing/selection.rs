use std::fmt;

/// A point in the document: zero-based line and byte column within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// One selection; `head` is where the cursor is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    pub anchor: Position,
    pub head: Position,
}

impl SelectionRange {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// A collapsed selection (a plain cursor).
    pub fn cursor(at: Position) -> Self {
        Self {
            anchor: at,
            head: at,
        }
    }

    pub fn from(&self) -> Position {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> Position {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}

/// Sorts ranges and merges overlapping or duplicate ones, so callers always
/// see an ordered, disjoint list.
pub(crate) fn normalize(mut ranges: Vec<SelectionRange>) -> Vec<SelectionRange> {
    ranges.sort_by_key(|r| r.from());
    let mut merged: Vec<SelectionRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.from() < last.to() || range == *last => {
                let from = last.from();
                let to = last.to().max(range.to());
                *last = SelectionRange::new(from, to);
            }
            _ => merged.push(range),
        }
    }
    merged
}
