use crate::editing::SelectionRange;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Byte ranges of inserted text in the new buffer
    pub changed: Vec<std::ops::Range<usize>>,
    pub selections: Vec<SelectionRange>,
    pub version: u64,
}
