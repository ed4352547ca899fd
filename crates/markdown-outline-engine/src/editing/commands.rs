use std::ops::Range;

use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::{Document, IndentDirection};
use crate::error::EditError;

/// Buffer edits the document knows how to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    InsertText {
        at: usize,
        text: String,
    },
    DeleteRange {
        range: Range<usize>,
    },
    ReplaceRange {
        range: Range<usize>,
        text: String,
    },
    /// Several independent replacements applied as one edit. Overlapping
    /// ranges after the first are dropped.
    ReplaceRanges {
        edits: Vec<(Range<usize>, String)>,
    },
    /// One replacement per selection, in selection order. Every selection
    /// collapses to a cursor after its inserted text.
    ReplaceSelections {
        replacements: Vec<String>,
    },
    IndentLines {
        lines: Vec<usize>,
        direction: IndentDirection,
    },
}

/// Compile a command into a delta
pub(crate) fn compile_command(doc: &Document, cmd: &Cmd) -> Result<Delta<RopeInfo>, EditError> {
    let len = doc.len();
    let mut builder = Builder::new(len);
    match cmd {
        Cmd::InsertText { at, text } => {
            check_offset(doc, *at)?;
            builder.replace(*at..*at, Rope::from(text));
        }
        Cmd::DeleteRange { range } => {
            check_range(doc, range)?;
            builder.delete(range.clone());
        }
        Cmd::ReplaceRange { range, text } => {
            check_range(doc, range)?;
            builder.replace(range.clone(), Rope::from(text));
        }
        Cmd::ReplaceRanges { edits } => {
            let mut sorted: Vec<&(Range<usize>, String)> = edits.iter().collect();
            sorted.sort_by_key(|(range, _)| range.start);
            let mut last_end = 0usize;
            let mut first = true;
            for (range, text) in sorted {
                check_range(doc, range)?;
                if !first && range.start < last_end {
                    continue;
                }
                builder.replace(range.clone(), Rope::from(text));
                last_end = range.end;
                first = false;
            }
        }
        Cmd::ReplaceSelections { replacements } => {
            let selections = doc.selections();
            if selections.len() != replacements.len() {
                return Err(EditError::ReplacementCountMismatch {
                    expected: selections.len(),
                    actual: replacements.len(),
                });
            }
            for (selection, text) in selections.iter().zip(replacements) {
                let from = doc.offset_of(selection.from())?;
                let to = doc.offset_of(selection.to())?;
                builder.replace(from..to, Rope::from(text.as_str()));
            }
        }
        Cmd::IndentLines { lines, direction } => {
            let mut lines = lines.clone();
            lines.sort_unstable();
            lines.dedup();
            for line in lines {
                let span = doc
                    .line_span(line)
                    .ok_or(EditError::InvalidPosition(crate::editing::Position::new(line, 0)))?;
                match direction {
                    IndentDirection::More => {
                        builder.replace(span.start..span.start, Rope::from(doc.indent_unit()));
                    }
                    IndentDirection::Less => {
                        let text = doc.slice_to_cow(span.start..span.end);
                        let remove = outdent_len(&text, doc.options().tab_size);
                        if remove > 0 {
                            builder.delete(span.start..span.start + remove);
                        }
                    }
                }
            }
        }
    }
    Ok(builder.build())
}

/// Bytes of leading whitespace that make up one indentation level.
fn outdent_len(line: &str, tab_size: usize) -> usize {
    if line.starts_with('\t') {
        return 1;
    }
    let spaces = line.bytes().take_while(|&b| b == b' ').count();
    if spaces < tab_size && line.as_bytes().get(spaces) == Some(&b'\t') {
        // A few alignment spaces in front of a tab: drop both.
        return spaces + 1;
    }
    spaces.min(tab_size)
}

fn check_offset(doc: &Document, offset: usize) -> Result<(), EditError> {
    if offset > doc.len() {
        return Err(EditError::InvalidPosition(doc.position_of(doc.len())));
    }
    Ok(())
}

fn check_range(doc: &Document, range: &Range<usize>) -> Result<(), EditError> {
    check_offset(doc, range.start)?;
    check_offset(doc, range.end)?;
    if range.start > range.end {
        return Err(EditError::InvalidPosition(doc.position_of(range.end)));
    }
    Ok(())
}
