//! Enter inside a list: continue it, step out one level, or end it.

use crate::editing::{BuiltinCommand, Host, IndentDirection, Position, SelectionRange};
use crate::error::EditError;
use crate::outline::classify::{ListPrefix, bare_marker, classify};
use crate::outline::commands::Outcome;
use crate::outline::renumber::renumber_from;
use crate::outline::state::state_at;

/// What Enter does for one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Not a list line; the host's own newline has to handle it.
    Fallback,
    /// Empty nested item: move it one level out.
    Outdent { line: usize },
    /// Empty top-level item: drop the marker and leave the list.
    Terminate { line: usize },
    /// Start a new item with this text.
    Continue(String),
}

/// Decides what Enter should do for `range`. Never edits.
pub fn decide<H: Host + ?Sized>(host: &H, range: &SelectionRange) -> Continuation {
    let (from, to) = (range.from(), range.to());
    let state = state_at(host, from);
    if !state.in_list && !state.in_quote {
        log::debug!("line {}: not in a list or quote", from.line);
        return Continuation::Fallback;
    }
    if state.in_code {
        log::debug!("line {}: inside fenced code", from.line);
        return Continuation::Fallback;
    }
    let Some(text) = host.line(from.line) else {
        return Continuation::Fallback;
    };
    let Some(prefix) = classify(&text) else {
        log::debug!("line {}: no list marker", from.line);
        return Continuation::Fallback;
    };

    // Only a marker with nothing after it counts as an empty item
    let to_len = host.line(to.line).map_or(0, |line| line.len());
    if bare_marker(&text).is_some() && from.column == prefix.len() && to.column == to_len {
        return if state.indentation > 0 {
            Continuation::Outdent { line: from.line }
        } else {
            Continuation::Terminate { line: from.line }
        };
    }
    Continuation::Continue(continue_text(&prefix))
}

/// Newline plus the marker of the item after `prefix`.
pub fn continue_text(prefix: &ListPrefix) -> String {
    format!("\n{}", prefix.next())
}

/// The Enter command.
///
/// If any selection falls back, the host's plain newline runs once for all
/// of them and no list edit is made.
pub fn newline_and_indent_continue_list<H: Host + ?Sized>(
    host: &mut H,
) -> Result<Outcome, EditError> {
    if host.disable_input() {
        return Ok(Outcome::Pass);
    }

    let ranges = host.selections();
    let decisions: Vec<Continuation> = ranges.iter().map(|range| decide(host, range)).collect();

    if decisions.contains(&Continuation::Fallback) {
        log::debug!(
            "falling back to {} for {} selection(s)",
            BuiltinCommand::NewlineAndIndent.name(),
            ranges.len()
        );
        host.exec_builtin(BuiltinCommand::NewlineAndIndent)?;
        return Ok(Outcome::Applied);
    }

    // Bottom-up, so an edit never moves a line a later step still has to touch
    for decision in decisions.iter().rev() {
        match *decision {
            Continuation::Outdent { line } => {
                log::debug!("line {line}: outdenting empty item");
                host.indent_line(line, IndentDirection::Less)?;
                renumber_from(host, line)?;
            }
            Continuation::Terminate { line } => {
                log::debug!("line {line}: ending list");
                let len = host
                    .line(line)
                    .and_then(|text| classify(&text))
                    .map_or(0, |prefix| prefix.len());
                host.replace_range("", Position::new(line, 0), Position::new(line, len))?;
            }
            Continuation::Continue(_) | Continuation::Fallback => {}
        }
    }

    let ranges = host.selections();
    if ranges.len() != decisions.len() {
        log::warn!(
            "selections changed from {} to {} while editing, skipping continuation",
            decisions.len(),
            ranges.len()
        );
        return Ok(Outcome::Applied);
    }

    let replacements: Vec<String> = decisions
        .iter()
        .zip(&ranges)
        .map(|(decision, range)| match decision {
            Continuation::Outdent { .. } => String::new(),
            Continuation::Terminate { .. } | Continuation::Fallback => "\n".to_string(),
            // Renumbering may have rewritten this line's number
            Continuation::Continue(text) => host
                .line(range.from().line)
                .and_then(|line| classify(&line))
                .map_or_else(|| text.clone(), |prefix| continue_text(&prefix)),
        })
        .collect();

    host.replace_selections(&replacements)?;
    Ok(Outcome::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Document;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn doc_at(text: &str, line: usize, column: usize) -> Document {
        let mut doc = Document::from_text(text);
        doc.set_cursor(Position::new(line, column));
        doc
    }

    fn decision(text: &str, line: usize, column: usize) -> Continuation {
        let doc = doc_at(text, line, column);
        decide(&doc, &SelectionRange::cursor(Position::new(line, column)))
    }

    #[rstest]
    #[case("1. one", 0, 6, "\n2. ")]
    #[case("  9) nine", 0, 9, "\n  10) ")]
    #[case("- item", 0, 6, "\n- ")]
    #[case("*\titem", 0, 6, "\n*\t")]
    #[case("> quoted", 0, 8, "\n> ")]
    #[case("- ab", 0, 3, "\n- ")]
    fn continues_lists(
        #[case] text: &str,
        #[case] line: usize,
        #[case] column: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(
            decision(text, line, column),
            Continuation::Continue(expected.to_string())
        );
    }

    #[rstest]
    #[case("plain text", 0, 10)]
    #[case("", 0, 0)]
    #[case("- a\n\n", 2, 0)]
    #[case("- a\n    ```\n    - x", 2, 7)]
    fn falls_back_outside_lists(#[case] text: &str, #[case] line: usize, #[case] column: usize) {
        assert_eq!(decision(text, line, column), Continuation::Fallback);
    }

    #[test]
    fn empty_items_outdent_or_terminate() {
        assert_eq!(
            decision("- a\n    - ", 1, 6),
            Continuation::Outdent { line: 1 }
        );
        assert_eq!(decision("- a\n- ", 1, 2), Continuation::Terminate { line: 1 });
    }

    #[test]
    fn selecting_item_text_is_not_an_empty_item() {
        let doc = Document::from_text("- abc");
        let range = SelectionRange::new(Position::new(0, 2), Position::new(0, 5));
        assert_eq!(
            decide(&doc, &range),
            Continuation::Continue("\n- ".to_string())
        );
    }

    #[test]
    fn enter_over_selected_item_text_replaces_it() {
        let mut doc = Document::from_text("- abc");
        doc.set_selections(vec![SelectionRange::new(
            Position::new(0, 2),
            Position::new(0, 5),
        )]);
        newline_and_indent_continue_list(&mut doc).unwrap();
        assert_eq!(doc.text(), "- \n- ");
        assert_eq!(doc.primary_cursor(), Position::new(1, 2));
    }

    #[test]
    fn enter_continues_and_moves_cursor() {
        let mut doc = doc_at("3. three", 0, 8);
        let outcome = newline_and_indent_continue_list(&mut doc).unwrap();
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(doc.text(), "3. three\n4. ");
        assert_eq!(doc.primary_cursor(), Position::new(1, 3));
    }

    #[test]
    fn enter_on_empty_top_level_item_leaves_a_blank_line() {
        let mut doc = doc_at("- a\n- ", 1, 2);
        newline_and_indent_continue_list(&mut doc).unwrap();
        assert_eq!(doc.text(), "- a\n\n");
        assert_eq!(doc.primary_cursor(), Position::new(2, 0));
    }

    #[test]
    fn enter_on_empty_nested_item_outdents_it() {
        let mut doc = doc_at("- a\n    - ", 1, 6);
        newline_and_indent_continue_list(&mut doc).unwrap();
        assert_eq!(doc.text(), "- a\n- ");
        assert_eq!(doc.primary_cursor(), Position::new(1, 2));
    }

    #[test]
    fn disabled_input_passes() {
        let mut doc = doc_at("- a", 0, 3);
        doc.options.disable_input = true;
        assert_eq!(
            newline_and_indent_continue_list(&mut doc).unwrap(),
            Outcome::Pass
        );
        assert_eq!(doc.text(), "- a");
    }
}
