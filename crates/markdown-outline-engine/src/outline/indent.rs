//! Tab and Shift-Tab on list lines.

use crate::editing::{BuiltinCommand, Host, IndentDirection, SelectionRange};
use crate::error::EditError;
use crate::outline::classify::{classify, is_blank};
use crate::outline::commands::Outcome;
use crate::outline::renumber::renumber_from;
use crate::outline::state::state_after;

/// What Tab or Shift-Tab does for one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndentAction {
    /// Every touched line is blank.
    NewBullet,
    /// List or quote lines to shift by one level.
    Indent { lines: Vec<usize> },
    /// Touches a line that is not part of a list.
    Pass,
}

/// Lines a selection touches. A selection ending at column 0 of a later
/// line does not touch that line.
fn touched_lines(range: &SelectionRange) -> std::ops::RangeInclusive<usize> {
    let (from, to) = (range.from(), range.to());
    let last = if to.line > from.line && to.column == 0 {
        to.line - 1
    } else {
        to.line
    };
    from.line..=last
}

pub fn classify_range<H: Host + ?Sized>(host: &H, range: &SelectionRange) -> IndentAction {
    let mut lines = Vec::new();
    for line in touched_lines(range) {
        let Some(text) = host.line(line) else {
            continue;
        };
        if is_blank(&text) {
            continue;
        }
        if state_after(host, line).in_code || classify(&text).is_none() {
            log::debug!("line {line}: not a list line");
            return IndentAction::Pass;
        }
        lines.push(line);
    }
    if lines.is_empty() {
        IndentAction::NewBullet
    } else {
        IndentAction::Indent { lines }
    }
}

/// Marker typed by Tab on an empty line.
pub fn default_bullet<H: Host + ?Sized>(host: &H) -> String {
    if host.indent_with_tabs() {
        "-\t".to_string()
    } else {
        format!("-{}", " ".repeat(host.tab_size().saturating_sub(1).max(1)))
    }
}

/// Shared body of `indentMarkdownListMore` and `indentMarkdownListLess`.
///
/// Any selection on a non-list line makes the whole command pass. List
/// lines are shifted by the host's indent command and renumbered. Tab starts
/// a new bullet at every selection that only covers blank lines, whether or
/// not other selections sit on list lines.
pub fn indent_list<H: Host + ?Sized>(
    host: &mut H,
    direction: IndentDirection,
) -> Result<Outcome, EditError> {
    if host.disable_input() {
        return Ok(Outcome::Pass);
    }

    let ranges = host.selections();
    let mut lines = Vec::new();
    let mut blank = Vec::new();
    for (index, range) in ranges.iter().enumerate() {
        match classify_range(host, range) {
            IndentAction::Pass => return Ok(Outcome::Pass),
            IndentAction::Indent { lines: touched } => lines.extend(touched),
            IndentAction::NewBullet => blank.push(index),
        }
    }

    if lines.is_empty() {
        return match direction {
            IndentDirection::More => {
                let bullet = default_bullet(host);
                log::debug!("starting {} new bullet(s)", ranges.len());
                host.replace_selections(&vec![bullet; ranges.len()])?;
                Ok(Outcome::Applied)
            }
            IndentDirection::Less => Ok(Outcome::Pass),
        };
    }

    let builtin = match direction {
        IndentDirection::More => BuiltinCommand::IndentMore,
        IndentDirection::Less => BuiltinCommand::IndentLess,
    };
    host.exec_builtin(builtin)?;

    lines.sort_unstable();
    lines.dedup();
    for line in lines {
        renumber_from(host, line)?;
    }

    if matches!(direction, IndentDirection::More) && !blank.is_empty() {
        start_bullets(host, &blank, ranges.len())?;
    }
    Ok(Outcome::Applied)
}

/// Types the default bullet over the selections at `indices`, bottom-up.
/// `expected` is the selection count the indices were taken from.
fn start_bullets<H: Host + ?Sized>(
    host: &mut H,
    indices: &[usize],
    expected: usize,
) -> Result<(), EditError> {
    let ranges = host.selections();
    if ranges.len() != expected {
        log::warn!(
            "selections changed from {expected} to {} while indenting, skipping new bullets",
            ranges.len()
        );
        return Ok(());
    }
    let bullet = default_bullet(host);
    for range in indices.iter().rev().filter_map(|&i| ranges.get(i)) {
        log::debug!("line {}: starting new bullet", range.from().line);
        host.replace_range(&bullet, range.from(), range.to())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Document, DocumentOptions, Position};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn range(line: usize, column: usize) -> SelectionRange {
        SelectionRange::cursor(Position::new(line, column))
    }

    #[rstest]
    #[case("- a", IndentAction::Indent { lines: vec![0] })]
    #[case("> quote", IndentAction::Indent { lines: vec![0] })]
    #[case("", IndentAction::NewBullet)]
    #[case("   ", IndentAction::NewBullet)]
    #[case("plain", IndentAction::Pass)]
    fn classifies_single_lines(#[case] text: &str, #[case] expected: IndentAction) {
        let doc = Document::from_text(text);
        assert_eq!(classify_range(&doc, &range(0, 0)), expected);
    }

    #[test]
    fn multi_line_range_skips_blank_lines_and_unselected_last_line() {
        let doc = Document::from_text("- a\n\n- b\nplain");
        let selection = SelectionRange::new(Position::new(0, 0), Position::new(3, 0));
        assert_eq!(
            classify_range(&doc, &selection),
            IndentAction::Indent { lines: vec![0, 2] }
        );
    }

    #[test]
    fn lines_inside_code_fences_pass() {
        let doc = Document::from_text("- a\n    ```\n    - x\n    ```");
        assert_eq!(classify_range(&doc, &range(2, 0)), IndentAction::Pass);
    }

    #[rstest]
    #[case(4, false, "-   ")]
    #[case(2, false, "- ")]
    #[case(1, false, "- ")]
    #[case(4, true, "-\t")]
    fn default_bullet_fills_a_tab_stop(
        #[case] tab_size: usize,
        #[case] indent_with_tabs: bool,
        #[case] expected: &str,
    ) {
        let doc = Document::from_text("").with_options(DocumentOptions {
            tab_size,
            indent_with_tabs,
            ..DocumentOptions::default()
        });
        assert_eq!(default_bullet(&doc), expected);
    }

    #[test]
    fn tab_nests_an_ordered_item_and_restarts_its_number() {
        let mut doc = Document::from_text("1. a\n2. b\n3. c");
        doc.set_cursor(Position::new(1, 4));

        let outcome = indent_list(&mut doc, IndentDirection::More).unwrap();

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(doc.text(), "1. a\n    1. b\n2. c");
        assert_eq!(doc.primary_cursor(), Position::new(1, 8));
    }

    #[test]
    fn shift_tab_lifts_an_item_and_renumbers_both_levels() {
        let mut doc = Document::from_text("1. a\n    1. x\n    2. y\n2. b");
        doc.set_cursor(Position::new(1, 5));

        indent_list(&mut doc, IndentDirection::Less).unwrap();

        assert_eq!(doc.text(), "1. a\n2. x\n    1. y\n3. b");
    }

    #[test]
    fn tab_on_blank_line_starts_a_bullet() {
        let mut doc = Document::from_text("- a\n");
        indent_list(&mut doc, IndentDirection::More).unwrap();
        assert_eq!(doc.text(), "- a\n-   ");
        assert_eq!(doc.primary_cursor(), Position::new(1, 4));
    }

    #[test]
    fn tab_with_cursors_on_an_item_and_a_blank_line() {
        let mut doc = Document::from_text("- a\n");
        doc.set_selections(vec![range(0, 3), range(1, 0)]);

        indent_list(&mut doc, IndentDirection::More).unwrap();

        assert_eq!(doc.text(), "    - a\n    -   ");
        assert_eq!(
            doc.selections(),
            vec![range(0, 7), range(1, 8)]
        );
    }

    #[test]
    fn shift_tab_on_blank_line_passes() {
        let mut doc = Document::from_text("- a\n");
        assert_eq!(
            indent_list(&mut doc, IndentDirection::Less).unwrap(),
            Outcome::Pass
        );
        assert_eq!(doc.text(), "- a\n");
    }

    #[test]
    fn one_plain_line_makes_every_selection_pass() {
        let mut doc = Document::from_text("- a\nplain");
        doc.set_selections(vec![range(0, 3), range(1, 5)]);
        assert_eq!(
            indent_list(&mut doc, IndentDirection::More).unwrap(),
            Outcome::Pass
        );
        assert_eq!(doc.text(), "- a\nplain");
    }
}
