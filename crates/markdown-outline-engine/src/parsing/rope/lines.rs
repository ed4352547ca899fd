use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Zero-based line number.
    pub number: usize,
    /// Byte span of the line content, line terminator excluded.
    pub span: Span,
    /// The line text without its terminator.
    pub text: String,
}

/// Returns an iterator over every line of the rope with its byte span.
///
/// A rope ending in a newline has a final empty line, matching what a cursor
/// can reach in an editor: `"- a\n"` yields two lines.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    let mut number = 0usize;
    let mut done = false;
    let mut raw = rope.lines_raw(..);
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let line = match raw.next() {
            Some(line) => line,
            None => {
                // Only reached when the rope is empty or ends with '\n'.
                done = true;
                std::borrow::Cow::Borrowed("")
            }
        };
        let start = offset;
        offset += line.len();
        let text = line.trim_end_matches(['\r', '\n']);
        if !line.ends_with('\n') {
            done = true;
        }
        let item = LineRef {
            number,
            span: Span {
                start,
                end: start + text.len(),
            },
            text: text.to_string(),
        };
        number += 1;
        Some(item)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(s: &str) -> Vec<String> {
        lines_with_spans(&Rope::from(s)).map(|l| l.text).collect()
    }

    #[test]
    fn empty_rope_has_one_line() {
        assert_eq!(texts(""), vec![""]);
    }

    #[test]
    fn trailing_newline_yields_final_empty_line() {
        assert_eq!(texts("- a\n"), vec!["- a", ""]);
    }

    #[test]
    fn crlf_is_stripped_from_text_and_span() {
        let lines: Vec<_> = lines_with_spans(&Rope::from("a\r\nbc")).collect();
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[0].span, Span { start: 0, end: 1 });
        assert_eq!(lines[1].span, Span { start: 3, end: 5 });
        assert_eq!(lines[1].number, 1);
    }
}
