use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Delimiter following the number of an ordered list marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Period, // "1."
    Paren,  // "1)"
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Period => '.',
            Delimiter::Paren => ')',
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "." => Some(Delimiter::Period),
            ")" => Some(Delimiter::Paren),
            _ => None,
        }
    }
}

/// The token that makes a line a list item or a blockquote line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// `-`, `*` or `+`
    Bullet(char),
    /// One or more `>` with interleaved spaces, exactly as written.
    Quote(String),
    /// `N.` or `N)`
    Ordered { value: u64, delimiter: Delimiter },
}

/// A classified list or blockquote prefix.
///
/// The three parts concatenate back to the exact bytes at the start of the
/// line, so `prefix.to_string().len() == prefix.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPrefix {
    /// Leading whitespace before the marker.
    pub indent: String,
    pub marker: Marker,
    /// Whitespace after the marker. For bullets this includes the one
    /// whitespace character the grammar requires.
    pub trailing: String,
    /// Marker as written (keeps leading zeros such as `01.`).
    marker_text: String,
}

impl ListPrefix {
    /// Byte length of the whole prefix.
    pub fn len(&self) -> usize {
        self.indent.len() + self.marker_text.len() + self.trailing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn order_value(&self) -> Option<u64> {
        match self.marker {
            Marker::Ordered { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn order_suffix(&self) -> Option<char> {
        match self.marker {
            Marker::Ordered { delimiter, .. } => Some(delimiter.as_char()),
            _ => None,
        }
    }

    pub fn is_quote(&self) -> bool {
        matches!(self.marker, Marker::Quote(_))
    }

    /// Byte range of the digits of an ordered marker within the line.
    pub fn number_range(&self) -> Option<std::ops::Range<usize>> {
        match self.marker {
            Marker::Ordered { .. } => {
                let start = self.indent.len();
                // marker_text is digits followed by a one-byte delimiter
                Some(start..start + self.marker_text.len() - 1)
            }
            _ => None,
        }
    }

    /// The prefix for the item that follows this one: bullets and quotes are
    /// repeated verbatim, ordered markers count up by one.
    pub fn next(&self) -> ListPrefix {
        match self.marker {
            Marker::Ordered { value, delimiter } => {
                let value = value.saturating_add(1);
                ListPrefix {
                    indent: self.indent.clone(),
                    marker: Marker::Ordered { value, delimiter },
                    trailing: self.trailing.clone(),
                    marker_text: format!("{value}{}", delimiter.as_char()),
                }
            }
            _ => self.clone(),
        }
    }
}

impl fmt::Display for ListPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.indent, self.marker_text, self.trailing)
    }
}

/// A line holding nothing but a marker (and optional whitespace).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BareMarker {
    pub indented: bool,
}

fn list_re() -> &'static Regex {
    static LIST_RE: OnceLock<Regex> = OnceLock::new();
    LIST_RE.get_or_init(|| {
        Regex::new(r"^(\s*)(>[> ]*|([*+-])(\s)|(\d+)([.)]))(\s*)").expect("Invalid list regex")
    })
}

fn bare_marker_re() -> &'static Regex {
    static BARE_RE: OnceLock<Regex> = OnceLock::new();
    BARE_RE.get_or_init(|| {
        Regex::new(r"^(\s*)(>[> ]*|[*+-]|\d+[.)])\s*$").expect("Invalid bare marker regex")
    })
}

/// Classifies the start of a line as a list item or blockquote prefix.
///
/// Returns `None` for plain text, blank lines, and anything else that does
/// not start with a recognised marker.
pub fn classify(line: &str) -> Option<ListPrefix> {
    let caps = list_re().captures(line)?;
    let indent = caps.get(1).map_or("", |m| m.as_str()).to_string();
    let mut trailing = caps.get(7).map_or("", |m| m.as_str()).to_string();
    let marker_match = caps.get(2)?.as_str();

    let (marker, marker_text) = if let Some(bullet) = caps.get(3) {
        // The mandatory whitespace belongs to the trailing run.
        let space = caps.get(4).map_or("", |m| m.as_str());
        trailing.insert_str(0, space);
        let c = bullet.as_str().chars().next()?;
        (Marker::Bullet(c), bullet.as_str().to_string())
    } else if let (Some(digits), Some(delim)) = (caps.get(5), caps.get(6)) {
        let value = digits.as_str().parse::<u64>().ok()?;
        let delimiter = Delimiter::parse(delim.as_str())?;
        (
            Marker::Ordered { value, delimiter },
            marker_match.to_string(),
        )
    } else {
        (
            Marker::Quote(marker_match.to_string()),
            marker_match.to_string(),
        )
    };

    Some(ListPrefix {
        indent,
        marker,
        trailing,
        marker_text,
    })
}

/// Recognises a line that is only a marker, the signal that the user wants
/// to leave the list.
pub fn bare_marker(line: &str) -> Option<BareMarker> {
    let caps = bare_marker_re().captures(line)?;
    Some(BareMarker {
        indented: caps.get(1).is_some_and(|m| !m.as_str().is_empty()),
    })
}

/// True when the line has no visible content.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("- item", "", Marker::Bullet('-'), " ")]
    #[case("  * item", "  ", Marker::Bullet('*'), " ")]
    #[case("+\titem", "", Marker::Bullet('+'), "\t")]
    #[case("-   spaced", "", Marker::Bullet('-'), "   ")]
    #[case("\t\t- deep", "\t\t", Marker::Bullet('-'), " ")]
    fn classifies_bullets(
        #[case] line: &str,
        #[case] indent: &str,
        #[case] marker: Marker,
        #[case] trailing: &str,
    ) {
        let prefix = classify(line).expect("bullet line should classify");
        assert_eq!(prefix.indent, indent);
        assert_eq!(prefix.marker, marker);
        assert_eq!(prefix.trailing, trailing);
        assert_eq!(prefix.order_value(), None);
        assert!(line.starts_with(&prefix.to_string()));
    }

    #[rstest]
    #[case("1. one", 1, '.', 3)]
    #[case("12) twelve", 12, ')', 4)]
    #[case("    3. nested", 3, '.', 7)]
    #[case("7.no-space", 7, '.', 2)]
    fn classifies_ordered(
        #[case] line: &str,
        #[case] value: u64,
        #[case] suffix: char,
        #[case] len: usize,
    ) {
        let prefix = classify(line).expect("ordered line should classify");
        assert_eq!(prefix.order_value(), Some(value));
        assert_eq!(prefix.order_suffix(), Some(suffix));
        assert_eq!(prefix.len(), len);
    }

    #[rstest]
    #[case("> quote", "> ")]
    #[case(">> nested", ">> ")]
    #[case("> > spaced", "> > ")]
    #[case("> - quoted bullet", "> ")]
    fn classifies_quotes(#[case] line: &str, #[case] marker: &str) {
        let prefix = classify(line).expect("quote line should classify");
        assert_eq!(prefix.marker, Marker::Quote(marker.to_string()));
        assert!(prefix.is_quote());
    }

    #[rstest]
    #[case("plain text")]
    #[case("")]
    #[case("    ")]
    #[case("*emphasis*")]
    #[case("-dash")]
    #[case("# heading")]
    #[case("1 no delimiter")]
    #[case("99999999999999999999999. overflow")]
    fn rejects_non_list_lines(#[case] line: &str) {
        assert_eq!(classify(line), None);
    }

    #[test]
    fn next_counts_up_ordered_markers() {
        let prefix = classify("  9) nine").unwrap();
        assert_eq!(prefix.next().to_string(), "  10) ");
    }

    #[test]
    fn next_keeps_leading_zero_free_format() {
        let prefix = classify("01. first").unwrap();
        assert_eq!(prefix.to_string(), "01. ");
        assert_eq!(prefix.next().to_string(), "2. ");
    }

    #[test]
    fn next_repeats_bullets_and_quotes() {
        assert_eq!(classify("* a").unwrap().next().to_string(), "* ");
        assert_eq!(classify(">> a").unwrap().next().to_string(), ">> ");
    }

    #[test]
    fn number_range_covers_only_digits() {
        let line = "   42. answer";
        let prefix = classify(line).unwrap();
        let range = prefix.number_range().unwrap();
        assert_eq!(&line[range], "42");
        assert_eq!(classify("- a").unwrap().number_range(), None);
    }

    #[rstest]
    #[case("-", Some(false))]
    #[case("- ", Some(false))]
    #[case("3.", Some(false))]
    #[case("> ", Some(false))]
    #[case("    -  ", Some(true))]
    #[case("\t2) ", Some(true))]
    #[case("- x", None)]
    #[case("", None)]
    fn recognises_bare_markers(#[case] line: &str, #[case] indented: Option<bool>) {
        assert_eq!(bare_marker(line).map(|b| b.indented), indented);
    }
}
