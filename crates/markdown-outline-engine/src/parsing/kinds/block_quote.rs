/// Blockquote syntax: a run of `>` markers, optionally separated by spaces.
pub struct BlockQuote;

impl BlockQuote {
    pub const MARKER: char = '>';

    /// Nesting depth of the quote a line belongs to, 0 when it has no
    /// marker. Leading indentation and spaces between markers are allowed.
    pub fn depth(line: &str) -> u8 {
        line.trim_start_matches([' ', '\t'])
            .chars()
            .take_while(|&c| c == Self::MARKER || c == ' ')
            .filter(|&c| c == Self::MARKER)
            .fold(0u8, |depth, _| depth.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello", 0)]
    #[case("> hello", 1)]
    #[case(">> hello", 2)]
    #[case("> > hello", 2)]
    #[case("\t> indented", 1)]
    #[case("> - quoted item", 1)]
    #[case("a > b", 0)]
    fn counts_markers(#[case] line: &str, #[case] depth: u8) {
        assert_eq!(BlockQuote::depth(line), depth);
    }
}
