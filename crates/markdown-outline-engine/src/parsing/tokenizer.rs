use xi_rope::Rope;

use super::kinds::{BlockQuote, CodeFence, FenceKind};
use super::rope::lines_with_spans;
use crate::outline::classify::{Marker, classify, is_blank};

/// List membership carried from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListContext {
    /// Nesting level, 1 for a top-level item.
    pub depth: usize,
    /// Value of the ordered marker on this line, if it has one.
    pub order: Option<u64>,
}

/// Parser state after a line, as the markdown mode tracks it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownState {
    pub list: Option<ListContext>,
    /// Number of `>` prefixes in effect.
    pub quote: u8,
    /// Leading whitespace width, rounded down to a multiple of the tab size.
    pub indentation: usize,
    /// Open code fence, if any.
    pub fence: Option<FenceKind>,
}

/// Token state handed to callers.
///
/// When another mode is layered on top of markdown the real state sits
/// inside an `Overlay`; consumers unwrap it with [`TokenState::base`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    Markdown(MarkdownState),
    Overlay {
        base: Box<TokenState>,
        overlay: String,
    },
}

impl TokenState {
    /// Unwraps any number of overlay layers down to the markdown state.
    pub fn base(&self) -> &MarkdownState {
        let mut state = self;
        loop {
            match state {
                TokenState::Markdown(md) => return md,
                TokenState::Overlay { base, .. } => state = base,
            }
        }
    }
}

/// Line-by-line markdown state machine.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownTokenizer {
    pub tab_size: usize,
}

impl MarkdownTokenizer {
    pub fn new(tab_size: usize) -> Self {
        Self {
            tab_size: tab_size.max(1),
        }
    }

    /// Visual width of the line's leading whitespace, tabs expanded.
    pub fn indent_width(&self, line: &str) -> usize {
        let mut width = 0;
        for c in line.chars() {
            match c {
                ' ' => width += 1,
                '\t' => width += self.tab_size - width % self.tab_size,
                _ => break,
            }
        }
        width
    }

    /// Advances the state machine by one line.
    pub fn next_state(&self, prev: &MarkdownState, line: &str) -> MarkdownState {
        let width = self.indent_width(line);
        let indentation = width / self.tab_size * self.tab_size;

        // Inside a fence nothing is markdown; the list context of the opener
        // carries through so fenced code inside an item stays in the item.
        if let Some(kind) = prev.fence {
            let fence = if CodeFence::closes(kind, line) {
                None
            } else {
                Some(kind)
            };
            return MarkdownState {
                list: prev.list.map(|ctx| ListContext { order: None, ..ctx }),
                quote: 0,
                indentation,
                fence,
            };
        }

        if is_blank(line) {
            return MarkdownState {
                list: prev.list.map(|ctx| ListContext { order: None, ..ctx }),
                quote: 0,
                indentation,
                fence: None,
            };
        }

        if let Some(kind) = CodeFence::sig(line) {
            let list = if width > 0 { prev.list } else { None };
            return MarkdownState {
                list: list.map(|ctx| ListContext { order: None, ..ctx }),
                quote: 0,
                indentation,
                fence: Some(kind),
            };
        }

        match classify(line) {
            Some(prefix) if matches!(prefix.marker, Marker::Quote(_)) => {
                let depth = BlockQuote::depth(line);
                MarkdownState {
                    list: None,
                    quote: depth,
                    indentation,
                    fence: None,
                }
            }
            Some(prefix) => MarkdownState {
                list: Some(ListContext {
                    depth: width / self.tab_size + 1,
                    order: prefix.order_value(),
                }),
                quote: 0,
                indentation,
                fence: None,
            },
            None => {
                // Indented text continues the open item; anything flush left
                // ends the list. Quotes continue lazily.
                let list = if width > 0 {
                    prev.list.map(|ctx| ListContext { order: None, ..ctx })
                } else {
                    None
                };
                MarkdownState {
                    list,
                    quote: prev.quote,
                    indentation,
                    fence: None,
                }
            }
        }
    }

    /// State after `line`, computed from the top of the rope.
    ///
    /// Lines past the end of the rope are treated as blank.
    pub fn state_after(&self, rope: &Rope, line: usize) -> MarkdownState {
        let mut state = MarkdownState::default();
        let mut seen = 0usize;
        for lr in lines_with_spans(rope).take(line + 1) {
            state = self.next_state(&state, &lr.text);
            seen = lr.number + 1;
        }
        for _ in seen..=line {
            state = self.next_state(&state, "");
        }
        state
    }

    /// States after every line of the rope, in order.
    pub fn states(&self, rope: &Rope) -> Vec<MarkdownState> {
        let mut state = MarkdownState::default();
        lines_with_spans(rope)
            .map(|lr| {
                state = self.next_state(&state, &lr.text);
                state.clone()
            })
            .collect()
    }
}

impl Default for MarkdownTokenizer {
    fn default() -> Self {
        Self::new(4)
    }
}
