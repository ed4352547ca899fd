use crate::editing::{Host, Position};
use crate::parsing::MarkdownState;

/// What the list engine needs to know about a line's parse state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineState {
    /// Nesting level; 0 outside lists, 1 for top-level items.
    pub list_depth: usize,
    /// Value of the line's ordered marker.
    pub list_order: Option<u64>,
    pub in_list: bool,
    pub in_quote: bool,
    /// Leading whitespace width, a multiple of the tab size.
    pub indentation: usize,
    pub in_code: bool,
}

impl From<&MarkdownState> for LineState {
    fn from(state: &MarkdownState) -> Self {
        Self {
            list_depth: state.list.map_or(0, |ctx| ctx.depth),
            list_order: state.list.and_then(|ctx| ctx.order),
            in_list: state.list.is_some(),
            in_quote: state.quote > 0,
            indentation: state.indentation,
            in_code: state.fence.is_some(),
        }
    }
}

/// State after `line`, read from the host's tokenizer with any overlay
/// stripped. Lines outside the buffer get the default (non-list) state.
pub fn state_after<H: Host + ?Sized>(host: &H, line: usize) -> LineState {
    if line >= host.line_count() {
        return LineState::default();
    }
    let token = host.token_state_after(line);
    let state = LineState::from(token.base());
    log::trace!("state after line {line}: {state:?}");
    state
}

/// State of the line holding `pos`.
pub fn state_at<H: Host + ?Sized>(host: &H, pos: Position) -> LineState {
    state_after(host, pos.line)
}

/// Borrowing view over a host for repeated state reads.
///
/// Every call goes back to the host; nothing is remembered between calls,
/// so reads stay consistent with edits made in between.
pub struct StateLookup<'a, H: Host + ?Sized> {
    host: &'a H,
}

impl<'a, H: Host + ?Sized> StateLookup<'a, H> {
    pub fn new(host: &'a H) -> Self {
        Self { host }
    }

    pub fn state_after(&self, line: usize) -> LineState {
        state_after(self.host, line)
    }

    pub fn state_at(&self, pos: Position) -> LineState {
        state_at(self.host, pos)
    }
}
