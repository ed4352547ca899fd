//! Keeps ordered list numbers contiguous after indent and outdent.
//!
//! The walk is a single top-to-bottom pass. Nesting is tracked with an
//! explicit stack of frames instead of recursion, so list depth never turns
//! into call-stack depth.

use crate::editing::{Host, Position};
use crate::error::EditError;
use crate::outline::classify::classify;
use crate::outline::state::state_after;

/// One nesting level being renumbered.
#[derive(Debug, Clone, Copy)]
struct Frame {
    depth: usize,
    /// Number the next ordered item at this depth should carry. `None`
    /// adopts whatever the first ordered item says.
    expected: Option<u64>,
    /// Whether a deeper run has been entered from this frame.
    entered_child: bool,
}

impl Frame {
    fn new(depth: usize, expected: Option<u64>) -> Self {
        Self {
            depth,
            expected,
            entered_child: false,
        }
    }
}

/// Renumbers the run that `start` belongs to, descending into deeper runs
/// (which restart at 1). Returns the index of the first line not consumed:
/// the first line shallower than the start line, or the line count.
///
/// With `reset_to_one` the start line's run restarts at 1; otherwise it
/// continues from the start line's own number.
pub fn renumber<H: Host + ?Sized>(
    host: &mut H,
    start: usize,
    reset_to_one: bool,
) -> Result<usize, EditError> {
    let state = state_after(host, start);
    let expected = if reset_to_one {
        Some(1)
    } else {
        state.list_order
    };
    walk(host, start, Frame::new(state.list_depth, expected))
}

/// Walks upward from `line` and returns the nearest line above it that is
/// shallower, i.e. the line a renumbering pass has to start from once
/// `line` has changed depth. `None` when the run reaches the top of the
/// buffer.
pub fn find_list_anchor<H: Host + ?Sized>(host: &H, line: usize) -> Option<usize> {
    let depth = state_after(host, line).list_depth;
    (0..line)
        .rev()
        .find(|&i| state_after(host, i).list_depth < depth)
}

/// Renumbers everything affected by a depth change of `line`.
pub fn renumber_from<H: Host + ?Sized>(host: &mut H, line: usize) -> Result<usize, EditError> {
    match find_list_anchor(host, line) {
        Some(anchor) => {
            log::debug!("renumbering from anchor line {anchor} (changed line {line})");
            renumber(host, anchor, false)
        }
        None => {
            // No shallower ancestor: the run starts at the top of the buffer
            let depth = state_after(host, line).list_depth;
            log::debug!("renumbering from top of buffer at depth {depth}");
            walk(host, 0, Frame::new(depth, None))
        }
    }
}

fn walk<H: Host + ?Sized>(host: &mut H, start: usize, root: Frame) -> Result<usize, EditError> {
    let mut stack = vec![root];
    let mut line = start;
    let count = host.line_count();

    while line < count {
        let state = state_after(host, line);
        let Some(frame) = stack.last_mut() else {
            return Ok(line);
        };

        if state.list_depth == frame.depth {
            // A depth-0 root owns only the list directly below it
            if frame.depth == 0 && frame.entered_child {
                return Ok(line);
            }
            if state.in_list && !state.in_code && state.list_order.is_some() {
                renumber_line(host, line, frame)?;
            }
            line += 1;
        } else if state.list_depth > frame.depth {
            frame.entered_child = true;
            // A list under plain text keeps its own start number
            let expected = if frame.depth == 0 { None } else { Some(1) };
            stack.push(Frame::new(state.list_depth, expected));
        } else {
            stack.pop();
            if stack.is_empty() {
                return Ok(line);
            }
        }
    }
    Ok(count)
}

fn renumber_line<H: Host + ?Sized>(
    host: &mut H,
    line: usize,
    frame: &mut Frame,
) -> Result<(), EditError> {
    let Some(prefix) = host.line(line).and_then(|text| classify(&text)) else {
        return Ok(());
    };
    let (Some(value), Some(range)) = (prefix.order_value(), prefix.number_range()) else {
        return Ok(());
    };

    let want = frame.expected.unwrap_or(value);
    if value != want {
        log::debug!("line {line}: renumbering {value} -> {want}");
        host.replace_range(
            &want.to_string(),
            Position::new(line, range.start),
            Position::new(line, range.end),
        )?;
    }
    frame.expected = Some(want.saturating_add(1));
    Ok(())
}
