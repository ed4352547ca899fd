use std::borrow::Cow;
use std::cell::RefCell;

use xi_rope::delta::{DeltaElement, Transformer};
use xi_rope::rope::LinesMetric;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::commands::{Cmd, compile_command};
use crate::editing::selection::normalize;
use crate::editing::{
    BuiltinCommand, Host, IndentDirection, Patch, Position, SelectionRange,
};
use crate::error::EditError;
use crate::parsing::rope::Span;
use crate::parsing::{MarkdownState, MarkdownTokenizer, TokenState};

/// Editor settings that change how the document indents and tokenizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Columns per indentation level; also the width of a tab stop.
    pub tab_size: usize,
    /// Indent with `\t` instead of `tab_size` spaces.
    pub indent_with_tabs: bool,
    /// Turns every list-aware command into a pass-through.
    pub disable_input: bool,
    /// Name of a mode layered over markdown. When set, token states are
    /// handed out wrapped in [`TokenState::Overlay`].
    pub overlay: Option<String>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            indent_with_tabs: false,
            disable_input: false,
            overlay: None,
        }
    }
}

/// Cursor motions used by interactive front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

/// A markdown buffer with multiple selections.
///
/// - **Single source of truth**: the whole text lives in one `xi_rope::Rope`
/// - **Command-based editing**: every change is a [`Cmd`] compiled to a
///   `Delta`, and every selection is carried through that delta
/// - **Lossless**: `to_bytes()` returns exactly what was loaded plus edits
///
/// Token states are computed top-down on request and cached per line. An
/// edit drops the cached states from its first changed line on, since a
/// line's state depends only on the lines above it.
#[derive(Debug, Clone)]
pub struct Document {
    /// xi-rope buffer containing entire document as UTF-8 bytes
    pub(crate) buffer: Rope,
    /// Sorted, disjoint selections
    pub(crate) selections: Vec<SelectionRange>,
    /// Version counter incremented on each edit
    pub(crate) version: u64,
    pub(crate) options: DocumentOptions,
    pub(crate) tokenizer: MarkdownTokenizer,
    /// `line_states[i]` is the state after line `i`; a valid prefix only.
    line_states: RefCell<Vec<MarkdownState>>,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    pub fn from_text(text: &str) -> Self {
        let buffer = Rope::from(text);
        let options = DocumentOptions::default();
        let mut doc = Self {
            buffer,
            selections: Vec::new(),
            version: 0,
            tokenizer: MarkdownTokenizer::new(options.tab_size),
            options,
            line_states: RefCell::default(),
        };
        // Start with the cursor at the end, like the editors this mimics
        let end = doc.position_of(doc.len());
        doc.selections = vec![SelectionRange::cursor(end)];
        doc
    }

    pub fn with_options(mut self, options: DocumentOptions) -> Self {
        self.tokenizer = MarkdownTokenizer::new(options.tab_size);
        self.options = options;
        self.line_states.get_mut().clear();
        self
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    pub fn selections(&self) -> Vec<SelectionRange> {
        self.selections.clone()
    }

    /// Replaces all selections. Positions are clamped into the document,
    /// then sorted and merged.
    pub fn set_selections(&mut self, ranges: Vec<SelectionRange>) {
        let ranges: Vec<SelectionRange> = ranges
            .into_iter()
            .map(|r| SelectionRange::new(self.clamp(r.anchor), self.clamp(r.head)))
            .collect();
        self.selections = normalize(ranges);
        if self.selections.is_empty() {
            self.selections = vec![SelectionRange::cursor(Position::default())];
        }
    }

    pub fn set_cursor(&mut self, at: Position) {
        self.set_selections(vec![SelectionRange::cursor(at)]);
    }

    /// Head of the first selection.
    pub fn primary_cursor(&self) -> Position {
        self.selections
            .first()
            .map(|r| r.head)
            .unwrap_or_default()
    }

    pub fn line_count(&self) -> usize {
        self.buffer.measure::<LinesMetric>() + 1
    }

    /// Byte span of a line's content, terminator excluded.
    pub fn line_span(&self, line: usize) -> Option<Span> {
        let count = self.line_count();
        if line >= count {
            return None;
        }
        let start = self.buffer.offset_of_line(line);
        let mut end = if line + 1 < count {
            self.buffer.offset_of_line(line + 1) - 1
        } else {
            self.buffer.len()
        };
        if end > start && self.buffer.slice_to_cow(end - 1..end) == "\r" {
            end -= 1;
        }
        Some(Span { start, end })
    }

    pub fn line_text(&self, line: usize) -> Option<Cow<'_, str>> {
        self.line_span(line)
            .map(|span| self.slice_to_cow(span.into()))
    }

    /// Byte offset of a position. The column must fall on a character
    /// boundary inside the line.
    pub fn offset_of(&self, pos: Position) -> Result<usize, EditError> {
        let span = self
            .line_span(pos.line)
            .ok_or(EditError::InvalidPosition(pos))?;
        if pos.column > span.len() {
            return Err(EditError::InvalidPosition(pos));
        }
        let text = self.slice_to_cow(span.into());
        if !text.is_char_boundary(pos.column) {
            return Err(EditError::InvalidPosition(pos));
        }
        Ok(span.offset_of(pos.column))
    }

    pub fn position_of(&self, offset: usize) -> Position {
        let offset = offset.min(self.buffer.len());
        let line = self.buffer.line_of_offset(offset);
        let start = self.buffer.offset_of_line(line);
        let max = self.line_span(line).map_or(0, |span| span.len());
        Position::new(line, (offset - start).min(max))
    }

    /// Apply a command, carrying every selection through the edit.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let delta = compile_command(self, &cmd)?;

        // Selection offsets must be read against the old buffer
        let mut offsets = Vec::with_capacity(self.selections.len());
        for range in &self.selections {
            offsets.push((self.offset_of(range.anchor)?, self.offset_of(range.head)?));
        }

        let changed = changed_ranges(&delta);
        if let Some(offset) = first_edit_offset(&delta) {
            let line = self.buffer.line_of_offset(offset);
            self.line_states.get_mut().truncate(line);
        }
        self.buffer = delta.apply(&self.buffer);

        let mut transformer = Transformer::new(&delta);
        let ranges: Vec<SelectionRange> = match cmd {
            Cmd::ReplaceSelections { .. } => offsets
                .iter()
                .map(|&(anchor, head)| {
                    let end = transformer.transform(anchor.max(head), true);
                    SelectionRange::cursor(self.position_of(end))
                })
                .collect(),
            _ => offsets
                .iter()
                .map(|&(anchor, head)| {
                    SelectionRange::new(
                        self.position_of(transformer.transform(anchor, true)),
                        self.position_of(transformer.transform(head, true)),
                    )
                })
                .collect(),
        };
        self.selections = normalize(ranges);
        self.version += 1;

        log::trace!("applied edit, version {}", self.version);

        Ok(Patch {
            changed,
            selections: self.selections.clone(),
            version: self.version,
        })
    }

    /// Types text at every selection.
    pub fn insert_text(&mut self, text: &str) -> Result<Patch, EditError> {
        let replacements = vec![text.to_string(); self.selections.len()];
        self.apply(Cmd::ReplaceSelections { replacements })
    }

    /// Backspace: deletes each selection, or the character before each cursor.
    pub fn delete_backward(&mut self) -> Result<Patch, EditError> {
        let mut edits = Vec::with_capacity(self.selections.len());
        for range in &self.selections {
            let to = self.offset_of(range.to())?;
            let from = if range.is_empty() {
                self.previous_boundary(range.head)?
            } else {
                self.offset_of(range.from())?
            };
            edits.push((from..to, String::new()));
        }
        self.apply(Cmd::ReplaceRanges { edits })
    }

    /// Moves every cursor, dropping any selected text.
    pub fn move_cursor(&mut self, motion: Motion) {
        let moved = self
            .selections
            .iter()
            .map(|r| SelectionRange::cursor(self.step(r.head, motion)))
            .collect();
        self.set_selections(moved);
    }

    /// Whitespace inserted for one indentation level.
    pub fn indent_unit(&self) -> String {
        if self.options.indent_with_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.options.tab_size)
        }
    }

    /// Markdown state after `line`, extending the cache as far as needed.
    /// Lines past the end read as blank and are not cached.
    pub fn markdown_state_after(&self, line: usize) -> MarkdownState {
        let mut states = self.line_states.borrow_mut();
        let last = line.min(self.line_count() - 1);
        while states.len() <= last {
            let prev = states.last().cloned().unwrap_or_default();
            let text = self.line_text(states.len()).unwrap_or_default();
            let next = self.tokenizer.next_state(&prev, text.trim_end_matches('\r'));
            states.push(next);
        }
        let mut state = states.get(last).cloned().unwrap_or_default();
        for _ in last..line {
            state = self.tokenizer.next_state(&state, "");
        }
        state
    }

    /// Slice the buffer to a cow string
    pub(crate) fn slice_to_cow(&self, range: std::ops::Range<usize>) -> Cow<'_, str> {
        let doc_len = self.buffer.len();

        // Clamp range to document bounds to prevent xi-rope panic
        let start = range.start.min(doc_len);
        let end = range.end.min(doc_len).max(start);

        self.buffer.slice_to_cow(start..end)
    }

    fn clamp(&self, pos: Position) -> Position {
        let last = self.line_count() - 1;
        let line = pos.line.min(last);
        let text = self.line_text(line).unwrap_or_default();
        let mut column = pos.column.min(text.len());
        while !text.is_char_boundary(column) {
            column -= 1;
        }
        Position::new(line, column)
    }

    fn previous_boundary(&self, pos: Position) -> Result<usize, EditError> {
        let offset = self.offset_of(pos)?;
        if pos.column == 0 {
            // Join with the previous line, swallowing "\n" or "\r\n"
            return Ok(match pos.line.checked_sub(1) {
                Some(prev) => self.line_span(prev).map_or(offset, |span| span.end),
                None => offset,
            });
        }
        let text = self.line_text(pos.line).unwrap_or_default();
        let char_len = text[..pos.column]
            .chars()
            .next_back()
            .map_or(0, char::len_utf8);
        Ok(offset - char_len)
    }

    fn step(&self, pos: Position, motion: Motion) -> Position {
        let text = self.line_text(pos.line).unwrap_or_default();
        match motion {
            Motion::Left => match text[..pos.column].chars().next_back() {
                Some(c) => Position::new(pos.line, pos.column - c.len_utf8()),
                None if pos.line > 0 => {
                    let prev = self.line_text(pos.line - 1).unwrap_or_default();
                    Position::new(pos.line - 1, prev.len())
                }
                None => pos,
            },
            Motion::Right => match text[pos.column..].chars().next() {
                Some(c) => Position::new(pos.line, pos.column + c.len_utf8()),
                None if pos.line + 1 < self.line_count() => Position::new(pos.line + 1, 0),
                None => pos,
            },
            Motion::Up if pos.line > 0 => self.clamp(Position::new(pos.line - 1, pos.column)),
            Motion::Down => self.clamp(Position::new(pos.line + 1, pos.column)),
            Motion::Up => Position::new(0, 0),
            Motion::LineStart => Position::new(pos.line, 0),
            Motion::LineEnd => Position::new(pos.line, text.len()),
        }
    }

    fn newline_and_indent(&mut self) -> Result<(), EditError> {
        let mut replacements = Vec::with_capacity(self.selections.len());
        for range in &self.selections {
            let from = range.from();
            let text = self.line_text(from.line).unwrap_or_default();
            let indent: String = text[..from.column]
                .chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect();
            replacements.push(format!("\n{indent}"));
        }
        self.apply(Cmd::ReplaceSelections { replacements })?;
        Ok(())
    }

    fn indent_selected_lines(&mut self, direction: IndentDirection) -> Result<(), EditError> {
        let mut lines = Vec::new();
        for range in &self.selections {
            let (from, to) = (range.from(), range.to());
            // A selection ending at column 0 does not touch its last line
            let last = if to.line > from.line && to.column == 0 {
                to.line - 1
            } else {
                to.line
            };
            lines.extend(from.line..=last);
        }
        self.apply(Cmd::IndentLines { lines, direction })?;
        Ok(())
    }

    fn insert_tab(&mut self) -> Result<(), EditError> {
        let mut replacements = Vec::with_capacity(self.selections.len());
        for range in &self.selections {
            if self.options.indent_with_tabs {
                replacements.push("\t".to_string());
                continue;
            }
            let from = range.from();
            let text = self.line_text(from.line).unwrap_or_default();
            let tab = self.options.tab_size.max(1);
            let column = text[..from.column].chars().fold(0, |col, c| match c {
                '\t' => col + tab - col % tab,
                _ => col + 1,
            });
            replacements.push(" ".repeat(tab - column % tab));
        }
        self.apply(Cmd::ReplaceSelections { replacements })?;
        Ok(())
    }
}

/// Offset of the first byte a delta changes, `None` for an identity delta.
/// Offsets before it are the same in the old and new document.
fn first_edit_offset(delta: &Delta<RopeInfo>) -> Option<usize> {
    let mut offset = 0;
    for op in delta.els.iter() {
        match op {
            DeltaElement::Copy(from, to) if *from == offset => offset = *to,
            _ => return Some(offset),
        }
    }
    (offset < delta.base_len).then_some(offset)
}

/// Ranges in the new document that hold inserted text
fn changed_ranges(delta: &Delta<RopeInfo>) -> Vec<std::ops::Range<usize>> {
    let mut changed = Vec::new();
    let mut cursor = 0;
    for op in delta.els.iter() {
        match op {
            DeltaElement::Copy(from, to) => {
                cursor += to - from;
            }
            DeltaElement::Insert(inserted) => {
                let start = cursor;
                let end = cursor + inserted.len();
                changed.push(start..end);
                cursor = end;
            }
        }
    }
    changed
}

impl Host for Document {
    fn line_count(&self) -> usize {
        Document::line_count(self)
    }

    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        self.line_text(line)
    }

    fn token_state_after(&self, line: usize) -> TokenState {
        let state = TokenState::Markdown(self.markdown_state_after(line));
        match &self.options.overlay {
            Some(name) => TokenState::Overlay {
                base: Box::new(state),
                overlay: name.clone(),
            },
            None => state,
        }
    }

    fn selections(&self) -> Vec<SelectionRange> {
        Document::selections(self)
    }

    fn tab_size(&self) -> usize {
        self.options.tab_size
    }

    fn indent_with_tabs(&self) -> bool {
        self.options.indent_with_tabs
    }

    fn disable_input(&self) -> bool {
        self.options.disable_input
    }

    fn replace_range(
        &mut self,
        text: &str,
        from: Position,
        to: Position,
    ) -> Result<(), EditError> {
        let range = self.offset_of(from)?..self.offset_of(to)?;
        self.apply(Cmd::ReplaceRange {
            range,
            text: text.to_string(),
        })?;
        Ok(())
    }

    fn replace_selections(&mut self, replacements: &[String]) -> Result<(), EditError> {
        self.apply(Cmd::ReplaceSelections {
            replacements: replacements.to_vec(),
        })?;
        Ok(())
    }

    fn indent_line(&mut self, line: usize, direction: IndentDirection) -> Result<(), EditError> {
        self.apply(Cmd::IndentLines {
            lines: vec![line],
            direction,
        })?;
        Ok(())
    }

    fn exec_builtin(&mut self, command: BuiltinCommand) -> Result<(), EditError> {
        log::debug!("running built-in command {}", command.name());
        match command {
            BuiltinCommand::NewlineAndIndent => self.newline_and_indent(),
            BuiltinCommand::IndentMore => self.indent_selected_lines(IndentDirection::More),
            BuiltinCommand::IndentLess => self.indent_selected_lines(IndentDirection::Less),
            BuiltinCommand::InsertTab => self.insert_tab(),
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        // The tokenizer is derived from the options
        self.buffer.to_string() == other.buffer.to_string()
            && self.selections == other.selections
            && self.version == other.version
            && self.options == other.options
    }
}
