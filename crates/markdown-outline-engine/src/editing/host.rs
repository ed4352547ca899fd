use std::borrow::Cow;

use crate::editing::{Position, SelectionRange};
use crate::error::EditError;
use crate::parsing::TokenState;

/// Direction for a one-level indentation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentDirection {
    More,
    Less,
}

/// The editor's own, list-unaware commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCommand {
    /// Replace every selection with a newline plus the line's indentation.
    NewlineAndIndent,
    /// Indent every selected line by one level.
    IndentMore,
    /// Outdent every selected line by one level.
    IndentLess,
    /// Insert a tab (or spaces to the next tab stop) at every cursor.
    InsertTab,
}

impl BuiltinCommand {
    pub fn name(self) -> &'static str {
        match self {
            BuiltinCommand::NewlineAndIndent => "newlineAndIndent",
            BuiltinCommand::IndentMore => "indentMore",
            BuiltinCommand::IndentLess => "indentLess",
            BuiltinCommand::InsertTab => "insertTab",
        }
    }
}

/// Everything the list engine needs from the editor hosting it.
///
/// [`Document`](crate::editing::Document) is the reference implementation;
/// any buffer that can answer these questions can drive the engine.
pub trait Host {
    /// Number of lines; an empty buffer has one line.
    fn line_count(&self) -> usize;

    /// Text of a line without its terminator.
    fn line(&self, line: usize) -> Option<Cow<'_, str>>;

    /// Parser state after the given line, as the host's tokenizer sees it.
    fn token_state_after(&self, line: usize) -> TokenState;

    /// Current selections, sorted and disjoint.
    fn selections(&self) -> Vec<SelectionRange>;

    fn tab_size(&self) -> usize;

    fn indent_with_tabs(&self) -> bool;

    /// When set, every custom input handler must pass.
    fn disable_input(&self) -> bool;

    fn replace_range(&mut self, text: &str, from: Position, to: Position)
    -> Result<(), EditError>;

    /// Replaces each selection with the replacement at the same index and
    /// leaves a cursor after each inserted text.
    fn replace_selections(&mut self, replacements: &[String]) -> Result<(), EditError>;

    fn indent_line(&mut self, line: usize, direction: IndentDirection) -> Result<(), EditError>;

    fn exec_builtin(&mut self, command: BuiltinCommand) -> Result<(), EditError>;
}
