use std::fmt;
use std::str::FromStr;

use crate::editing::{Host, IndentDirection};
use crate::error::EditError;
use crate::outline::continuation::newline_and_indent_continue_list;
use crate::outline::indent::indent_list;

/// Result of running a list command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command handled the key, possibly by running a host command.
    Applied,
    /// Nothing was done; the host should run its default for the key.
    Pass,
}

/// The list-aware commands, registered under stable names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    NewlineAndIndentContinueList,
    IndentListMore,
    IndentListLess,
}

impl Command {
    pub const ALL: [Command; 3] = [
        Command::NewlineAndIndentContinueList,
        Command::IndentListMore,
        Command::IndentListLess,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::NewlineAndIndentContinueList => "newlineAndIndentContinueMarkdownList",
            Command::IndentListMore => "indentMarkdownListMore",
            Command::IndentListLess => "indentMarkdownListLess",
        }
    }

    pub fn run<H: Host + ?Sized>(self, host: &mut H) -> Result<Outcome, EditError> {
        log::debug!("running {}", self.name());
        match self {
            Command::NewlineAndIndentContinueList => newline_and_indent_continue_list(host),
            Command::IndentListMore => indent_list(host, IndentDirection::More),
            Command::IndentListLess => indent_list(host, IndentDirection::Less),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| EditError::UnknownCommand(s.to_string()))
    }
}
