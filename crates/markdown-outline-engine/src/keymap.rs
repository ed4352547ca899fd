//! Key bindings for the list commands.

use std::collections::HashMap;

use crate::editing::{BuiltinCommand, Host};
use crate::error::EditError;
use crate::outline::{Command, Outcome};

/// Keys the list engine binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Tab,
    ShiftTab,
}

/// A list command plus the host command to run when it passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub command: Command,
    pub fallback: BuiltinCommand,
}

/// Maps keys to list commands.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<Key, Binding>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Self::empty();
        keymap.insert(
            Key::Enter,
            Command::NewlineAndIndentContinueList,
            BuiltinCommand::NewlineAndIndent,
        );
        keymap.insert(Key::Tab, Command::IndentListMore, BuiltinCommand::InsertTab);
        keymap.insert(
            Key::ShiftTab,
            Command::IndentListLess,
            BuiltinCommand::IndentLess,
        );
        keymap
    }
}

impl Keymap {
    /// A keymap with nothing bound.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Binds `key` to the command registered under `name`.
    pub fn bind(
        &mut self,
        key: Key,
        name: &str,
        fallback: BuiltinCommand,
    ) -> Result<(), EditError> {
        let command = name.parse::<Command>()?;
        self.insert(key, command, fallback);
        Ok(())
    }

    pub fn unbind(&mut self, key: Key) -> Option<Binding> {
        self.bindings.remove(&key)
    }

    pub fn binding(&self, key: Key) -> Option<Binding> {
        self.bindings.get(&key).copied()
    }

    /// Runs the command bound to `key`, then the binding's fallback if the
    /// command passed. Returns `Pass` only when nothing is bound.
    pub fn handle<H: Host + ?Sized>(&self, host: &mut H, key: Key) -> Result<Outcome, EditError> {
        let Some(binding) = self.binding(key) else {
            log::trace!("{key:?} is not bound");
            return Ok(Outcome::Pass);
        };
        if binding.command.run(host)? == Outcome::Pass {
            log::debug!(
                "{} passed, running {}",
                binding.command,
                binding.fallback.name()
            );
            host.exec_builtin(binding.fallback)?;
        }
        Ok(Outcome::Applied)
    }

    fn insert(&mut self, key: Key, command: Command, fallback: BuiltinCommand) {
        self.bindings.insert(key, Binding { command, fallback });
    }
}
