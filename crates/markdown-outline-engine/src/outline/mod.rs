//! # List Continuation
//!
//! The list-aware Enter, Tab and Shift-Tab commands. Everything here talks
//! to the buffer through [`Host`](crate::editing::Host) only.
//!
//! - **`classify`**: parses a line's list or blockquote prefix
//! - **`state`**: reads the host's per-line parser state, overlays unwrapped
//! - **`continuation`**: decides and applies Enter for every selection
//! - **`indent`**: Tab and Shift-Tab on list lines
//! - **`renumber`**: keeps ordered numbers contiguous after depth changes
//! - **`commands`**: named commands and the `Outcome` pass-through sentinel
//!
//! ```rust
//! use markdown_outline_engine::{Command, Document, Outcome, Position};
//!
//! let mut doc = Document::from_text("1. first");
//! doc.set_cursor(Position::new(0, 8));
//! let outcome = Command::NewlineAndIndentContinueList.run(&mut doc).unwrap();
//! assert_eq!(outcome, Outcome::Applied);
//! assert_eq!(doc.text(), "1. first\n2. ");
//! ```

pub mod classify;
pub mod commands;
pub mod continuation;
pub mod indent;
pub mod renumber;
pub mod state;

pub use classify::{BareMarker, Delimiter, ListPrefix, Marker, bare_marker, classify};
pub use commands::{Command, Outcome};
pub use continuation::{Continuation, decide, newline_and_indent_continue_list};
pub use indent::{IndentAction, indent_list};
pub use renumber::{find_list_anchor, renumber, renumber_from};
pub use state::{LineState, StateLookup, state_after, state_at};
