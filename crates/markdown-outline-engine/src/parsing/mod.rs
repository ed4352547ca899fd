//! # Line Parsing
//!
//! Line-oriented markdown scanning for the reference host.
//!
//! The list continuation engine never parses markdown itself. It reads the
//! per-line state the host's tokenizer produces, the same way an editor
//! plugin reads its editor's mode state. This module is that tokenizer.
//!
//! - **`rope`**: line iteration and byte spans over the `xi_rope::Rope` buffer
//! - **`kinds`**: syntax knowledge for blockquote prefixes and code fences
//! - **`tokenizer`**: `MarkdownTokenizer` state machine and the `TokenState`
//!   it hands out (optionally wrapped in an overlay)

pub mod kinds;
pub mod rope;
pub mod tokenizer;

pub use tokenizer::{ListContext, MarkdownState, MarkdownTokenizer, TokenState};
