/*!
 * # Editing Core Module
 *
 * The host side of the list engine: a text buffer that can be read line by
 * line, edited through commands, and tokenized on demand.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: xi-rope Buffer
 * - The entire document is stored in a single **`xi_rope::Rope`** buffer
 * - Every edit is compiled to a **Delta**; saving writes the rope verbatim
 *
 * ### 2. Command-Based Editing
 * - All edits are **Commands** (`Cmd` enum) that compile to Deltas
 * - A batch of replacements (one per selection) is one Delta, so a
 *   multi-cursor edit is atomic and bumps the version once
 *
 * ### 3. Multiple Selections
 * - Selections are kept sorted and disjoint
 * - Each selection endpoint is carried through every Delta, so structural
 *   edits made between reads never leave a cursor pointing at stale text
 *
 * ### 4. The Host Seam
 * - The list engine only talks to the **`Host`** trait
 * - `Document` implements it; other buffers can too
 *
 * ## Module Structure
 *
 * - **`document`**: `Document` with its rope, selections and built-ins
 * - **`commands`**: `Cmd` enum and delta compilation
 * - **`host`**: `Host` trait, `BuiltinCommand`, `IndentDirection`
 * - **`selection`**: `Position` and `SelectionRange`
 * - **`patch`**: edit result metadata
 *
 * ## Usage Pattern
 *
 * ```rust
 * use markdown_outline_engine::editing::*;
 *
 * let mut doc = Document::from_bytes(b"- Item 1").unwrap();
 * doc.set_cursor(Position::new(0, 8));
 * doc.insert_text("!").unwrap();
 * assert_eq!(doc.text(), "- Item 1!");
 * ```
 */

pub mod commands;
pub mod document;
pub mod host;
pub mod patch;
pub mod selection;

// Public API re-exports
pub use commands::Cmd;
pub use document::{Document, DocumentOptions, Motion};
pub use host::{BuiltinCommand, Host, IndentDirection};
pub use patch::Patch;
pub use selection::{Position, SelectionRange};
