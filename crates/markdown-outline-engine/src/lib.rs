pub mod editing;
pub mod error;
pub mod keymap;
pub mod outline;
pub mod parsing;

// Re-export key types for easier usage
pub use editing::{
    BuiltinCommand, Document, DocumentOptions, Host, IndentDirection, Patch, Position,
    SelectionRange,
};
pub use error::EditError;
pub use keymap::{Key, Keymap};
pub use outline::{Command, LineState, ListPrefix, Marker, Outcome};
