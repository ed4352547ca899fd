pub mod block_quote;
pub mod code_fence;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind};
