//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text coloured by the lexer's tokens, error line marked
//! - [`tree`]: Token list or syntax tree outline
//! - [`status`]: Status bar with the analysis verdict and keybindings
//!
//! Each pane module exports a primary `render_*` function plus the pure
//! helpers it builds its lines with.

pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tree::{render_tree_pane, TreeView};
