//! # Introduction
//!
//! scopeview is the front-end of a small statement language (assignments,
//! `if`/`else`, `def`, `return`, arithmetic, comparisons and calls) together
//! with a terminal viewer for its tokens and syntax tree, built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser (+ scope stack) → AST → Viewer
//! ```
//!
//! 1. [`parser`]: tokenises the source, builds the AST, and rejects
//!    references to names no enclosing scope declares. The first error of any
//!    kind aborts the run.
//! 2. [`analysis`]: one tokenize + parse pass over a source text, keeping the
//!    tokens even when parsing fails.
//! 3. [`cli`]: command-line options for the `scopeview` binary.
//! 4. [`ui`]: ratatui-based viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use scopeview::parser::{parse, tokenize, AstNode};
//!
//! let tokens = tokenize("x = 10\ny = x + 5").unwrap();
//! let program = parse(&tokens).unwrap();
//! assert!(matches!(program.statements[1], AstNode::Assignment { .. }));
//!
//! let tokens = tokenize("y = x").unwrap();
//! assert!(parse(&tokens).is_err());
//! ```

pub mod analysis;
pub mod cli;
pub mod parser;
pub mod sample;
pub mod ui;
