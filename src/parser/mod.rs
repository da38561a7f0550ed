//! Source front-end: tokens, syntax tree, and scope checking
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), with name resolution against [`scope`]
//! - [`ast`]: AST node definitions and the outline view
//! - [`errors`]: The error type shared by both stages
//!
//! # Language
//!
//! - Statements: assignment, `if`/`else`, `def`, `return`, expression statements
//! - Expressions: `+ - * /`, comparisons, calls, numbers, strings, names
//! - A block after `:` holds exactly one statement
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per grammar rule.
//! No external parser generator dependencies.

pub mod ast;
pub mod errors;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod scope;
mod statements;

pub use ast::{AstNode, Program};
pub use errors::{ErrorKind, FrontendError};
pub use lexer::{tokenize, Token, TokenKind};
pub use parse::parse;
