//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, token-stream helpers, scope handling, and the main
//! parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser with one method per grammar rule:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: statements, blocks, `if`, `def`, `return`, parameter lists
//! - `expressions`: comparison, additive, multiplicative, factor, calls
//!
//! Name resolution happens while parsing. Every identifier reference is
//! looked up in the scope stack at the point it is read, so a program that
//! uses a name before declaring it fails here, not in a later pass.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::scope::ScopeStack;
use std::fmt;

/// How many parenthesized expressions and blocks may be open at once.
pub const MAX_NESTING: usize = 256;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token stream does not fit the grammar
    Syntax {
        message: String,
        offset: Option<Offset>,
    },

    /// A name is used where no enclosing scope declares it
    Semantic {
        name: String,
        message: String,
        offset: Offset,
    },

    /// The input nests deeper than the parser will follow
    Internal {
        message: String,
        offset: Offset,
    },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, offset: Option<Offset>) -> Self {
        ParseError::Syntax {
            message: message.into(),
            offset,
        }
    }

    pub fn undefined_variable(name: &str, offset: Offset) -> Self {
        ParseError::Semantic {
            name: name.to_string(),
            message: format!("undefined variable '{}'", name),
            offset,
        }
    }

    pub fn undefined_function(name: &str, offset: Offset) -> Self {
        ParseError::Semantic {
            name: name.to_string(),
            message: format!("undefined function '{}'", name),
            offset,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ParseError::Syntax { message, .. }
            | ParseError::Semantic { message, .. }
            | ParseError::Internal { message, .. } => message,
        }
    }

    pub fn offset(&self) -> Option<Offset> {
        match self {
            ParseError::Syntax { offset, .. } => *offset,
            ParseError::Semantic { offset, .. } | ParseError::Internal { offset, .. } => {
                Some(*offset)
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser with integrated scope checking
///
/// A `Parser` lives for exactly one parse: [`parse`] builds a fresh one for
/// every call, so no cursor or scope state is shared between inputs.
pub struct Parser<'t> {
    pub(crate) tokens: &'t [Token],
    pub(crate) position: usize,
    pub(crate) scopes: ScopeStack,
    pub(crate) nesting: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            scopes: ScopeStack::new(),
            nesting: 0,
        }
    }

    /// Parse the entire program
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        self.position = 0;
        self.scopes = ScopeStack::new();
        self.nesting = 0;
        // The global scope stays open for the whole parse.
        self.scopes.push();

        let mut program = Program::new();

        while !self.is_at_end() {
            if self.current().kind.is_trivia() {
                self.position += 1;
                continue;
            }
            let statement = self.parse_statement()?;
            if !statement.is_empty() {
                program.statements.push(statement);
            }
        }

        Ok(program)
    }

    // ===== Scope handling =====

    /// Run `f` inside a freshly pushed scope. The scope is popped again on
    /// every way out of `f`, errors included.
    pub(crate) fn with_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.scopes.push();
        let depth = self.scopes.depth();
        let result = f(self);
        debug_assert_eq!(self.scopes.depth(), depth, "unbalanced scope stack");
        self.scopes.pop();
        result
    }

    /// Run `f` one nesting level deeper, failing once [`MAX_NESTING`] levels
    /// are open. The level is released on every way out of `f`.
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.nesting >= MAX_NESTING {
            return Err(ParseError::Internal {
                message: format!("nesting too deep (more than {} levels)", MAX_NESTING),
                offset: self.current().offset,
            });
        }
        self.nesting += 1;
        let result = f(self);
        self.nesting -= 1;
        result
    }

    pub(crate) fn declare(&mut self, name: &str) {
        self.scopes.declare(name);
    }

    pub(crate) fn is_declared(&self, name: &str) -> bool {
        self.scopes.is_visible(name)
    }

    // ===== Helper methods =====

    /// Offset just past the last real token, where the virtual EOF sits.
    fn end_offset(&self) -> Offset {
        self.tokens.last().map(Token::end).unwrap_or(0)
    }

    /// The token under the cursor, or a virtual EOF past the last token.
    pub(crate) fn current(&self) -> Token {
        match self.tokens.get(self.position) {
            Some(token) => token.clone(),
            None => Token::eof(self.end_offset()),
        }
    }

    /// The token after the current one, or a virtual EOF.
    pub(crate) fn peek(&self) -> Token {
        match self.tokens.get(self.position + 1) {
            Some(token) => token.clone(),
            None => Token::eof(self.end_offset()),
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub(crate) fn check_literal(&self, kind: TokenKind, text: &str) -> bool {
        self.current().is(kind, text)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn skip_trivia(&mut self) {
        while !self.is_at_end() && self.current().kind.is_trivia() {
            self.position += 1;
        }
    }

    /// Consume the current token if it has `kind` (and `text`, when given).
    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        text: Option<&str>,
    ) -> Result<Token, ParseError> {
        let token = self.current();
        if token.kind == kind && text.map_or(true, |t| token.text == t) {
            self.position += 1;
            return Ok(token);
        }

        let expected = match text {
            Some(text) => format!("'{}'", text),
            None => kind.to_string(),
        };
        if token.kind == TokenKind::Eof {
            Err(ParseError::syntax(
                format!("expected {} but reached end of input", expected),
                Some(token.offset),
            ))
        } else {
            Err(ParseError::syntax(
                format!(
                    "expected {} but found '{}' (offset {})",
                    expected,
                    token.text.escape_debug(),
                    token.offset
                ),
                Some(token.offset),
            ))
        }
    }

    pub(crate) fn expect_op(&mut self, symbol: &str) -> Result<Token, ParseError> {
        self.expect(TokenKind::Op, Some(symbol))
    }

    pub(crate) fn expect_keyword(&mut self, keyword: &str) -> Result<Token, ParseError> {
        self.expect(TokenKind::Keyword, Some(keyword))
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<Token, ParseError> {
        self.expect(TokenKind::Ident, None)
    }
}

/// Parse a token sequence into a [`Program`], checking every name reference
/// against the scopes open at that point.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        let tokens = tokenize(source).unwrap();
        parse(&tokens)
    }

    #[test]
    fn test_parse_empty_program() {
        let program = parse(&[]).unwrap();
        assert!(program.statements.is_empty());

        let program = parse_source("\n# only a comment\n\n").unwrap();
        assert!(program.statements.is_empty());
    }

    #[test]
    fn test_current_synthesizes_eof_past_last_token() {
        let tokens = tokenize("ab = 'xy'").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.position = tokens.len();

        let eof = parser.current();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.offset, 9);
        assert_eq!(parser.peek().kind, TokenKind::Eof);
    }

    #[test]
    fn test_expect_reports_found_token() {
        let tokens = tokenize("x + 1").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.position = 1;

        let err = parser.expect_op(":").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                message: "expected ':' but found '+' (offset 2)".to_string(),
                offset: Some(2),
            }
        );
    }

    #[test]
    fn test_expect_reports_end_of_input() {
        let tokens = tokenize("def").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.position = 1;

        let err = parser.expect_identifier().unwrap_err();
        assert_eq!(err.message(), "expected IDENT but reached end of input");
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn test_with_scope_pops_on_error() {
        let tokens = Vec::new();
        let mut parser = Parser::new(&tokens);
        parser.scopes.push();

        let result: Result<(), ParseError> = parser.with_scope(|p| {
            p.declare("inner");
            Err(ParseError::syntax("boom", None))
        });

        assert!(result.is_err());
        assert_eq!(parser.scopes.depth(), 1);
        assert!(!parser.is_declared("inner"));
    }

    #[test]
    fn test_parser_state_resets_between_parses() {
        let tokens = tokenize("x = 1").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.parse_program().unwrap();
        let again = parser.parse_program().unwrap();
        assert_eq!(again.statements.len(), 1);

        // `x` from the first input must not leak into the second.
        let err = parse_source("y = x").unwrap_err();
        assert!(matches!(err, ParseError::Semantic { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_nested_releases_level_on_error() {
        let tokens = Vec::new();
        let mut parser = Parser::new(&tokens);

        let result: Result<(), ParseError> =
            parser.nested(|p| p.nested(|_| Err(ParseError::syntax("boom", None))));

        assert!(result.is_err());
        assert_eq!(parser.nesting, 0);
    }

    #[test]
    fn test_nested_stops_at_limit() {
        let tokens = tokenize("x").unwrap();
        let mut parser = Parser::new(&tokens);
        parser.nesting = MAX_NESTING;

        let err = parser.nested(|_| Ok(())).unwrap_err();
        assert!(matches!(err, ParseError::Internal { offset: 0, .. }));
        assert_eq!(parser.nesting, MAX_NESTING);
    }
}
