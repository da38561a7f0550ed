//! Statement parsing implementation
//!
//! This module handles parsing of statements:
//! - Assignments: `name = expr`
//! - Expression statements (typically calls): `f(x)`
//! - Conditionals: `if expr: block [else: block]`
//! - Function definitions: `def name(params): block`
//! - Returns: `return [expr]`
//!
//! # Blocks
//!
//! A block is whatever single statement follows the `:`. There is no
//! indentation tracking, so the lines after the first one are parsed as
//! siblings of the enclosing statement, outside the block's scope.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl<'t> Parser<'t> {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        self.skip_trivia();
        let token = self.current();

        match token.kind {
            TokenKind::Ident => {
                if self.peek().kind == TokenKind::AssignOp {
                    self.parse_assignment()
                } else {
                    self.parse_expression()
                }
            }
            TokenKind::Keyword if token.text == "if" => self.parse_if_statement(),
            TokenKind::Keyword if token.text == "def" => self.parse_function_definition(),
            TokenKind::Keyword if token.text == "return" => self.parse_return_statement(),
            TokenKind::Eof => Ok(AstNode::Empty),
            kind => Err(ParseError::syntax(
                format!("invalid statement start: {}", kind),
                Some(token.offset),
            )),
        }
    }

    /// Parse assignment: name = expr
    ///
    /// The name is declared only after the value is parsed, so `x = x` needs
    /// an `x` that was already visible.
    fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        let target = self.expect_identifier()?;
        self.expect(TokenKind::AssignOp, None)?;
        let value = self.parse_expression()?;
        self.declare(&target.text);

        Ok(AstNode::Assignment {
            name: target.text,
            value: Box::new(value),
            offset: target.offset,
        })
    }

    /// Parse a block: at most one statement, inside its own scope
    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.nested(|parser| parser.parse_block_body())
    }

    fn parse_block_body(&mut self) -> Result<Block, ParseError> {
        self.with_scope(|parser| {
            parser.skip_trivia();
            let offset = parser.current().offset;

            let ends_block = parser.is_at_end()
                || parser.check_literal(TokenKind::Keyword, "else")
                || parser.check_literal(TokenKind::Keyword, "def");

            let statement = if ends_block {
                None
            } else {
                Some(parser.parse_statement()?)
            };

            Ok(Block {
                statement: statement.filter(|s| !s.is_empty()).map(Box::new),
                offset,
            })
        })
    }

    /// Parse if statement: if condition: block [else: block]
    fn parse_if_statement(&mut self) -> Result<AstNode, ParseError> {
        let offset = self.expect_keyword("if")?.offset;
        // The condition belongs to the enclosing scope.
        let condition = self.parse_expression()?;
        self.expect_op(":")?;
        let then_block = self.parse_block()?;

        self.skip_trivia();
        let else_block = if self.check_literal(TokenKind::Keyword, "else") {
            self.expect_keyword("else")?;
            self.expect_op(":")?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(AstNode::If {
            condition: Box::new(condition),
            then_block,
            else_block,
            offset,
        })
    }

    /// Parse function definition: def name(params): block
    fn parse_function_definition(&mut self) -> Result<AstNode, ParseError> {
        let offset = self.expect_keyword("def")?.offset;
        let name = self.expect_identifier()?.text;

        // Declared in the enclosing scope first so the body can call itself.
        self.declare(&name);
        self.expect_op("(")?;

        let (params, body) = self.with_scope(|parser| {
            let params = parser.parse_parameter_list()?;
            parser.expect_op(")")?;
            parser.expect_op(":")?;
            let body = parser.parse_block()?;
            Ok((params, body))
        })?;

        Ok(AstNode::FunctionDef {
            name,
            params,
            body,
            offset,
        })
    }

    /// Parse parameter list: [name (, name)*]
    fn parse_parameter_list(&mut self) -> Result<ParamList, ParseError> {
        let offset = self.current().offset;
        let mut params = Vec::new();

        if self.check_literal(TokenKind::Op, ")") {
            return Ok(ParamList { params, offset });
        }

        loop {
            let token = self.expect_identifier()?;
            self.declare(&token.text);
            params.push(Param {
                name: token.text,
                offset: token.offset,
            });

            if !self.check_literal(TokenKind::Op, ",") {
                break;
            }
            self.expect_op(",")?;
        }

        Ok(ParamList { params, offset })
    }

    /// Parse return statement: return [expr]
    fn parse_return_statement(&mut self) -> Result<AstNode, ParseError> {
        let offset = self.expect_keyword("return")?.offset;

        let value = if self.current().kind.is_trivia() || self.check(TokenKind::Eof) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        Ok(AstNode::Return { value, offset })
    }
}
