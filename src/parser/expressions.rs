//! Expression parsing implementation
//!
//! Precedence, lowest to highest:
//!
//! 1. comparison: `== != < <= > >=`
//! 2. additive: `+ -`
//! 3. multiplicative: `* /`
//! 4. factor: literals, identifiers, calls, parenthesized expressions
//!
//! Every level is left-associative and folds into nested
//! [`AstNode::BinaryOp`] nodes, comparisons included: `a < b < c` compares
//! the result of `a < b` against `c`.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};

impl<'t> Parser<'t> {
    /// Parse expression (top-level entry point)
    ///
    /// Parentheses and call arguments come back through here, so this is
    /// where expression nesting is counted.
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.nested(|parser| parser.parse_comparison())
    }

    /// Parse comparison (RELOP)
    fn parse_comparison(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_additive()?;

        while self.check(TokenKind::RelOp) {
            let token = self.expect(TokenKind::RelOp, None)?;
            let right = self.parse_additive()?;
            left = Self::binary(&token, left, right)?;
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while self.check_literal(TokenKind::Op, "+") || self.check_literal(TokenKind::Op, "-") {
            let token = self.expect(TokenKind::Op, None)?;
            let right = self.parse_multiplicative()?;
            left = Self::binary(&token, left, right)?;
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_factor()?;

        while self.check_literal(TokenKind::Op, "*") || self.check_literal(TokenKind::Op, "/") {
            let token = self.expect(TokenKind::Op, None)?;
            let right = self.parse_factor()?;
            left = Self::binary(&token, left, right)?;
        }

        Ok(left)
    }

    /// Build a binary node, located at its left operand.
    fn binary(token: &Token, left: AstNode, right: AstNode) -> Result<AstNode, ParseError> {
        let op = BinOp::from_symbol(&token.text).ok_or_else(|| {
            ParseError::syntax(
                format!("unknown operator '{}'", token.text),
                Some(token.offset),
            )
        })?;
        let offset = left.offset().unwrap_or(token.offset);

        Ok(AstNode::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            offset,
        })
    }

    /// Parse factor: literal, identifier, call, or ( expr )
    fn parse_factor(&mut self) -> Result<AstNode, ParseError> {
        let token = self.current();

        match token.kind {
            TokenKind::Number => {
                self.position += 1;
                Ok(AstNode::Number(token.text, token.offset))
            }
            TokenKind::String => {
                self.position += 1;
                Ok(AstNode::StringLiteral(token.text, token.offset))
            }
            TokenKind::Ident if self.peek().is(TokenKind::Op, "(") => self.parse_function_call(),
            TokenKind::Ident => {
                if !self.is_declared(&token.text) {
                    return Err(ParseError::undefined_variable(&token.text, token.offset));
                }
                self.position += 1;
                Ok(AstNode::Identifier(token.text, token.offset))
            }
            TokenKind::Op if token.text == "(" => {
                self.expect_op("(")?;
                let inner = self.parse_expression()?;
                self.expect_op(")")?;
                Ok(inner)
            }
            kind => Err(ParseError::syntax(
                format!("unexpected symbol in expression: {}", kind),
                Some(token.offset),
            )),
        }
    }

    /// Parse function call: name(args)
    fn parse_function_call(&mut self) -> Result<AstNode, ParseError> {
        let callee = self.current();
        if !self.is_declared(&callee.text) {
            return Err(ParseError::undefined_function(&callee.text, callee.offset));
        }
        self.expect_identifier()?;
        self.expect_op("(")?;

        let mut args = Vec::new();
        if !self.check_literal(TokenKind::Op, ")") {
            args.push(self.parse_expression()?);
            while self.check_literal(TokenKind::Op, ",") {
                self.expect_op(",")?;
                args.push(self.parse_expression()?);
            }
        }
        self.expect_op(")")?;

        Ok(AstNode::FunctionCall {
            name: callee.text,
            args,
            offset: callee.offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{parse, ParseError};

    /// Parse `source` after declaring `names` at the top level.
    fn parse_with(names: &[&str], source: &str) -> Result<Program, ParseError> {
        let prelude: String = names.iter().map(|n| format!("{} = 0\n", n)).collect();
        let program = parse(&tokenize(&format!("{}{}", prelude, source)).unwrap())?;
        Ok(Program {
            statements: program.statements[names.len()..].to_vec(),
        })
    }

    fn expr(names: &[&str], source: &str) -> AstNode {
        let program = parse_with(names, source).unwrap();
        assert_eq!(program.statements.len(), 1);
        program.statements[0].clone()
    }

    fn shape(node: &AstNode) -> String {
        match node {
            AstNode::BinaryOp {
                op, left, right, ..
            } => format!("({} {} {})", op.symbol(), shape(left), shape(right)),
            AstNode::FunctionCall { name, args, .. } => {
                let args: Vec<String> = args.iter().map(shape).collect();
                format!("{}({})", name, args.join(", "))
            }
            other => other.value().unwrap_or_default().to_string(),
        }
    }

    #[test]
    fn test_precedence() {
        let node = expr(&["a", "b", "c"], "a + b * c");
        assert_eq!(shape(&node), "(+ a (* b c))");

        let node = expr(&["a", "b", "c"], "(a + b) * c");
        assert_eq!(shape(&node), "(* (+ a b) c)");

        let node = expr(&["a", "b"], "a + 1 < b * 2");
        assert_eq!(shape(&node), "(< (+ a 1) (* b 2))");
    }

    #[test]
    fn test_nested_calls_hit_nesting_limit() {
        let source = format!("{}1{}", "f(".repeat(300), ")".repeat(300));
        let err = parse_with(&["f"], &source).unwrap_err();
        assert!(matches!(err, ParseError::Internal { .. }));

        let source = format!("{}1{}", "f(".repeat(50), ")".repeat(50));
        assert!(parse_with(&["f"], &source).is_ok());
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(shape(&expr(&["a"], "a - 1 - 2")), "(- (- a 1) 2)");
        assert_eq!(shape(&expr(&["a"], "a / 2 / 3")), "(/ (/ a 2) 3)");
    }

    #[test]
    fn test_chained_comparison_nests_left() {
        let node = expr(&["a", "b", "c"], "a < b < c");
        assert_eq!(shape(&node), "(< (< a b) c)");

        match node {
            AstNode::BinaryOp {
                op: BinOp::Lt,
                left,
                right,
                ..
            } => {
                assert_eq!(left.kind(), NodeKind::BinaryOp);
                assert_eq!(*right, AstNode::Identifier("c".to_string(), 26));
            }
            other => panic!("Expected comparison, got {:?}", other),
        }
    }

    #[test]
    fn test_literals_keep_raw_text() {
        let program = parse_with(&[], "s = 'hi'\nn = 2.50").unwrap();

        match &program.statements[0] {
            AstNode::Assignment { value, .. } => {
                assert_eq!(**value, AstNode::StringLiteral("'hi'".to_string(), 4));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
        match &program.statements[1] {
            AstNode::Assignment { value, .. } => {
                assert_eq!(**value, AstNode::Number("2.50".to_string(), 13));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_function_call_arguments() {
        let node = expr(&["f", "x"], "f(x, 1 + 2, 'a')");
        assert_eq!(shape(&node), "f(x, (+ 1 2), 'a')");

        let node = expr(&["f"], "f()");
        assert_eq!(shape(&node), "f()");
    }

    #[test]
    fn test_nested_calls() {
        let node = expr(&["f", "g"], "f(g(1), 2)");
        assert_eq!(shape(&node), "f(g(1), 2)");
    }

    #[test]
    fn test_undefined_variable() {
        let err = parse_with(&[], "y = x").unwrap_err();
        assert_eq!(
            err,
            ParseError::Semantic {
                name: "x".to_string(),
                message: "undefined variable 'x'".to_string(),
                offset: 4,
            }
        );
    }

    #[test]
    fn test_undefined_function() {
        let err = parse_with(&[], "add(1, 2)").unwrap_err();
        assert_eq!(
            err,
            ParseError::Semantic {
                name: "add".to_string(),
                message: "undefined function 'add'".to_string(),
                offset: 0,
            }
        );
    }

    #[test]
    fn test_undefined_name_inside_arguments() {
        let err = parse_with(&["f"], "f(1, zz)").unwrap_err();
        assert!(matches!(err, ParseError::Semantic { ref name, .. } if name == "zz"));
    }

    #[test]
    fn test_unexpected_symbol() {
        let err = parse_with(&["a"], "a + )").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                message: "unexpected symbol in expression: OP".to_string(),
                offset: Some(10),
            }
        );
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        let err = parse_with(&["a"], "(a + 1").unwrap_err();
        assert_eq!(err.message(), "expected ')' but reached end of input");
    }

    #[test]
    fn test_keyword_inside_expression() {
        let err = parse_with(&[], "x = if").unwrap_err();
        assert_eq!(err.message(), "unexpected symbol in expression: KEYWORD");
    }
}
