//! One full pass of the front-end over a source text
//!
//! Callers re-run [`Analysis::run`] on every change to the source. Tokens are
//! kept even when parsing fails so they can still be highlighted; the tree is
//! present only when both stages succeed.

use crate::parser::{parse, tokenize, FrontendError, Program, Token};

/// Message shown when the source passes every check
pub const CLEAN_MESSAGE: &str = "No syntax or semantic errors found.";

#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub program: Option<Program>,
    pub error: Option<FrontendError>,
}

impl Analysis {
    pub fn run(source: &str) -> Self {
        let tokens = match tokenize(source) {
            Ok(tokens) => tokens,
            Err(err) => {
                return Analysis {
                    tokens: Vec::new(),
                    program: None,
                    error: Some(err.into()),
                };
            }
        };

        match parse(&tokens) {
            Ok(program) => Analysis {
                tokens,
                program: Some(program),
                error: None,
            },
            Err(err) => Analysis {
                tokens,
                program: None,
                error: Some(err.into()),
            },
        }
    }

    /// An analysis that failed before the front-end ran.
    pub fn failed(error: FrontendError) -> Self {
        Analysis {
            tokens: Vec::new(),
            program: None,
            error: Some(error),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }

    /// Tokens worth listing: everything except newlines and comments.
    pub fn visible_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| !t.kind.is_trivia())
    }

    /// One-line summary for a status bar.
    pub fn status_line(&self) -> String {
        match &self.error {
            Some(err) => err.to_string(),
            None => CLEAN_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ErrorKind;

    #[test]
    fn test_clean_source() {
        let analysis = Analysis::run("x = 10\ny = x + 5");
        assert!(analysis.is_clean());
        assert_eq!(analysis.program.as_ref().unwrap().statements.len(), 2);
        assert_eq!(analysis.status_line(), CLEAN_MESSAGE);
    }

    #[test]
    fn test_tokens_survive_parse_failure() {
        let analysis = Analysis::run("y = x # oops");

        assert!(analysis.program.is_none());
        assert_eq!(analysis.tokens.len(), 4);
        assert_eq!(analysis.visible_tokens().count(), 3);
        assert_eq!(
            analysis.error.as_ref().map(|e| e.kind()),
            Some(ErrorKind::Semantic)
        );
        assert_eq!(
            analysis.status_line(),
            "Semantic Error: undefined variable 'x'"
        );
    }

    #[test]
    fn test_lexical_failure_has_no_tokens() {
        let analysis = Analysis::run("x = 1 @ 2");
        assert!(analysis.tokens.is_empty());
        assert!(analysis.program.is_none());
        assert_eq!(analysis.error.unwrap().offset(), Some(6));
    }
}
