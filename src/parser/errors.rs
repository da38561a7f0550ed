//! Error types surfaced to callers of the front-end
//!
//! [`FrontendError`] unifies the lexer's and the parser's failures so a caller
//! holds one value for "the first thing that went wrong". Lexical, syntax and
//! semantic failures are the three expected kinds; anything else (a file that
//! could not be read, a broken internal invariant) is reported as
//! [`FrontendError::Internal`] instead of being dropped.

use crate::parser::ast::Offset;
use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use std::fmt;

/// Which stage rejected the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Semantic,
    Internal,
}

impl ErrorKind {
    /// Heading used when the error is shown to a user
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Lexical => "Lexical Error",
            ErrorKind::Syntax => "Syntax Error",
            ErrorKind::Semantic => "Semantic Error",
            ErrorKind::Internal => "Unexpected Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontendError {
    Lexical(LexError),
    Syntax {
        message: String,
        offset: Option<Offset>,
    },
    Semantic {
        name: String,
        message: String,
        offset: Offset,
    },
    Internal {
        message: String,
        offset: Option<Offset>,
    },
}

impl FrontendError {
    pub fn internal(message: impl Into<String>) -> Self {
        FrontendError::Internal {
            message: message.into(),
            offset: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FrontendError::Lexical(_) => ErrorKind::Lexical,
            FrontendError::Syntax { .. } => ErrorKind::Syntax,
            FrontendError::Semantic { .. } => ErrorKind::Semantic,
            FrontendError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Character offset the error points at, when there is one
    pub fn offset(&self) -> Option<Offset> {
        match self {
            FrontendError::Lexical(err) => Some(err.offset),
            FrontendError::Syntax { offset, .. } => *offset,
            FrontendError::Semantic { offset, .. } => Some(*offset),
            FrontendError::Internal { offset, .. } => *offset,
        }
    }

    /// The error text without its kind heading
    pub fn message(&self) -> String {
        match self {
            FrontendError::Lexical(err) => err.to_string(),
            FrontendError::Syntax { message, .. }
            | FrontendError::Semantic { message, .. }
            | FrontendError::Internal { message, .. } => message.clone(),
        }
    }
}

impl fmt::Display for FrontendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for FrontendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrontendError::Lexical(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for FrontendError {
    fn from(err: LexError) -> Self {
        FrontendError::Lexical(err)
    }
}

impl From<ParseError> for FrontendError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Syntax { message, offset } => FrontendError::Syntax { message, offset },
            ParseError::Semantic {
                name,
                message,
                offset,
            } => FrontendError::Semantic {
                name,
                message,
                offset,
            },
            ParseError::Internal { message, offset } => FrontendError::Internal {
                message,
                offset: Some(offset),
            },
        }
    }
}

impl From<std::io::Error> for FrontendError {
    fn from(err: std::io::Error) -> Self {
        FrontendError::internal(err.to_string())
    }
}
