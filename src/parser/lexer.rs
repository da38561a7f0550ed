//! Lexer (tokenizer) for scopeview source text
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Token classes are tried in a fixed priority order at every position and the
//! first class that matches wins, regardless of match length. That order is
//! what makes `if` a keyword while `iffy` stays an identifier.
//!
//! `NEWLINE` and `COMMENT` tokens are kept in the stream (the parser treats
//! them as insignificant); runs of other whitespace are dropped.

use std::fmt;

/// Token classes produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    String,
    Number,
    Comment,
    Keyword,
    Ident,
    RelOp,
    AssignOp,
    Op,
    Newline,
    /// Never produced by the lexer; the parser synthesizes it past the last token.
    Eof,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Comment => "COMMENT",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Ident => "IDENT",
            TokenKind::RelOp => "RELOP",
            TokenKind::AssignOp => "ASSIGN_OP",
            TokenKind::Op => "OP",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Eof => "EOF",
        }
    }

    /// Newlines and comments separate statements but carry no meaning.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Comment)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified slice of the source.
///
/// `offset` is the character index (not byte index) of the first character,
/// so renderers can map tokens straight back onto the text they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }

    /// The synthetic end-of-input token.
    pub fn eof(offset: usize) -> Self {
        Self::new(TokenKind::Eof, "", offset)
    }

    /// Character offset one past the token's last character.
    pub fn end(&self) -> usize {
        self.offset + self.text.chars().count()
    }

    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' @{}", self.kind, self.text, self.offset)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub character: char,
    pub offset: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "undefined symbol '{}' at offset {}",
            self.character, self.offset
        )
    }
}

impl std::error::Error for LexError {}

pub const KEYWORDS: [&str; 6] = ["if", "else", "for", "while", "return", "def"];

const RELOPS: [&str; 6] = ["==", "!=", "<=", ">=", "<", ">"];

const OPS: [char; 8] = ['+', '-', '*', '/', '(', ')', ':', ','];

/// One entry of the ordered class table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Emit(TokenKind),
    Skip,
    Mismatch,
}

/// Priority order of the token classes. The scanner walks this table front to
/// back at every position.
const TOKEN_CLASSES: [TokenClass; 11] = [
    TokenClass::Emit(TokenKind::String),
    TokenClass::Emit(TokenKind::Number),
    TokenClass::Emit(TokenKind::Comment),
    TokenClass::Emit(TokenKind::Keyword),
    TokenClass::Emit(TokenKind::Ident),
    TokenClass::Emit(TokenKind::RelOp),
    TokenClass::Emit(TokenKind::AssignOp),
    TokenClass::Emit(TokenKind::Op),
    TokenClass::Emit(TokenKind::Newline),
    TokenClass::Skip,
    TokenClass::Mismatch,
];

/// Word characters for whole-word matching.
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Lexer over a single source string
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            let start = self.position;
            let (class, len) = self.match_class();
            match class {
                TokenClass::Emit(kind) => {
                    let text: String = self.input[start..start + len].iter().collect();
                    tokens.push(Token::new(kind, text, start));
                }
                TokenClass::Skip => {}
                TokenClass::Mismatch => {
                    return Err(LexError {
                        character: self.input[start],
                        offset: start,
                    });
                }
            }
            self.position += len;
        }

        Ok(tokens)
    }

    /// Find the first class in priority order that matches at the current
    /// position, returning it with the match length in characters.
    fn match_class(&self) -> (TokenClass, usize) {
        for class in TOKEN_CLASSES {
            let matched = match class {
                TokenClass::Emit(TokenKind::String) => self.match_string(),
                TokenClass::Emit(TokenKind::Number) => self.match_number(),
                TokenClass::Emit(TokenKind::Comment) => self.match_comment(),
                TokenClass::Emit(TokenKind::Keyword) => self.match_keyword(),
                TokenClass::Emit(TokenKind::Ident) => self.match_ident(),
                TokenClass::Emit(TokenKind::RelOp) => self.match_relop(),
                TokenClass::Emit(TokenKind::AssignOp) => self.match_char(|c| c == '='),
                TokenClass::Emit(TokenKind::Op) => self.match_char(|c| OPS.contains(&c)),
                TokenClass::Emit(TokenKind::Newline) => self.match_char(|c| c == '\n'),
                TokenClass::Emit(TokenKind::Eof) => None,
                TokenClass::Skip => self.match_skip(),
                TokenClass::Mismatch => Some(1),
            };
            if let Some(len) = matched {
                return (class, len);
            }
        }
        (TokenClass::Mismatch, 1)
    }

    /// `"..."` or `'...'` without a raw newline or the closing quote inside.
    fn match_string(&self) -> Option<usize> {
        let quote = self.peek_ahead(0).filter(|c| *c == '"' || *c == '\'')?;
        let mut len = 1;
        loop {
            match self.peek_ahead(len) {
                Some(ch) if ch == quote => return Some(len + 1),
                Some('\n') | None => return None,
                Some(_) => len += 1,
            }
        }
    }

    /// Digits with an optional fraction, ending on a word boundary.
    fn match_number(&self) -> Option<usize> {
        let int_len = self.digits_from(0);
        if int_len == 0 {
            return None;
        }

        if self.peek_ahead(int_len) == Some('.') {
            let frac_len = self.digits_from(int_len + 1);
            if frac_len > 0 {
                let full = int_len + 1 + frac_len;
                if self.at_word_boundary(full) {
                    return Some(full);
                }
            }
        }

        // `.` is never a word character, so the integer part alone ends on a
        // boundary whenever a fraction was attempted.
        self.at_word_boundary(int_len).then_some(int_len)
    }

    /// `#` up to (not including) the end of the line.
    fn match_comment(&self) -> Option<usize> {
        if self.peek_ahead(0) != Some('#') {
            return None;
        }
        let mut len = 1;
        while let Some(ch) = self.peek_ahead(len) {
            if ch == '\n' {
                break;
            }
            len += 1;
        }
        Some(len)
    }

    fn match_keyword(&self) -> Option<usize> {
        KEYWORDS.iter().find_map(|keyword| {
            let len = keyword.chars().count();
            let matches = keyword
                .chars()
                .enumerate()
                .all(|(i, ch)| self.peek_ahead(i) == Some(ch));
            (matches && self.at_word_boundary(len)).then_some(len)
        })
    }

    fn match_ident(&self) -> Option<usize> {
        let first = self.peek_ahead(0)?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        let mut len = 1;
        while let Some(ch) = self.peek_ahead(len) {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                len += 1;
            } else {
                break;
            }
        }
        // A shorter prefix would end right before an ASCII word character,
        // so only the maximal run can end on a boundary.
        self.at_word_boundary(len).then_some(len)
    }

    fn match_relop(&self) -> Option<usize> {
        RELOPS.iter().find_map(|op| {
            let len = op.chars().count();
            op.chars()
                .enumerate()
                .all(|(i, ch)| self.peek_ahead(i) == Some(ch))
                .then_some(len)
        })
    }

    fn match_char(&self, pred: impl Fn(char) -> bool) -> Option<usize> {
        self.peek_ahead(0).filter(|c| pred(*c)).map(|_| 1)
    }

    /// Whitespace other than `\n`.
    fn match_skip(&self) -> Option<usize> {
        let mut len = 0;
        while let Some(ch) = self.peek_ahead(len) {
            if ch.is_whitespace() && ch != '\n' {
                len += 1;
            } else {
                break;
            }
        }
        (len > 0).then_some(len)
    }

    /// Count ASCII digits starting `from` characters ahead. Other Unicode
    /// digits are not number characters.
    fn digits_from(&self, from: usize) -> usize {
        let mut len = 0;
        while self
            .peek_ahead(from + len)
            .is_some_and(|c| c.is_ascii_digit())
        {
            len += 1;
        }
        len
    }

    /// True when a word that started at the current position and is `len`
    /// characters long is not followed by another word character.
    fn at_word_boundary(&self, len: usize) -> bool {
        !self.peek_ahead(len).is_some_and(is_word_char)
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_assignment() {
        let tokens = tokenize("x = 10").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Ident, "x", 0),
                Token::new(TokenKind::AssignOp, "=", 2),
                Token::new(TokenKind::Number, "10", 4),
            ]
        );
    }

    #[test]
    fn test_keyword_priority_over_ident() {
        assert_eq!(kinds("if"), vec![TokenKind::Keyword]);
        assert_eq!(kinds("iffy"), vec![TokenKind::Ident]);
        assert_eq!(kinds("define"), vec![TokenKind::Ident]);
        assert_eq!(kinds("return_value"), vec![TokenKind::Ident]);
        assert_eq!(
            kinds("def else for while return"),
            vec![TokenKind::Keyword; 5]
        );
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("3.14").unwrap();
        assert_eq!(tokens, vec![Token::new(TokenKind::Number, "3.14", 0)]);

        let tokens = tokenize("42").unwrap();
        assert_eq!(tokens, vec![Token::new(TokenKind::Number, "42", 0)]);
    }

    #[test]
    fn test_only_ascii_digits_form_numbers() {
        let err = tokenize("x = \u{663}").unwrap_err();
        assert_eq!(err.character, '\u{663}');
        assert_eq!(err.offset, 4);

        // A non-ASCII digit is still a word character, so it glues to `7`.
        let err = tokenize("7\u{663}").unwrap_err();
        assert_eq!(err.character, '7');
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_trailing_dot_is_rejected() {
        let mut lexer = Lexer::new("3.");
        let err = lexer.tokenize().unwrap_err();
        assert_eq!(
            err,
            LexError {
                character: '.',
                offset: 1
            }
        );
    }

    #[test]
    fn test_number_glued_to_word_is_rejected() {
        let err = tokenize("x = 123abc").unwrap_err();
        assert_eq!(err.character, '1');
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn test_fraction_glued_to_word_keeps_integer_part() {
        // `3.5x`: the fraction does not end on a boundary, so only `3` is a
        // number and the `.` that follows is not a valid token.
        let err = tokenize("3.5x").unwrap_err();
        assert_eq!(err.character, '.');
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn test_strings_keep_quotes() {
        let tokens = tokenize(r#"a = "hi there" + 'x'"#).unwrap();
        assert_eq!(tokens[2], Token::new(TokenKind::String, "\"hi there\"", 4));
        assert_eq!(tokens[4], Token::new(TokenKind::String, "'x'", 17));
    }

    #[test]
    fn test_unterminated_string_is_rejected() {
        let err = tokenize("s = \"abc\n\"").unwrap_err();
        assert_eq!(err.character, '"');
        assert_eq!(err.offset, 4);
    }

    #[test]
    fn test_comments_and_newlines_are_kept() {
        let tokens = tokenize("x = 1 # note\ny = 2").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();

        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::AssignOp,
                TokenKind::Number,
                TokenKind::Comment,
                TokenKind::Newline,
                TokenKind::Ident,
                TokenKind::AssignOp,
                TokenKind::Number,
            ]
        );
        assert_eq!(tokens[3].text, "# note");
        assert_eq!(tokens[4].offset, 12);
    }

    #[test]
    fn test_whitespace_before_newline_keeps_newline() {
        assert_eq!(
            kinds("a \t\n b"),
            vec![TokenKind::Ident, TokenKind::Newline, TokenKind::Ident]
        );
    }

    #[test]
    fn test_operators() {
        let tokens = tokenize("== != <= >= < > = + - * / ( ) : ,").unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| (t.kind, t.text.as_str())).collect();

        assert_eq!(texts[0], (TokenKind::RelOp, "=="));
        assert_eq!(texts[1], (TokenKind::RelOp, "!="));
        assert_eq!(texts[2], (TokenKind::RelOp, "<="));
        assert_eq!(texts[3], (TokenKind::RelOp, ">="));
        assert_eq!(texts[4], (TokenKind::RelOp, "<"));
        assert_eq!(texts[5], (TokenKind::RelOp, ">"));
        assert_eq!(texts[6], (TokenKind::AssignOp, "="));
        assert!(texts[7..].iter().all(|(kind, _)| *kind == TokenKind::Op));
        assert_eq!(texts.len(), 15);
    }

    #[test]
    fn test_bang_alone_is_rejected() {
        let err = tokenize("!x").unwrap_err();
        assert_eq!(err.character, '!');
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_offsets_count_characters() {
        let tokens = tokenize("s = 'çay' + x").unwrap();
        assert_eq!(tokens[3].offset, 10);
        assert_eq!(tokens[4].offset, 12);
    }

    #[test]
    fn test_non_ascii_identifier_is_rejected() {
        let err = tokenize("sayı = 1").unwrap_err();
        assert_eq!(err.character, 's');
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   \t ").unwrap().is_empty());
    }
}
