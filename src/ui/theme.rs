use crate::parser::TokenKind;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub ident: Color,
    pub operator: Color,
    pub relop: Color,
    pub assign: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub node_kind: Color, // Cyan for tree node kinds
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),        // Mauve for keywords
    string: Color::Rgb(249, 226, 175),         // Yellow for strings
    number: Color::Rgb(166, 227, 161),         // Green for numbers
    ident: Color::Rgb(250, 179, 135),          // Orange for identifiers
    operator: Color::Rgb(137, 180, 250),       // Blue for operators
    relop: Color::Rgb(245, 194, 231),          // Pink for comparisons
    assign: Color::Rgb(116, 199, 236),         // Sapphire for '='
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for status bar
    node_kind: Color::Rgb(148, 226, 213),      // Cyan/teal for node kinds
};

/// Highlight style for a token class. Keywords are bold, comments italic.
pub fn token_style(kind: TokenKind) -> Style {
    let theme = &DEFAULT_THEME;
    match kind {
        TokenKind::Keyword => Style::default()
            .fg(theme.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::Comment => Style::default()
            .fg(theme.comment)
            .add_modifier(Modifier::ITALIC),
        TokenKind::Number => Style::default().fg(theme.number),
        TokenKind::String => Style::default().fg(theme.string),
        TokenKind::Ident => Style::default().fg(theme.ident),
        TokenKind::Op => Style::default().fg(theme.operator),
        TokenKind::RelOp => Style::default().fg(theme.relop),
        TokenKind::AssignOp => Style::default().fg(theme.assign),
        TokenKind::Newline | TokenKind::Eof => Style::default().fg(theme.fg),
    }
}
