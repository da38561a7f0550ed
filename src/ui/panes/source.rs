//! Source pane rendering with token-based highlighting
//!
//! Colours come from the lexer's tokens rather than a separate highlighter:
//! each token's character offset and length select the characters it paints.
//! Characters no token covers (skipped whitespace) keep the default colour.
//! When the front-end reports an error with an offset, the line holding that
//! offset is drawn on a red background.

use crate::parser::Token;
use crate::ui::theme::{token_style, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Zero-based line index of a character offset. Offsets past the end land on
/// the last line.
pub fn line_of_offset(source: &str, offset: usize) -> usize {
    source.chars().take(offset).filter(|c| *c == '\n').count()
}

/// Split the source into styled lines, one span per run of equally styled
/// characters.
pub fn highlight_source(source: &str, tokens: &[Token]) -> Vec<Line<'static>> {
    let chars: Vec<char> = source.chars().collect();
    let mut styles = vec![Style::default().fg(DEFAULT_THEME.fg); chars.len()];

    for token in tokens {
        let style = token_style(token.kind);
        let end = token.end().min(chars.len());
        for slot in styles.iter_mut().take(end).skip(token.offset) {
            *slot = style;
        }
    }

    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();

    for (ch, style) in chars.iter().zip(styles.iter()) {
        if *ch == '\n' {
            if !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            lines.push(Line::from(std::mem::take(&mut spans)));
            continue;
        }
        if *style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = *style;
        run.push(*ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    if !spans.is_empty() || lines.is_empty() {
        lines.push(Line::from(spans));
    }

    lines
}

/// Render the source pane
#[allow(clippy::too_many_arguments)]
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    source: &str,
    tokens: &[Token],
    error_offset: Option<usize>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = highlight_source(source, tokens);
    let total_lines = lines.len();
    let error_line = error_offset.map(|offset| line_of_offset(source, offset));

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if total_lines > visible_height {
        let max_scroll = total_lines - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, mut line)| {
            let is_error = error_line == Some(idx);
            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            if is_error {
                // White text on red for visibility
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut line.spans {
                    span.style = error_style;
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", idx + 1), num_style)];
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{tokenize, TokenKind};

    fn texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_spans_follow_tokens() {
        let source = "if x:\n  y = 'a'";
        let tokens = tokenize(source).unwrap();
        let lines = highlight_source(source, &tokens);

        assert_eq!(lines.len(), 2);
        assert_eq!(texts(&lines[0]), vec!["if", " ", "x", ":"]);
        assert_eq!(texts(&lines[1]), vec!["  ", "y", " ", "=", " ", "'a'"]);
        assert_eq!(lines[0].spans[0].style, token_style(TokenKind::Keyword));
        assert_eq!(lines[1].spans[5].style, token_style(TokenKind::String));
    }

    #[test]
    fn test_untokenized_source_is_plain() {
        let lines = highlight_source("a $ b\n", &[]);
        assert_eq!(lines.len(), 1);
        assert_eq!(texts(&lines[0]), vec!["a $ b"]);
    }

    #[test]
    fn test_line_of_offset() {
        let source = "a = 1\nb = ç\nc";
        assert_eq!(line_of_offset(source, 0), 0);
        assert_eq!(line_of_offset(source, 6), 1);
        assert_eq!(line_of_offset(source, 12), 2);
        assert_eq!(line_of_offset(source, 99), 2);
    }
}
