//! Tree pane: the token list or the syntax tree outline

use crate::analysis::Analysis;
use crate::ui::theme::{token_style, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// What the tree pane lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeView {
    Tokens,
    Ast,
}

impl TreeView {
    pub fn title(self) -> &'static str {
        match self {
            TreeView::Tokens => " Lexical Analysis ",
            TreeView::Ast => " Syntax Tree ",
        }
    }
}

/// One row per token, newlines and comments left out.
pub fn token_rows(analysis: &Analysis) -> Vec<Line<'static>> {
    analysis
        .visible_tokens()
        .map(|token| {
            Line::from(vec![
                Span::styled(format!("{}: ", token.kind), token_style(token.kind)),
                Span::styled(
                    format!("'{}'", token.text),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
            ])
        })
        .collect()
}

/// One row per node, indented two spaces per level.
pub fn ast_rows(analysis: &Analysis) -> Vec<Line<'static>> {
    let Some(program) = &analysis.program else {
        return Vec::new();
    };

    program
        .outline()
        .into_iter()
        .map(|row| {
            let mut spans = vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(
                    row.kind.to_string(),
                    Style::default().fg(DEFAULT_THEME.node_kind),
                ),
            ];
            if let Some(value) = row.value {
                spans.push(Span::styled(
                    format!(": '{}'", value),
                    Style::default().fg(DEFAULT_THEME.secondary),
                ));
            }
            Line::from(spans)
        })
        .collect()
}

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    analysis: &Analysis,
    view: TreeView,
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
        .title(view.title())
        .borders(Borders::ALL)
        .border_style(border_style);

    let rows = match view {
        TreeView::Tokens => token_rows(analysis),
        TreeView::Ast => ast_rows(analysis),
    };

    if rows.is_empty() {
        let placeholder = match view {
            TreeView::Tokens => "(no tokens)",
            TreeView::Ast => "(no tree)",
        };
        let paragraph = Paragraph::new(placeholder)
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let total_items = rows.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = rows
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(ListItem::new)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_token_rows_skip_trivia() {
        let analysis = Analysis::run("x = 'a' # c\n");
        assert_eq!(
            plain(&token_rows(&analysis)),
            vec!["IDENT: 'x'", "ASSIGN_OP: '='", "STRING: ''a''"]
        );
    }

    #[test]
    fn test_ast_rows() {
        let analysis = Analysis::run("x = 10\ny = x + 5");
        assert_eq!(
            plain(&ast_rows(&analysis)),
            vec![
                "program",
                "  assignment: '='",
                "    identifier: 'x'",
                "    number: '10'",
                "  assignment: '='",
                "    identifier: 'y'",
                "    binary_op: '+'",
                "      identifier: 'x'",
                "      number: '5'",
            ]
        );
    }

    #[test]
    fn test_no_tree_after_error() {
        let analysis = Analysis::run("y = x");
        assert!(ast_rows(&analysis).is_empty());
        assert_eq!(token_rows(&analysis).len(), 3);
    }
}
