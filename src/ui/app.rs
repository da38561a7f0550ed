//! Main TUI application state and logic

use crate::analysis::Analysis;
use crate::parser::FrontendError;
use crate::sample::{SAMPLE_NAME, SAMPLE_SOURCE};
use crate::ui::panes::TreeView;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// File the source was read from; `None` for the built-in sample
    pub path: Option<PathBuf>,

    /// The source text on display
    pub source: String,

    /// Result of the last tokenize + parse over `source`
    pub analysis: Analysis,

    /// Tree pane contents
    pub view: TreeView,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app showing `source`, read from `path` if given
    pub fn new(path: Option<PathBuf>, source: String) -> Self {
        let analysis = Analysis::run(&source);
        App {
            path,
            source,
            analysis,
            view: TreeView::Tokens,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            tree_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Title of the source pane
    pub fn source_name(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => SAMPLE_NAME.to_string(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Two panes side by side, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        super::panes::render_source_pane(
            frame,
            columns[0],
            &self.source_name(),
            &self.source,
            &self.analysis.tokens,
            self.analysis.error.as_ref().and_then(FrontendError::offset),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            columns[1],
            &self.analysis,
            self.view,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            &self.analysis,
            self.view,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Char('t') => {
                self.view = TreeView::Tokens;
                self.tree_scroll = 0;
            }
            KeyCode::Char('a') => {
                self.view = TreeView::Ast;
                self.tree_scroll = 0;
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('l') => self.load_sample(),
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(10);
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
        }
    }

    /// Replace the source and analyse it from scratch
    pub fn set_source(&mut self, source: String) {
        self.analysis = Analysis::run(&source);
        self.source = source;
        self.source_scroll = 0;
        self.tree_scroll = 0;
    }

    /// Re-read the file from disk. A read failure replaces the previous
    /// analysis too, so stale results are never shown as current.
    pub fn reload(&mut self) {
        let Some(path) = self.path.clone() else {
            self.set_source(SAMPLE_SOURCE.to_string());
            self.status_message = "Sample reloaded".to_string();
            return;
        };

        match fs::read_to_string(&path) {
            Ok(source) => {
                self.set_source(source);
                self.status_message = format!("Reloaded {}", path.display());
            }
            Err(e) => {
                self.analysis = Analysis::failed(FrontendError::from(e));
                self.status_message = format!("Cannot read {}", path.display());
            }
        }
    }

    /// Switch to the built-in sample program
    pub fn load_sample(&mut self) {
        self.path = None;
        self.set_source(SAMPLE_SOURCE.to_string());
        self.status_message = "Sample loaded".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ErrorKind;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_view_switching() {
        let mut app = App::new(None, "x = 1".to_string());
        assert_eq!(app.view, TreeView::Tokens);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.view, TreeView::Ast);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.view, TreeView::Tokens);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_load_sample_replaces_failed_analysis() {
        let mut app = App::new(Some(PathBuf::from("prog.txt")), "y = x".to_string());
        assert!(!app.analysis.is_clean());

        press(&mut app, KeyCode::Char('l'));
        assert!(app.analysis.is_clean());
        assert_eq!(app.source_name(), SAMPLE_NAME);
    }

    #[test]
    fn test_reload_of_missing_file_is_internal_error() {
        let mut app = App::new(
            Some(PathBuf::from("/nonexistent/scopeview/input.txt")),
            "x = 1".to_string(),
        );
        assert!(app.analysis.is_clean());

        app.reload();
        assert!(app.analysis.program.is_none());
        assert_eq!(
            app.analysis.error.as_ref().map(|e| e.kind()),
            Some(ErrorKind::Internal)
        );
    }
}
