//! Navigation state machine.
//!
//! Holds the rendered tree, the selection cursor, the tree viewport and the
//! preview scroll position. Key handling is pure state mutation; the caller
//! performs whatever [`Action`] a key asks for.

use crate::highlight::Highlighter;
use crate::preview::SourcePreview;
use crate::tree::{TreeLine, render_tree};
use crate::viewport::Viewport;
use classtree_core::config::ViewConfig;
use classtree_core::hierarchy::{Forest, HierarchyNode, NodeId};
use classtree_core::stats::TreeStats;
use classtree_parser::Language;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::Line;
use std::path::{Path, PathBuf};

/// Which side panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Tree,
    Preview,
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Export,
    Quit,
}

pub struct App {
    root: PathBuf,
    language: Language,
    forest: Forest,
    stats: TreeStats,
    lines: Vec<TreeLine>,
    view: ViewConfig,
    highlighter: Box<dyn Highlighter>,
    mode: Mode,
    selected: usize,
    viewport: Viewport,
    preview_scroll: usize,
    /// Source rows the preview panel shows; starts at `view.preview_height`.
    preview_rows: usize,
    preview: Option<SourcePreview>,
    status: Option<String>,
}

impl App {
    pub fn new(
        root: impl Into<PathBuf>,
        language: Language,
        forest: Forest,
        view: ViewConfig,
        highlighter: Box<dyn Highlighter>,
    ) -> Self {
        let stats = TreeStats::aggregate(&forest);
        let lines = render_tree(&forest);
        let preview_rows = view.preview_height;
        Self {
            root: root.into(),
            language,
            forest,
            stats,
            lines,
            view,
            highlighter,
            mode: Mode::Tree,
            selected: 0,
            viewport: Viewport::default(),
            preview_scroll: 0,
            preview_rows,
            preview: None,
            status: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    pub fn lines(&self) -> &[TreeLine] {
        &self.lines
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn preview_scroll(&self) -> usize {
        self.preview_scroll
    }

    pub fn preview_rows(&self) -> usize {
        self.preview_rows
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Node under the cursor, if the tree has any lines.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.lines.get(self.selected).map(|l| l.node)
    }

    fn selected_entry(&self) -> Option<&HierarchyNode> {
        self.selected_node().map(|id| self.forest.node(id))
    }

    /// Tell the app how many tree rows fit on screen.
    pub fn set_tree_rows(&mut self, rows: usize) {
        if rows != self.viewport.visible_rows {
            self.viewport.resize(rows, self.selected, self.lines.len());
        }
    }

    /// Tell the app how many source rows the preview panel shows.
    pub fn set_preview_rows(&mut self, rows: usize) {
        if rows != self.preview_rows {
            self.preview_rows = rows;
            let max = self.preview_max_scroll();
            self.preview_scroll = self.preview_scroll.min(max);
        }
    }

    fn preview_max_scroll(&mut self) -> usize {
        let rows = self.preview_rows;
        self.preview().map_or(0, |p| p.max_scroll(rows))
    }

    /// Preview of the selected node's file, loaded on first use.
    pub fn preview(&mut self) -> Option<&SourcePreview> {
        let path = self.selected_entry()?.entity.file_path.clone();
        if self.preview.as_ref().is_none_or(|p| p.path() != path) {
            self.preview = Some(SourcePreview::load(&path));
        }
        self.preview.as_ref()
    }

    /// Rendered preview window for the selected node, `height` rows tall.
    pub fn preview_lines(&mut self, height: usize) -> Vec<Line<'static>> {
        if self.preview().is_none() {
            return Vec::new();
        }
        let Some(preview) = self.preview.as_ref() else {
            return Vec::new();
        };
        preview.render(
            self.preview_scroll,
            height,
            self.view.preview_max_columns,
            self.highlighter.as_ref(),
            self.language,
        )
    }

    /// Handle a key event, including modifier chords.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        self.handle_key(key.code)
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('e') => return Action::Export,
            KeyCode::Enter => self.toggle_mode(),
            _ => match self.mode {
                Mode::Tree => self.tree_key(code),
                Mode::Preview => self.preview_key(code),
            },
        }
        Action::Continue
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Tree => Mode::Preview,
            Mode::Preview => Mode::Tree,
        };
    }

    fn tree_key(&mut self, code: KeyCode) {
        let last = self.lines.len().saturating_sub(1);
        let page = self.viewport.visible_rows.max(1);
        let target = match code {
            KeyCode::Up | KeyCode::Char('k') => self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => (self.selected + 1).min(last),
            KeyCode::PageUp => self.selected.saturating_sub(page),
            KeyCode::PageDown => (self.selected + page).min(last),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => return,
        };
        self.select(target);
    }

    fn preview_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.preview_scroll = self.preview_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.preview_max_scroll();
                self.preview_scroll = (self.preview_scroll + 1).min(max);
            }
            _ => {}
        }
    }

    fn select(&mut self, index: usize) {
        if index != self.selected {
            self.selected = index;
            self.preview_scroll = 0;
        }
        self.viewport.follow(self.selected, self.lines.len());
    }
}
