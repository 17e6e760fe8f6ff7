//! Scrollable source preview for the selected class's file.

use crate::highlight::Highlighter;
use classtree_parser::Language;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use std::io;
use std::path::{Path, PathBuf};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TAB: &str = "    ";

/// A source file's lines, read once and kept for scrolling.
#[derive(Debug, Clone)]
pub struct SourcePreview {
    path: PathBuf,
    content: Result<Vec<String>, String>,
}

impl SourcePreview {
    /// Read `path`. Failures are kept as the message shown in place of the source.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read(path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes)
                .lines()
                .map(|l| l.replace('\t', TAB))
                .collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err("file not found".to_string()),
            Err(e) => Err(format!("error reading file: {e}")),
        };
        if let Err(message) = &content {
            tracing::debug!("preview of {}: {message}", path.display());
        }
        Self {
            path: path.to_path_buf(),
            content,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Line count, zero when the file could not be read.
    pub fn total_lines(&self) -> usize {
        self.content.as_ref().map_or(0, Vec::len)
    }

    pub fn error(&self) -> Option<&str> {
        self.content.as_ref().err().map(String::as_str)
    }

    /// Largest scroll offset that still fills a window of `height` rows.
    pub fn max_scroll(&self, height: usize) -> usize {
        self.total_lines().saturating_sub(height)
    }

    /// Render `height` lines starting at `scroll`, each prefixed by its
    /// right-aligned line number and cut to `max_columns` display columns.
    pub fn render(
        &self,
        scroll: usize,
        height: usize,
        max_columns: usize,
        highlighter: &dyn Highlighter,
        language: Language,
    ) -> Vec<Line<'static>> {
        let lines = match &self.content {
            Ok(lines) => lines,
            Err(message) => {
                return vec![Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(Color::Red),
                ))];
            }
        };
        let total = lines.len();
        let start = scroll.min(total);
        let end = (start + height).min(total);
        let number_width = total.max(1).to_string().len();
        let gutter = Style::default().fg(Color::DarkGray);

        let mut rendered: Vec<Line<'static>> = lines[start..end]
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let mut spans = vec![Span::styled(
                    format!("{:>width$} │ ", start + i + 1, width = number_width),
                    gutter,
                )];
                spans.extend(highlighter.highlight(&truncate(text, max_columns), language));
                Line::from(spans)
            })
            .collect();

        if end < total {
            rendered.push(Line::from(Span::styled(
                format!("… {} more lines", total - end),
                gutter,
            )));
        }
        rendered
    }
}

/// Cut `text` to at most `max_columns` display columns, ending with `…` when cut.
pub fn truncate(text: &str, max_columns: usize) -> String {
    if text.width() <= max_columns {
        return text.to_string();
    }
    let budget = max_columns.saturating_sub(1);
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}
