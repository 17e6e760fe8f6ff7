//! Side-panel description of the selected class.

use crate::tree::{TreeLine, render_subtree};
use classtree_core::config::ViewConfig;
use classtree_core::hierarchy::{Forest, NodeId};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use std::path::Path;

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

/// Every line of the details panel for `id`.
pub fn detail_lines(forest: &Forest, id: NodeId, root: &Path, view: &ViewConfig) -> Vec<Line<'static>> {
    let node = forest.node(id);
    let entity = &node.entity;
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        entity.name.clone(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    lines.push(field("Namespace", entity.namespace.as_deref().unwrap_or("(none)")));
    let badges = entity.badges();
    lines.push(field(
        "Modifiers",
        &if badges.is_empty() {
            "(none)".to_string()
        } else {
            badges.join(", ")
        },
    ));
    lines.push(field("Depth", &node.depth.to_string()));
    lines.push(field("Base class", entity.declared_base().unwrap_or("(none)")));
    if let Some(container) = node.container {
        lines.push(field("Nested in", &forest.node(container).entity.full_name()));
    }
    lines.push(field(
        "Interfaces",
        &if entity.interfaces.is_empty() {
            "(none)".to_string()
        } else {
            entity.interfaces.join(", ")
        },
    ));

    let counts = forest.descendant_counts(id);
    lines.push(field(
        "Descendants",
        &format!(
            "{} ({} inherited, {} nested)",
            counts.total(),
            counts.inherited,
            counts.nested
        ),
    ));
    if counts.total() > 0 {
        lines.extend(mini_tree(forest, id, view.mini_tree_lines));
    }

    lines.push(field("Methods", &entity.method_count.to_string()));
    lines.push(field("Lines", &entity.line_count.to_string()));
    lines.push(field(
        "File",
        &shorten_path(&display_path(&entity.file_path, root), view.path_max_chars),
    ));
    let size = std::fs::metadata(&entity.file_path)
        .map(|m| format_size(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    lines.push(field("Size", &size));
    lines
}

fn field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Yellow)),
        Span::raw(value.to_string()),
    ])
}

/// The subtree under `id`, skipping `id` itself, limited to `max_lines`.
fn mini_tree(forest: &Forest, id: NodeId, max_lines: usize) -> Vec<Line<'static>> {
    let below: Vec<TreeLine> = render_subtree(forest, id).into_iter().skip(1).collect();
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines: Vec<Line<'static>> = below
        .iter()
        .take(max_lines)
        .map(|l| Line::from(Span::styled(format!("  {}", l.plain()), dim)))
        .collect();
    if below.len() > max_lines {
        lines.push(Line::from(Span::styled(
            format!("  … {} more", below.len() - max_lines),
            dim,
        )));
    }
    lines
}

/// `path` relative to `root` when it lies below it.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Keep the last `max_chars` characters of `path` behind a `…/` marker.
pub fn shorten_path(path: &str, max_chars: usize) -> String {
    let count = path.chars().count();
    if count <= max_chars {
        return path.to_string();
    }
    let keep = max_chars.saturating_sub(2);
    let tail: String = path.chars().skip(count - keep).collect();
    format!("…/{}", tail.trim_start_matches('/'))
}

pub fn format_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}
