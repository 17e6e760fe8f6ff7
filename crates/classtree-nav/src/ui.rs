//! ratatui drawing of the navigator screen.

use crate::app::{App, Mode};
use crate::details::detail_lines;
use crate::tree::LineClass;
use classtree_core::entity::ModifierClass;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

/// Draw the whole screen: header, tree beside the side panel, footer.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    draw_tree(frame, body[0], app);
    match app.mode() {
        Mode::Tree => draw_details(frame, body[1], app),
        Mode::Preview => draw_preview(frame, body[1], app),
    }

    draw_footer(frame, chunks[2], app);
}

/// Foreground colour for a tree line, by modifier priority.
pub fn line_style(class: LineClass) -> Style {
    let style = match class.modifier {
        ModifierClass::Normal => Style::default().fg(Color::White),
        ModifierClass::Abstract => Style::default().fg(Color::Magenta),
        ModifierClass::Sealed => Style::default().fg(Color::Red),
        ModifierClass::Static => Style::default().fg(Color::Blue),
    };
    if class.nested {
        style.add_modifier(Modifier::ITALIC)
    } else {
        style
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();
    let accent = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let header = Paragraph::new(Line::from(vec![
        Span::styled("classtree ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(app.root().display().to_string()),
        Span::raw("  ·  "),
        Span::styled(app.language().display_name(), accent),
        Span::raw(format!(
            "  ·  {} classes, {} nested, max depth {}, {} deep",
            stats.total,
            stats.nested,
            stats.max_depth,
            stats.deep.len()
        )),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_tree(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default().borders(Borders::ALL).title(" Classes ");
    let inner = block.inner(area);
    app.set_tree_rows(inner.height as usize);

    let total = app.lines().len();
    let selected = app.selected();
    let dim = Style::default().fg(Color::DarkGray);
    let items: Vec<ListItem> = app
        .viewport()
        .range(total)
        .map(|idx| {
            let line = &app.lines()[idx];
            let mut label = line_style(line.class);
            if idx == selected {
                label = label.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(vec![
                Span::styled(line.prefix.clone(), dim),
                Span::styled(line.label.clone(), label),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_details(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Details ");
    let lines = app
        .selected_node()
        .map(|id| detail_lines(app.forest(), id, app.root(), app.view()))
        .unwrap_or_default();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_preview(frame: &mut Frame, area: Rect, app: &mut App) {
    let title = app
        .preview()
        .map(|p| {
            let name = p.path().file_name().map_or_else(
                || p.path().display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            );
            format!(" Preview: {name} ")
        })
        .unwrap_or_else(|| " Preview ".to_string());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    // Keep one row for the "more lines" footer.
    let height = app
        .view()
        .preview_height
        .min((inner.height as usize).saturating_sub(1))
        .max(1);
    app.set_preview_rows(height);
    let lines = app.preview_lines(height);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut spans = match app.mode() {
        Mode::Tree => vec![
            Span::styled("↑↓/jk", key),
            Span::raw(" move  "),
            Span::styled("PgUp/PgDn/Home/End", key),
            Span::raw(" jump  "),
            Span::styled("Enter", key),
            Span::raw(" preview  "),
        ],
        Mode::Preview => vec![
            Span::styled("↑↓/jk", key),
            Span::raw(" scroll  "),
            Span::styled("Enter", key),
            Span::raw(" tree  "),
        ],
    };
    spans.extend([
        Span::styled("e", key),
        Span::raw(" export  "),
        Span::styled("q", key),
        Span::raw(" quit"),
    ]);
    if let Some(status) = app.status() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(status.to_string(), Style::default().fg(Color::Green)));
    }
    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
